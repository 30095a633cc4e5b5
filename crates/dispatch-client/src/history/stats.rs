use super::{HistoryRefresher, RefreshError, RefreshOutcome};
use crate::model::DashboardStats;
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{info, instrument, warn};

/// Pulls the history summary from the stats endpoint and publishes the latest copy.
pub struct StatsRefresher {
    http: reqwest::Client,
    url: String,
    timeout: Duration,
    latest: watch::Sender<Option<DashboardStats>>,
}

impl StatsRefresher {
    pub fn new(http: reqwest::Client, url: impl Into<String>, timeout: Duration) -> Self {
        let (latest, _) = watch::channel(None);
        Self {
            http,
            url: url.into(),
            timeout,
            latest,
        }
    }

    /// Receives every summary fetched from now on. Starts at `None` until the first
    /// successful refresh.
    pub fn subscribe(&self) -> watch::Receiver<Option<DashboardStats>> {
        self.latest.subscribe()
    }

    pub fn latest(&self) -> Option<DashboardStats> {
        self.latest.borrow().clone()
    }
}

#[async_trait]
impl HistoryRefresher for StatsRefresher {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn refresh(&self) -> Result<RefreshOutcome, RefreshError> {
        let response = self
            .http
            .get(&self.url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| RefreshError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Stats request rejected");
            return Err(RefreshError::Request(format!(
                "server responded with status {}",
                status.as_u16()
            )));
        }

        let stats: DashboardStats = response
            .json()
            .await
            .map_err(|e| RefreshError::Malformed(e.to_string()))?;
        info!(
            total = stats.total,
            active = stats.active,
            recent = stats.orders.len(),
            "History refreshed"
        );
        self.latest.send_replace(Some(stats.clone()));
        Ok(RefreshOutcome::Refreshed(stats))
    }
}
