use super::{HistoryRefresher, PageHost, RefreshError, RefreshOutcome};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Reloads the page after a fixed delay.
///
/// The delay is a guess at how long the user needs to read the banner; nothing checks
/// that rendering finished before the reload fires.
pub struct DelayedReload {
    host: Arc<dyn PageHost>,
    delay: Duration,
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl DelayedReload {
    pub fn new(host: Arc<dyn PageHost>, delay: Duration) -> Self {
        Self {
            host,
            delay,
            pending: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl HistoryRefresher for DelayedReload {
    async fn refresh(&self) -> Result<RefreshOutcome, RefreshError> {
        let host = self.host.clone();
        let delay = self.delay;
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            debug!("Reload timer fired");
            host.reload();
        });
        if let Ok(mut pending) = self.pending.lock() {
            pending.retain(|handle| !handle.is_finished());
            pending.push(timer);
        }
        info!(delay_ms = delay.as_millis() as u64, "Page reload scheduled");
        Ok(RefreshOutcome::ReloadScheduled { delay })
    }

    fn cancel_pending(&self) {
        if let Ok(mut pending) = self.pending.lock() {
            for timer in pending.drain(..) {
                timer.abort();
            }
        }
    }
}
