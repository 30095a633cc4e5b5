use super::session::PageSession;
use crate::allocation::{AllocationClient, HttpAllocationClient};
use crate::clients::{MapClient, StatusClient};
use crate::config::{DispatchConfig, RefreshStrategy};
use crate::form::InputSurface;
use crate::history::{DelayedReload, HistoryRefresher, StatsRefresher};
use crate::location::{self, LocationService};
use crate::map_view;
use crate::model::DashboardStats;
use crate::orchestrator::{OrderSubmissionOrchestrator, SubmissionTracker};
use crate::status::{self, BannerSink};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum SystemError {
    #[error("HTTP client setup failed: {0}")]
    Http(String),

    #[error("component task failed: {0}")]
    Join(String),
}

/// What the host provides. Location, allocation and refresh fall back to the
/// configuration when not supplied.
pub struct Collaborators {
    pub input: Arc<dyn InputSurface>,
    pub sink: Arc<dyn BannerSink>,
    pub location: Option<Arc<dyn LocationService>>,
    pub allocation: Option<Arc<dyn AllocationClient>>,
    pub refresher: Option<Arc<dyn HistoryRefresher>>,
}

impl Collaborators {
    pub fn new(input: Arc<dyn InputSurface>, sink: Arc<dyn BannerSink>) -> Self {
        Self {
            input,
            sink,
            location: None,
            allocation: None,
            refresher: None,
        }
    }

    pub fn with_location(mut self, location: Arc<dyn LocationService>) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_allocation(mut self, allocation: Arc<dyn AllocationClient>) -> Self {
        self.allocation = Some(allocation);
        self
    }

    pub fn with_refresher(mut self, refresher: Arc<dyn HistoryRefresher>) -> Self {
        self.refresher = Some(refresher);
        self
    }
}

/// Running page: both component actors, the session and the orchestrator.
pub struct DispatchSystem {
    pub orchestrator: Arc<OrderSubmissionOrchestrator>,
    pub map_client: MapClient,
    pub status_client: StatusClient,
    session: Arc<PageSession>,
    refresher: Option<Arc<dyn HistoryRefresher>>,
    stats: Option<watch::Receiver<Option<DashboardStats>>>,
    handles: Vec<JoinHandle<()>>,
}

impl DispatchSystem {
    /// Spawns the component actors and wires the orchestrator. Must run inside a tokio
    /// runtime.
    pub fn start(config: &DispatchConfig, collaborators: Collaborators) -> Result<Self, SystemError> {
        let http = reqwest::Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| SystemError::Http(e.to_string()))?;

        // 1. Components
        let (map_actor, map_client) = map_view::new(&config.map);
        let (status_actor, status_client) = status::new();
        let handles = vec![
            tokio::spawn(map_actor.run(())),
            tokio::spawn(status_actor.run(collaborators.sink)),
        ];

        // 2. Page session
        let tracker = SubmissionTracker::new();
        let session = Arc::new(PageSession::new(
            map_client.clone(),
            status_client.clone(),
            tracker.clone(),
        ));

        // 3. Collaborators, defaulting to the configured ones
        let location = collaborators
            .location
            .unwrap_or_else(|| location::from_config(&config.location, http.clone()));
        let allocation = collaborators.allocation.unwrap_or_else(|| {
            Arc::new(HttpAllocationClient::new(
                http.clone(),
                config.allocation.endpoint.clone(),
                Duration::from_millis(config.allocation.timeout_ms),
            ))
        });

        let mut stats = None;
        let refresher: Option<Arc<dyn HistoryRefresher>> = match collaborators.refresher {
            Some(refresher) => Some(refresher),
            None => match config.refresh.strategy {
                RefreshStrategy::Reload => Some(Arc::new(DelayedReload::new(
                    session.clone(),
                    Duration::from_millis(config.refresh.delay_ms),
                ))),
                RefreshStrategy::Stats => {
                    let refresher = StatsRefresher::new(
                        http.clone(),
                        config.refresh.stats_url.clone(),
                        Duration::from_millis(config.refresh.timeout_ms),
                    );
                    stats = Some(refresher.subscribe());
                    Some(Arc::new(refresher))
                }
                RefreshStrategy::Off => None,
            },
        };

        // 4. Orchestrator
        let mut orchestrator = OrderSubmissionOrchestrator::new(
            collaborators.input,
            location,
            allocation,
            map_client.clone(),
            status_client.clone(),
            tracker,
        )
        .clear_between_submissions(config.map.clear_between_submissions);
        if let Some(refresher) = &refresher {
            orchestrator = orchestrator.with_refresher(refresher.clone());
        }

        info!(
            endpoint = %config.allocation.endpoint,
            refresh = ?config.refresh.strategy,
            "Dispatch system started"
        );

        Ok(Self {
            orchestrator: Arc::new(orchestrator),
            map_client,
            status_client,
            session,
            refresher,
            stats,
            handles,
        })
    }

    pub fn session(&self) -> Arc<PageSession> {
        self.session.clone()
    }

    /// History summaries published by the stats refresher, when that strategy is used.
    pub fn stats(&self) -> Option<watch::Receiver<Option<DashboardStats>>> {
        self.stats.clone()
    }

    /// Cancels pending reloads, drops every client and waits for both actors to stop.
    ///
    /// Clones of the orchestrator or of the clients held elsewhere keep the actors alive;
    /// drop them first.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        if let Some(refresher) = &self.refresher {
            refresher.cancel_pending();
        }

        drop(self.orchestrator);
        drop(self.refresher);
        drop(self.session);
        drop(self.map_client);
        drop(self.status_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                warn!(error = %e, "Component task ended abnormally");
                return Err(SystemError::Join(e.to_string()));
            }
        }
        info!("Dispatch system stopped");
        Ok(())
    }
}
