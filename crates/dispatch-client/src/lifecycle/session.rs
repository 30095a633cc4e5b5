use crate::clients::{MapClient, StatusClient};
use crate::history::PageHost;
use crate::orchestrator::SubmissionTracker;
use dispatch_actor::ActorClient;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;
use tracing::{info, warn};

/// The page lifetime in-process. A reload resets the map, the banner and the
/// submission state, which is everything a browser reload would throw away.
#[derive(Debug)]
pub struct PageSession {
    map: MapClient,
    status: StatusClient,
    tracker: SubmissionTracker,
    reloads: Arc<AtomicU64>,
    reloaded: Arc<Notify>,
}

impl PageSession {
    pub fn new(map: MapClient, status: StatusClient, tracker: SubmissionTracker) -> Self {
        Self {
            map,
            status,
            tracker,
            reloads: Arc::new(AtomicU64::new(0)),
            reloaded: Arc::new(Notify::new()),
        }
    }

    /// Completed reloads so far.
    pub fn reload_count(&self) -> u64 {
        self.reloads.load(Ordering::SeqCst)
    }

    /// Resolves once the next reload has finished. A reload that finished before
    /// anyone waited is not lost.
    pub async fn reloaded(&self) {
        self.reloaded.notified().await;
    }
}

impl PageHost for PageSession {
    fn reload(&self) {
        let map = self.map.clone();
        let status = self.status.clone();
        let tracker = self.tracker.clone();
        let reloads = self.reloads.clone();
        let reloaded = self.reloaded.clone();

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("Reload requested outside the runtime, ignored");
            return;
        };
        runtime.spawn(async move {
            info!("Page reload");
            // Components first, so a new attempt never starts on a half-reset page
            if let Err(e) = map.reset().await {
                warn!(error = %e, "Map reset failed");
            }
            if let Err(e) = status.reset().await {
                warn!(error = %e, "Status reset failed");
            }
            tracker.reset();
            let count = reloads.fetch_add(1, Ordering::SeqCst) + 1;
            info!(reloads = count, "Page reloaded");
            reloaded.notify_one();
        });
    }
}
