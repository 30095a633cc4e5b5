//! # Order Submission Orchestrator
//!
//! The state machine run when the user submits the order form:
//!
//! ```text
//! Idle/Failed -> AcquiringLocation -> Submitting -> Success
//!                        |                 |
//!                        +----> Failed <---+
//! ```
//!
//! 1. Read the raw form fields and show the acquiring banner.
//! 2. Ask the [`LocationService`] for one fix.
//! 3. Build the payload from the fields and that fix, and submit it.
//! 4. On allocation draw the route, fit the map to it, show the summary and refresh the
//!    history. On any failure only the banner changes.
//!
//! A second `submit_order` while an attempt is running (or waiting for its reload) is
//! refused with [`OrchestratorError::Busy`] and changes nothing.

pub mod outcome;
pub mod state;

pub use outcome::*;
pub use state::*;

use crate::allocation::AllocationClient;
use crate::clients::{MapClient, StatusClient};
use crate::form::{read_order_fields, InputSurface};
use crate::history::{HistoryRefresher, RefreshOutcome};
use crate::location::LocationService;
use crate::model::{AllocationOutcome, OrderPayload};
use crate::status::Banner;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, info_span, warn, Instrument};

pub struct OrderSubmissionOrchestrator {
    input: Arc<dyn InputSurface>,
    location: Arc<dyn LocationService>,
    allocation: Arc<dyn AllocationClient>,
    map: MapClient,
    status: StatusClient,
    refresher: Option<Arc<dyn HistoryRefresher>>,
    tracker: SubmissionTracker,
    clear_between_submissions: bool,
    attempts: AtomicU64,
}

impl OrderSubmissionOrchestrator {
    pub fn new(
        input: Arc<dyn InputSurface>,
        location: Arc<dyn LocationService>,
        allocation: Arc<dyn AllocationClient>,
        map: MapClient,
        status: StatusClient,
        tracker: SubmissionTracker,
    ) -> Self {
        Self {
            input,
            location,
            allocation,
            map,
            status,
            refresher: None,
            tracker,
            clear_between_submissions: false,
            attempts: AtomicU64::new(0),
        }
    }

    pub fn with_refresher(mut self, refresher: Arc<dyn HistoryRefresher>) -> Self {
        self.refresher = Some(refresher);
        self
    }

    /// Clear earlier markers and routes before drawing a new allocation.
    pub fn clear_between_submissions(mut self, enabled: bool) -> Self {
        self.clear_between_submissions = enabled;
        self
    }

    pub fn state(&self) -> SubmissionState {
        self.tracker.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.tracker.subscribe()
    }

    pub fn tracker(&self) -> &SubmissionTracker {
        &self.tracker
    }

    /// Back to `Idle` without touching the map or the banner.
    pub fn reset(&self) {
        self.tracker.reset();
    }

    /// Runs one submission attempt.
    ///
    /// Workflow failures (location, rejection, network) come back as
    /// `Ok(SubmissionOutcome::Failed)`. `Err` means the attempt was refused or a
    /// component actor is gone.
    pub async fn submit_order(&self) -> Result<SubmissionOutcome, OrchestratorError> {
        self.tracker.try_begin().map_err(|state| {
            warn!(%state, "Submission refused, attempt in progress");
            OrchestratorError::Busy(state)
        })?;

        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self
            .run_attempt()
            .instrument(info_span!("submit_order", attempt))
            .await;

        if let Err(e) = &result {
            warn!(attempt, error = %e, "Submission aborted");
            self.tracker.set(SubmissionState::Failed);
        }
        result
    }

    async fn run_attempt(&self) -> Result<SubmissionOutcome, OrchestratorError> {
        info!(state = %SubmissionState::AcquiringLocation, "Submission started");
        let fields = read_order_fields(self.input.as_ref());
        self.status.show(Banner::Acquiring).await?;

        let fix = match self.location.request_fix().await {
            Ok(fix) => fix,
            Err(e) => return self.fail(e.into()).await,
        };
        info!(lat = fix.coord.lat, lon = fix.coord.lon, "Location acquired");

        let payload = OrderPayload::new(fields, &fix);
        self.transition(SubmissionState::Submitting);
        debug!(?payload, "Submitting order");

        let result = match self.allocation.submit(&payload).await {
            Ok(result) => result,
            Err(e) => return self.fail(SubmissionFailure::Network(e)).await,
        };
        let assignment = match result.into_outcome() {
            Ok(AllocationOutcome::Allocated(assignment)) => assignment,
            Ok(AllocationOutcome::Rejected(reason)) => {
                return self.fail(SubmissionFailure::Business(reason)).await
            }
            Err(e) => return self.fail(SubmissionFailure::Network(e)).await,
        };

        self.transition(SubmissionState::Success);
        info!(warehouse = %assignment.warehouse_name, "Allocation accepted");

        if self.clear_between_submissions {
            self.map.clear().await?;
        }
        let route = self
            .map
            .draw_route(
                payload.origin(),
                assignment.destination,
                assignment.warehouse_name.clone(),
            )
            .await?;
        self.map.fit_bounds(route.bounds).await?;

        self.status
            .show(Banner::Allocated {
                warehouse_name: assignment.warehouse_name.clone(),
                dist_km: assignment.dist_km,
                eta: assignment.eta.clone(),
            })
            .await?;

        let refresh = self.refresh_history().await;
        Ok(SubmissionOutcome::Allocated {
            payload,
            assignment,
            bounds: route.bounds,
            refresh,
        })
    }

    async fn fail(&self, failure: SubmissionFailure) -> Result<SubmissionOutcome, OrchestratorError> {
        self.transition(SubmissionState::Failed);
        warn!(%failure, "Submission failed");
        self.status.show(failure.banner()).await?;
        Ok(SubmissionOutcome::Failed(failure))
    }

    /// A scheduled reload keeps the state at `Success` until the page resets it.
    async fn refresh_history(&self) -> Option<RefreshOutcome> {
        let Some(refresher) = &self.refresher else {
            self.transition(SubmissionState::Idle);
            return None;
        };

        match refresher.refresh().await {
            Ok(outcome @ RefreshOutcome::ReloadScheduled { .. }) => Some(outcome),
            Ok(outcome) => {
                self.transition(SubmissionState::Idle);
                Some(outcome)
            }
            Err(e) => {
                warn!(error = %e, "History refresh failed");
                self.transition(SubmissionState::Idle);
                None
            }
        }
    }

    fn transition(&self, next: SubmissionState) {
        debug!(from = %self.tracker.get(), to = %next, "Transition");
        self.tracker.set(next);
    }
}
