use async_trait::async_trait;
use dispatch_client::allocation::{AllocationClient, NetworkError};
use dispatch_client::config::{DispatchConfig, RefreshStrategy};
use dispatch_client::form::FormValues;
use dispatch_client::history::RefreshOutcome;
use dispatch_client::lifecycle::{Collaborators, DispatchSystem};
use dispatch_client::location::{
    FixedLocation, LocationError, LocationService, NoLocation, PositionFix,
};
use dispatch_client::map_view::MarkerStyle;
use dispatch_client::model::{AllocationResult, Coord, OrderPayload};
use dispatch_client::orchestrator::{
    OrchestratorError, SubmissionFailure, SubmissionOutcome, SubmissionState,
};
use dispatch_client::status::{Banner, MemorySink};
use dispatch_actor::ActorClient;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

// --- Test Collaborators ---

/// Answers fixes from a script, one per call.
struct ScriptedLocation {
    fixes: Mutex<VecDeque<Result<PositionFix, LocationError>>>,
    calls: AtomicUsize,
}

impl ScriptedLocation {
    fn new(fixes: Vec<Result<PositionFix, LocationError>>) -> Self {
        Self {
            fixes: Mutex::new(fixes.into()),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl LocationService for ScriptedLocation {
    async fn request_fix(&self) -> Result<PositionFix, LocationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.fixes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LocationError::PositionUnavailable("script empty".into())))
    }
}

/// Blocks until released, to hold an attempt in AcquiringLocation.
struct GatedLocation {
    gate: Notify,
    fix: PositionFix,
    calls: AtomicUsize,
}

#[async_trait]
impl LocationService for GatedLocation {
    async fn request_fix(&self) -> Result<PositionFix, LocationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.gate.notified().await;
        Ok(self.fix)
    }
}

/// Records every payload and answers from a script.
struct RecordingAllocation {
    responses: Mutex<VecDeque<Result<AllocationResult, NetworkError>>>,
    payloads: Mutex<Vec<OrderPayload>>,
}

impl RecordingAllocation {
    fn new(responses: Vec<Result<AllocationResult, NetworkError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            payloads: Mutex::new(Vec::new()),
        }
    }

    fn payloads(&self) -> Vec<OrderPayload> {
        self.payloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl AllocationClient for RecordingAllocation {
    async fn submit(&self, payload: &OrderPayload) -> Result<AllocationResult, NetworkError> {
        self.payloads.lock().unwrap().push(payload.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(NetworkError::Transport("script empty".into())))
    }
}

fn delhi() -> AllocationResult {
    AllocationResult::allocated("WH-Delhi", Coord::new(28.7, 77.1), 12.3, "30 min")
}

fn config_with(strategy: RefreshStrategy) -> DispatchConfig {
    let mut config = DispatchConfig::default();
    config.refresh.strategy = strategy;
    config
}

fn start(
    config: &DispatchConfig,
    location: Arc<dyn LocationService>,
    allocation: Arc<dyn AllocationClient>,
) -> (DispatchSystem, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let form = Arc::new(FormValues::with_order("F1", "Wheat", "10"));
    let collaborators = Collaborators::new(form, sink.clone())
        .with_location(location)
        .with_allocation(allocation);
    let system = DispatchSystem::start(config, collaborators).unwrap();
    (system, sink)
}

// --- Tests ---

#[tokio::test(start_paused = true)]
async fn test_allocation_draws_route_and_schedules_reload() {
    let allocation = Arc::new(RecordingAllocation::new(vec![Ok(delhi())]));
    let (system, sink) = start(
        &DispatchConfig::default(),
        Arc::new(FixedLocation::new(PositionFix::at(28.6, 77.2))),
        allocation.clone(),
    );
    let session = system.session();
    let started = tokio::time::Instant::now();

    let outcome = system.orchestrator.submit_order().await.unwrap();
    let SubmissionOutcome::Allocated { refresh, .. } = outcome else {
        panic!("expected an allocation");
    };
    assert_eq!(
        refresh,
        Some(RefreshOutcome::ReloadScheduled {
            delay: Duration::from_millis(4000)
        })
    );
    assert_eq!(system.orchestrator.state(), SubmissionState::Success);

    // Payload built from the form and this attempt's fix
    assert_eq!(
        allocation.payloads(),
        vec![OrderPayload {
            farmer_id: "F1".into(),
            crop_type: "Wheat".into(),
            quantity: "10".into(),
            lat: 28.6,
            lon: 77.2,
        }]
    );

    let banner = system.status_client.current().await.unwrap().unwrap();
    let text = banner.to_string();
    assert!(text.contains("WH-Delhi"));
    assert!(text.contains("12.3"));
    assert!(text.contains("30 min"));
    assert_eq!(sink.renders().first(), Some(&Some(Banner::Acquiring)));

    let map = system.map_client.snapshot().await.unwrap();
    assert_eq!(map.markers.len(), 2);
    assert_eq!(map.routes.len(), 1);
    let origin = map.markers_with_style(MarkerStyle::Origin).next().unwrap();
    let destination = map.markers_with_style(MarkerStyle::Destination).next().unwrap();
    assert_eq!(origin.coord, Coord::new(28.6, 77.2));
    assert_eq!(destination.coord, Coord::new(28.7, 77.1));
    let route = map.latest_route().unwrap();
    assert_eq!((route.from, route.to), (origin.coord, destination.coord));
    assert!(map.viewport.contains(origin.coord));
    assert!(map.viewport.contains(destination.coord));

    // The reload resets the whole page
    session.reloaded().await;
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(4000), "reloaded after {elapsed:?}");
    assert!(elapsed < Duration::from_millis(4100));
    assert_eq!(session.reload_count(), 1);
    assert!(system.map_client.snapshot().await.unwrap().is_empty());
    assert_eq!(system.status_client.current().await.unwrap(), None);
    assert_eq!(system.orchestrator.state(), SubmissionState::Idle);

    drop(session);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_business_rejection_shows_reason_only() {
    let allocation = Arc::new(RecordingAllocation::new(vec![Ok(
        AllocationResult::rejected("No warehouse available"),
    )]));
    let (system, _sink) = start(
        &DispatchConfig::default(),
        Arc::new(FixedLocation::new(PositionFix::at(28.6, 77.2))),
        allocation,
    );

    let outcome = system.orchestrator.submit_order().await.unwrap();
    assert_eq!(
        outcome,
        SubmissionOutcome::Failed(SubmissionFailure::Business("No warehouse available".into()))
    );

    let banner = system.status_client.current().await.unwrap().unwrap();
    assert_eq!(banner, Banner::Rejected("No warehouse available".into()));
    assert_eq!(banner.to_string(), "Error: No warehouse available");
    assert!(system.map_client.snapshot().await.unwrap().is_empty());
    assert_eq!(system.orchestrator.state(), SubmissionState::Failed);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_position_unavailable_never_submits() {
    let location = Arc::new(ScriptedLocation::new(vec![Err(
        LocationError::PositionUnavailable("permission denied".into()),
    )]));
    let allocation = Arc::new(RecordingAllocation::new(vec![Ok(delhi())]));
    let (system, _sink) = start(&DispatchConfig::default(), location.clone(), allocation.clone());

    let outcome = system.orchestrator.submit_order().await.unwrap();
    assert_eq!(
        outcome,
        SubmissionOutcome::Failed(SubmissionFailure::PositionUnavailable(
            "permission denied".into()
        ))
    );
    assert_eq!(location.calls.load(Ordering::SeqCst), 1);
    assert!(allocation.payloads().is_empty());
    assert_eq!(
        system.status_client.current().await.unwrap(),
        Some(Banner::LocationUnavailable)
    );
    assert!(system.map_client.snapshot().await.unwrap().is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_missing_capability() {
    let allocation = Arc::new(RecordingAllocation::new(vec![]));
    let (system, _sink) = start(&DispatchConfig::default(), Arc::new(NoLocation), allocation.clone());

    let outcome = system.orchestrator.submit_order().await.unwrap();
    assert_eq!(
        outcome,
        SubmissionOutcome::Failed(SubmissionFailure::UnsupportedCapability)
    );
    assert_eq!(
        system.status_client.current().await.unwrap(),
        Some(Banner::CapabilityUnsupported)
    );
    assert!(allocation.payloads().is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_network_error_leaves_map_untouched() {
    let allocation = Arc::new(RecordingAllocation::new(vec![Err(NetworkError::Transport(
        "connection refused".into(),
    ))]));
    let (system, _sink) = start(
        &DispatchConfig::default(),
        Arc::new(FixedLocation::new(PositionFix::at(28.6, 77.2))),
        allocation,
    );
    let before = system.map_client.snapshot().await.unwrap();

    let outcome = system.orchestrator.submit_order().await.unwrap();
    assert!(matches!(
        outcome,
        SubmissionOutcome::Failed(SubmissionFailure::Network(_))
    ));

    let banner = system.status_client.current().await.unwrap().unwrap();
    assert_eq!(banner.to_string(), "Network Error: connection refused");
    assert_eq!(system.map_client.snapshot().await.unwrap(), before);
    assert_eq!(system.orchestrator.state(), SubmissionState::Failed);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_success_without_destination_is_network_failure() {
    let malformed = AllocationResult {
        success: true,
        warehouse_name: Some("WH-Delhi".into()),
        ..Default::default()
    };
    let allocation = Arc::new(RecordingAllocation::new(vec![Ok(malformed)]));
    let (system, _sink) = start(
        &DispatchConfig::default(),
        Arc::new(FixedLocation::new(PositionFix::at(28.6, 77.2))),
        allocation,
    );

    let outcome = system.orchestrator.submit_order().await.unwrap();
    assert!(matches!(
        outcome,
        SubmissionOutcome::Failed(SubmissionFailure::Network(NetworkError::Malformed(_)))
    ));
    assert!(system.map_client.snapshot().await.unwrap().is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_each_attempt_uses_its_own_fix() {
    let location = Arc::new(ScriptedLocation::new(vec![
        Ok(PositionFix::at(10.0, 70.0)),
        Ok(PositionFix::at(20.0, 75.0)),
    ]));
    let allocation = Arc::new(RecordingAllocation::new(vec![
        Ok(AllocationResult::rejected("full")),
        Ok(AllocationResult::rejected("full")),
    ]));
    let (system, _sink) = start(&DispatchConfig::default(), location, allocation.clone());

    system.orchestrator.submit_order().await.unwrap();
    // Failed is a valid starting point for the next attempt
    system.orchestrator.submit_order().await.unwrap();

    let payloads = allocation.payloads();
    assert_eq!(payloads.len(), 2);
    assert_eq!((payloads[0].lat, payloads[0].lon), (10.0, 70.0));
    assert_eq!((payloads[1].lat, payloads[1].lon), (20.0, 75.0));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_concurrent_submission_is_refused() {
    let location = Arc::new(GatedLocation {
        gate: Notify::new(),
        fix: PositionFix::at(28.6, 77.2),
        calls: AtomicUsize::new(0),
    });
    let allocation = Arc::new(RecordingAllocation::new(vec![Ok(delhi())]));
    let (system, _sink) = start(
        &config_with(RefreshStrategy::Off),
        location.clone(),
        allocation.clone(),
    );

    let orchestrator = system.orchestrator.clone();
    let mut state = orchestrator.subscribe();
    let first = tokio::spawn({
        let orchestrator = orchestrator.clone();
        async move { orchestrator.submit_order().await }
    });
    state
        .wait_for(|s| *s == SubmissionState::AcquiringLocation)
        .await
        .unwrap();

    let second = orchestrator.submit_order().await;
    assert_eq!(
        second,
        Err(OrchestratorError::Busy(SubmissionState::AcquiringLocation))
    );

    location.gate.notify_one();
    let outcome = first.await.unwrap().unwrap();
    assert!(outcome.is_allocated());
    assert_eq!(location.calls.load(Ordering::SeqCst), 1);
    assert_eq!(allocation.payloads().len(), 1);
    // Nothing pending, ready for the next order
    assert_eq!(orchestrator.state(), SubmissionState::Idle);

    drop(orchestrator);
    system.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_success_blocks_until_reload() {
    let allocation = Arc::new(RecordingAllocation::new(vec![Ok(delhi()), Ok(delhi())]));
    let (system, _sink) = start(
        &DispatchConfig::default(),
        Arc::new(FixedLocation::new(PositionFix::at(28.6, 77.2))),
        allocation.clone(),
    );
    let session = system.session();

    system.orchestrator.submit_order().await.unwrap();
    assert_eq!(
        system.orchestrator.submit_order().await,
        Err(OrchestratorError::Busy(SubmissionState::Success))
    );

    session.reloaded().await;
    let outcome = system.orchestrator.submit_order().await.unwrap();
    assert!(outcome.is_allocated());
    assert_eq!(allocation.payloads().len(), 2);

    drop(session);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_markers_accumulate_by_default() {
    let allocation = Arc::new(RecordingAllocation::new(vec![
        Ok(delhi()),
        Ok(AllocationResult::allocated(
            "WH-Jaipur",
            Coord::new(26.9, 75.8),
            240.0,
            "5 hours",
        )),
    ]));
    let (system, _sink) = start(
        &config_with(RefreshStrategy::Off),
        Arc::new(FixedLocation::new(PositionFix::at(28.6, 77.2))),
        allocation,
    );

    system.orchestrator.submit_order().await.unwrap();
    system.orchestrator.submit_order().await.unwrap();

    let map = system.map_client.snapshot().await.unwrap();
    assert_eq!(map.markers.len(), 4);
    assert_eq!(map.routes.len(), 2);
    assert_eq!(map.latest_route().unwrap().to, Coord::new(26.9, 75.8));
    assert!(map.viewport.contains(Coord::new(26.9, 75.8)));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_clear_between_submissions() {
    let mut config = config_with(RefreshStrategy::Off);
    config.map.clear_between_submissions = true;
    let allocation = Arc::new(RecordingAllocation::new(vec![Ok(delhi()), Ok(delhi())]));
    let (system, _sink) = start(
        &config,
        Arc::new(FixedLocation::new(PositionFix::at(28.6, 77.2))),
        allocation,
    );

    system.orchestrator.submit_order().await.unwrap();
    system.orchestrator.submit_order().await.unwrap();

    let map = system.map_client.snapshot().await.unwrap();
    assert_eq!(map.markers.len(), 2);
    assert_eq!(map.routes.len(), 1);

    system.shutdown().await.unwrap();
}
