//! # Mocks & Testing Guide
//!
//! `MockClient<T>` hands out a real [`ComponentClient<T>`] whose requests are answered
//! from a queue of expectations instead of a running entity. Use it to test code that
//! *talks to* a component (client wrappers, orchestration) without spawning the real
//! component.
//!
//! | | MockClient | Real actor |
//! |---|---|---|
//! | **State** | none, canned replies | real state changes |
//! | **Error injection** | `return_err` | needs the failing state |
//! | **Use case** | logic around the client | the component itself, full flows |
//!
//! For step-by-step control over a single request, [`create_mock_client`] returns the
//! raw receiver and the `expect_*` helpers pull the next request off it so the test can
//! inspect its payload and answer it by hand.
//!
//! ```rust
//! use dispatch_actor::mock::MockClient;
//! use dispatch_actor::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Debug)] struct Counter { value: u32 }
//! #[derive(Debug, thiserror::Error)] #[error("counter error")] struct CounterError;
//!
//! #[async_trait]
//! impl ActorEntity for Counter {
//!     type Action = u32; type ActionResult = u32; type Snapshot = u32;
//!     type Context = (); type Error = CounterError;
//!     fn snapshot(&self) -> u32 { self.value }
//!     async fn handle_action(&mut self, by: u32, _: &()) -> Result<u32, CounterError> {
//!         self.value += by;
//!         Ok(self.value)
//!     }
//!     async fn on_reset(&mut self, _: &()) -> Result<(), CounterError> { self.value = 0; Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Counter>::new();
//!     mock.expect_snapshot().return_ok(7);
//!     mock.expect_action().return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert_eq!(client.snapshot().await.unwrap(), 7);
//!     assert!(matches!(client.perform_action(1).await, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```

use crate::client::ComponentClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ComponentRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

/// Expected request and the reply to send back.
enum Expectation<T: ActorEntity> {
    Snapshot {
        response: Result<T::Snapshot, FrameworkError>,
    },
    Action {
        response: Result<T::ActionResult, FrameworkError>,
    },
    Reset {
        response: Result<(), FrameworkError>,
    },
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock component with ordered expectations.
///
/// Requests must arrive in the order the expectations were queued; a mismatch panics the
/// background task, which surfaces in the test as `ActorDropped`.
pub struct MockClient<T: ActorEntity> {
    client: ComponentClient<T>,
    expectations: Expectations<T>,
    received: Arc<Mutex<Vec<T::Action>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T>
where
    T::Action: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T>
where
    T::Action: Clone,
{
    /// Creates a mock with no expectations. Must be called inside a tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ComponentRequest<T>>(100);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let received = Arc::new(Mutex::new(Vec::new()));
        let expectations_clone = expectations.clone();
        let received_clone = received.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone.lock().unwrap().pop_front();

                match (request, expectation) {
                    (
                        ComponentRequest::Snapshot { respond_to },
                        Some(Expectation::Snapshot { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ComponentRequest::Action { action, respond_to },
                        Some(Expectation::Action { response }),
                    ) => {
                        received_clone.lock().unwrap().push(action);
                        let _ = respond_to.send(response);
                    }
                    (
                        ComponentRequest::Reset { respond_to },
                        Some(Expectation::Reset { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    _ => panic!("Unexpected request or expectation mismatch"),
                }
            }
        });

        Self {
            client: ComponentClient::new(sender),
            expectations,
            received,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> ComponentClient<T> {
        self.client.clone()
    }

    /// Expects a `snapshot` request.
    pub fn expect_snapshot(&mut self) -> SnapshotExpectationBuilder<T> {
        SnapshotExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects an `action` request.
    pub fn expect_action(&mut self) -> ActionExpectationBuilder<T> {
        ActionExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `reset` request.
    pub fn expect_reset(&mut self) -> ResetExpectationBuilder<T> {
        ResetExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Actions received so far, in arrival order.
    pub fn received_actions(&self) -> Vec<T::Action> {
        self.received.lock().unwrap().clone()
    }

    /// Panics unless every expectation was consumed.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

/// Builder for `snapshot` expectations.
pub struct SnapshotExpectationBuilder<T: ActorEntity> {
    expectations: Expectations<T>,
}

impl<T: ActorEntity> SnapshotExpectationBuilder<T> {
    pub fn return_ok(self, snapshot: T::Snapshot) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Snapshot { response: Ok(snapshot) });
    }

    pub fn return_err(self, error: FrameworkError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Snapshot { response: Err(error) });
    }
}

/// Builder for `action` expectations.
pub struct ActionExpectationBuilder<T: ActorEntity> {
    expectations: Expectations<T>,
}

impl<T: ActorEntity> ActionExpectationBuilder<T> {
    pub fn return_ok(self, result: T::ActionResult) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Action { response: Ok(result) });
    }

    pub fn return_err(self, error: FrameworkError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Action { response: Err(error) });
    }
}

/// Builder for `reset` expectations.
pub struct ResetExpectationBuilder<T: ActorEntity> {
    expectations: Expectations<T>,
}

impl<T: ActorEntity> ResetExpectationBuilder<T> {
    pub fn return_ok(self) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Reset { response: Ok(()) });
    }

    pub fn return_err(self, error: FrameworkError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Reset { response: Err(error) });
    }
}

// =============================================================================
// LOW-LEVEL HELPERS
// =============================================================================

/// Creates a client whose requests land on a receiver owned by the test.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ComponentClient<T>, mpsc::Receiver<ComponentRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ComponentClient::new(sender), receiver)
}

/// Pulls the next request and returns it if it is an Action.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ComponentRequest<T>>,
) -> Option<(
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ComponentRequest::Action { action, respond_to }) => Some((action, respond_to)),
        _ => None,
    }
}

/// Pulls the next request and returns its responder if it is a Snapshot.
pub async fn expect_snapshot<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ComponentRequest<T>>,
) -> Option<oneshot::Sender<Result<T::Snapshot, FrameworkError>>> {
    match receiver.recv().await {
        Some(ComponentRequest::Snapshot { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Pulls the next request and returns its responder if it is a Reset.
pub async fn expect_reset<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ComponentRequest<T>>,
) -> Option<oneshot::Sender<Result<(), FrameworkError>>> {
    match receiver.recv().await {
        Some(ComponentRequest::Reset { respond_to }) => Some(respond_to),
        _ => None,
    }
}
