//! # Component Actor
//!
//! This module defines the `ComponentActor`, the server half of a component. It owns
//! the component state and processes requests sequentially, which gives every piece of
//! shared page state a single writer.

use crate::client::ComponentClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ComponentRequest;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// The actor that owns one [`ActorEntity`] value.
///
/// # Concurrency Model
/// Any number of [`ComponentClient`] clones may send requests concurrently; the actor
/// handles them one at a time in arrival order. Two callers racing to write the status
/// banner are therefore serialized, and the later write wins.
///
/// # Usage Pattern
///
/// 1.  **Create**: `ComponentActor::new(entity, buffer)` returns the actor and a client.
/// 2.  **Wire**: pass the entity's dependencies to `actor.run(context)`.
/// 3.  **Run**: spawn the run loop on the tokio runtime.
///
/// ```rust,ignore
/// let (actor, client) = ComponentActor::new(MapView::new(&config), 32);
/// tokio::spawn(actor.run(()));
/// let snapshot = client.snapshot().await?;
/// ```
pub struct ComponentActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ComponentRequest<T>>,
    entity: T,
}

impl<T: ActorEntity> ComponentActor<T> {
    /// Creates a new actor around `entity` and its associated client.
    ///
    /// `buffer_size` is the capacity of the request channel; when it is full, client
    /// calls wait for space.
    pub fn new(entity: T, buffer_size: usize) -> (Self, ComponentClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self { receiver, entity };
        (actor, ComponentClient::new(sender))
    }

    /// Runs the request loop until every client has been dropped.
    pub async fn run(mut self, context: T::Context) {
        let component = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");

        if let Err(e) = self.entity.on_start(&context).await {
            error!(component, error = %e, "on_start failed");
            return;
        }
        info!(component, "Actor started");

        let mut handled: u64 = 0;
        while let Some(msg) = self.receiver.recv().await {
            handled += 1;
            match msg {
                ComponentRequest::Snapshot { respond_to } => {
                    debug!(component, "Snapshot");
                    let _ = respond_to.send(Ok(self.entity.snapshot()));
                }
                ComponentRequest::Action { action, respond_to } => {
                    debug!(component, ?action, "Action");
                    let result = self
                        .entity
                        .handle_action(action, &context)
                        .await
                        .map_err(FrameworkError::entity);
                    match &result {
                        Ok(_) => debug!(component, "Action ok"),
                        Err(e) => warn!(component, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ComponentRequest::Reset { respond_to } => {
                    let result = self
                        .entity
                        .on_reset(&context)
                        .await
                        .map_err(FrameworkError::entity);
                    match &result {
                        Ok(()) => info!(component, "Reset"),
                        Err(e) => warn!(component, error = %e, "Reset failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        self.entity.on_stop(&context).await;
        info!(component, handled, "Shutdown");
    }
}
