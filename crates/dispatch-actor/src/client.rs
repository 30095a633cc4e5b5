//! # Component Client
//!
//! The generic handle used to talk to a [`ComponentActor`](crate::ComponentActor).

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ComponentRequest;
use tokio::sync::{mpsc, oneshot};

/// A cloneable, type-safe handle to a component actor.
///
/// Holds only the channel sender; the actor shuts down once every clone is dropped.
pub struct ComponentClient<T: ActorEntity> {
    sender: mpsc::Sender<ComponentRequest<T>>,
}

impl<T: ActorEntity> Clone for ComponentClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: ActorEntity> std::fmt::Debug for ComponentClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentClient")
            .field("closed", &self.sender.is_closed())
            .finish()
    }
}

impl<T: ActorEntity> ComponentClient<T> {
    pub fn new(sender: mpsc::Sender<ComponentRequest<T>>) -> Self {
        Self { sender }
    }

    /// Reads the current state.
    pub async fn snapshot(&self) -> Result<T::Snapshot, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ComponentRequest::Snapshot { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Runs a component-specific action.
    pub async fn perform_action(&self, action: T::Action) -> Result<T::ActionResult, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ComponentRequest::Action { action, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Returns the component to its initial state.
    pub async fn reset(&self) -> Result<(), FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ComponentRequest::Reset { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// True once the actor has stopped receiving.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}
