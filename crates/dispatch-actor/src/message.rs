//! # Component Messages
//!
//! Message types exchanged between a [`ComponentClient`](crate::ComponentClient) and
//! its [`ComponentActor`](crate::ComponentActor).

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Request sent to a component actor.
///
/// A component owns a single piece of state, so there is no identifier to route on:
/// callers either read it (`Snapshot`), change it (`Action`), or return it to its
/// initial value (`Reset`).
#[derive(Debug)]
pub enum ComponentRequest<T: ActorEntity> {
    Snapshot {
        respond_to: Response<T::Snapshot>,
    },
    Action {
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    Reset {
        respond_to: Response<()>,
    },
}
