//! # StatusPresenter Component
//!
//! A single status banner, replaced on every write. The presenter runs as an actor so
//! concurrent writers are ordered and the last one wins; each change is pushed to the
//! host's [`BannerSink`].

pub mod banner;
pub mod entity;
pub mod error;
pub mod sink;

pub use banner::*;
pub use entity::*;
pub use error::*;
pub use sink::*;

use crate::clients::StatusClient;
use dispatch_actor::ComponentActor;

/// Creates a StatusPresenter actor and its client. The sink is supplied to `run`.
pub fn new() -> (ComponentActor<StatusPresenter>, StatusClient) {
    let (actor, generic_client) = ComponentActor::new(StatusPresenter::new(), 32);
    (actor, StatusClient::new(generic_client))
}
