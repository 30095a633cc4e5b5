//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract a piece of page state (the map, the status
//! banner, ...) implements to be owned by a [`ComponentActor`](crate::ComponentActor).
//! The actor holds exactly one value of the entity and feeds it every request, one at a
//! time, so the entity itself never needs a lock.
//!
//! # Associated Types
//! - `Action` / `ActionResult`: the component's own operations and their replies.
//! - `Snapshot`: a read-only copy of the state handed out to observers.
//! - `Context`: dependencies injected when the actor starts (use `()` for none).
//! - `Error`: one error enum for the whole component.
//!
//! # Provided Methods (Hooks)
//! [`ActorEntity::on_start`] and [`ActorEntity::on_stop`] default to doing nothing.

use async_trait::async_trait;
use std::fmt::Debug;

/// State owned by a single [`ComponentActor`](crate::ComponentActor).
///
/// # Async & Context
/// The trait is `#[async_trait]` so hooks may await other services. The `Context` is
/// passed to `run()` rather than `new()`, which lets a component depend on collaborators
/// created after the actor itself.
#[async_trait]
pub trait ActorEntity: Debug + Send + Sync + 'static {
    /// Enum of component-specific operations (e.g. `DrawRoute`).
    type Action: Send + Debug;

    /// Reply produced by [`ActorEntity::handle_action`].
    type ActionResult: Send + Debug;

    /// Read-only view of the state returned by snapshot requests.
    type Snapshot: Send + Debug;

    /// Runtime dependencies injected into every hook.
    type Context: Send + Sync;

    /// Per-component error type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Copies out the observable state.
    fn snapshot(&self) -> Self::Snapshot;

    /// Called once before the first request is processed.
    async fn on_start(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handles a component-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;

    /// Returns the component to its initial state (a page reload).
    async fn on_reset(&mut self, ctx: &Self::Context) -> Result<(), Self::Error>;

    /// Called after the request channel closes.
    async fn on_stop(&self, _ctx: &Self::Context) {}
}
