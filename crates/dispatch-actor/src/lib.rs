//! # Dispatch Actor
//!
//! Building blocks for page components that own mutable state: the map viewport, the
//! status banner. Each component lives in its own tokio task behind a channel, and every
//! caller goes through a cloneable client. Requests are processed one at a time, so a
//! component never needs a lock and concurrent writers are ordered by arrival.
//!
//! ## Layers
//!
//! 1. **Entity** ([`ActorEntity`]) - the component state and its operations
//! 2. **Runtime** ([`ComponentActor`]) - request loop and hook dispatch
//! 3. **Interface** ([`ComponentClient`], [`ActorClient`]) - typed async calls
//!
//! ## Example
//!
//! ```rust
//! use dispatch_actor::{ActorEntity, ComponentActor};
//! use async_trait::async_trait;
//!
//! #[derive(Debug, Default)]
//! struct Markers { placed: Vec<(f64, f64)> }
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("marker error")]
//! struct MarkerError;
//!
//! #[async_trait]
//! impl ActorEntity for Markers {
//!     type Action = (f64, f64);
//!     type ActionResult = usize;
//!     type Snapshot = usize;
//!     type Context = ();
//!     type Error = MarkerError;
//!
//!     fn snapshot(&self) -> usize { self.placed.len() }
//!
//!     async fn handle_action(&mut self, at: (f64, f64), _: &()) -> Result<usize, MarkerError> {
//!         self.placed.push(at);
//!         Ok(self.placed.len())
//!     }
//!
//!     async fn on_reset(&mut self, _: &()) -> Result<(), MarkerError> {
//!         self.placed.clear();
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ComponentActor::new(Markers::default(), 8);
//!     tokio::spawn(actor.run(()));
//!
//!     client.perform_action((28.6, 77.2)).await.unwrap();
//!     assert_eq!(client.snapshot().await.unwrap(), 1);
//!     client.reset().await.unwrap();
//!     assert_eq!(client.snapshot().await.unwrap(), 0);
//! }
//! ```
//!
//! ## Testing
//!
//! The [`mock`] module answers client requests from queued expectations, for testing
//! code around a component without running it.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

pub use actor::ComponentActor;
pub use client::ComponentClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ComponentRequest, Response};
