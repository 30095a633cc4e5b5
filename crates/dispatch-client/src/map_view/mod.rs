//! # MapView Component
//!
//! The interactive map as an actor-owned component: tile layer, viewport, markers and
//! route lines. Rendering is the host's business; this module only keeps the model the
//! renderer draws from.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](dispatch_actor::ActorEntity) implementation for [`MapView`]
//! - [`actions`] - [`MapAction`] and [`MapActionResult`]
//! - [`layers`] - markers, popups, route lines, tiles
//! - [`viewport`] - Web-Mercator projection and fit-to-bounds
//! - [`error`] - [`MapError`]
//!
//! ## Usage
//!
//! ```rust
//! use dispatch_client::clients::MapClient;
//! use dispatch_client::config::MapConfig;
//! use dispatch_client::map_view;
//! use dispatch_client::model::Coord;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = map_view::new(&MapConfig::default());
//!     tokio::spawn(actor.run(()));
//!
//!     let route = client
//!         .draw_route(Coord::new(28.6, 77.2), Coord::new(28.7, 77.1), "WH-Delhi")
//!         .await?;
//!     let viewport = client.fit_bounds(route.bounds).await?;
//!     assert!(viewport.contains(Coord::new(28.7, 77.1)));
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;
pub mod layers;
pub mod viewport;

pub use actions::*;
pub use entity::{MapSnapshot, MapView};
pub use error::*;
pub use layers::*;
pub use viewport::{Canvas, Viewport};

use crate::clients::MapClient;
use crate::config::MapConfig;
use dispatch_actor::ComponentActor;

/// Creates a MapView actor and its client.
pub fn new(config: &MapConfig) -> (ComponentActor<MapView>, MapClient) {
    let (actor, generic_client) = ComponentActor::new(MapView::new(config), 32);
    (actor, MapClient::new(generic_client))
}
