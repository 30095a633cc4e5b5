//! Typed wrappers around the component actors' generic clients.

pub mod map_client;
pub mod status_client;

pub use map_client::{DrawnRoute, MapClient};
pub use status_client::StatusClient;
