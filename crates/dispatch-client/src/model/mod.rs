//! # Data Model
//!
//! Plain data shared by the components: coordinates, the order payload, the allocation
//! wire format and the history summary. Nothing here talks to an actor or the network.

pub mod allocation;
pub mod geo;
pub mod history;
pub mod order;

pub use allocation::*;
pub use geo::*;
pub use history::*;
pub use order::*;
