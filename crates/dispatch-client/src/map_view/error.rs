//! Error types for the MapView component.

use crate::model::Coord;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum MapError {
    /// Non-finite or out-of-range coordinates.
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(Coord),

    /// The component answered an action with the result of a different one.
    #[error("Unexpected reply to {0}")]
    UnexpectedReply(&'static str),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for MapError {
    fn from(msg: String) -> Self {
        MapError::ActorCommunicationError(msg)
    }
}
