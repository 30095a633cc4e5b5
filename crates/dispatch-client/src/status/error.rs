use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StatusError {
    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for StatusError {
    fn from(msg: String) -> Self {
        StatusError::ActorCommunicationError(msg)
    }
}
