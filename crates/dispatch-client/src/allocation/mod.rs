//! # Allocation Client
//!
//! Sends an [`OrderPayload`] to the allocation service and decodes its answer.
//!
//! A business rejection (`success: false`) is a normal `Ok` result; only transport
//! problems come back as [`NetworkError`]. Callers inspect
//! [`AllocationResult::into_outcome`] to tell the two successful shapes apart.

pub mod http;

pub use http::HttpAllocationClient;

use crate::model::{AllocationResult, OrderPayload};
use async_trait::async_trait;
use thiserror::Error;

/// Transport-level failure talking to the allocation service.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum NetworkError {
    #[error("{0}")]
    Transport(String),

    #[error("request timed out")]
    Timeout,

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for NetworkError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            NetworkError::Timeout
        } else if e.is_decode() {
            NetworkError::Malformed(e.to_string())
        } else {
            NetworkError::Transport(e.to_string())
        }
    }
}

#[async_trait]
pub trait AllocationClient: Send + Sync {
    /// Submits one order. Never retries.
    async fn submit(&self, payload: &OrderPayload) -> Result<AllocationResult, NetworkError>;
}
