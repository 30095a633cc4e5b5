use super::state::SubmissionState;
use crate::allocation::NetworkError;
use crate::history::RefreshOutcome;
use crate::location::LocationError;
use crate::map_view::MapError;
use crate::model::{Assignment, Bounds, OrderPayload};
use crate::status::{Banner, StatusError};
use thiserror::Error;

/// How one attempt ended. Both variants are normal results.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Allocated {
        payload: OrderPayload,
        assignment: Assignment,
        /// Region the viewport was fitted to.
        bounds: Bounds,
        /// `None` when no refresher is configured or the refresh failed.
        refresh: Option<RefreshOutcome>,
    },
    Failed(SubmissionFailure),
}

impl SubmissionOutcome {
    pub fn is_allocated(&self) -> bool {
        matches!(self, SubmissionOutcome::Allocated { .. })
    }
}

/// The four ways an attempt can fail. Each maps to exactly one banner.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmissionFailure {
    #[error("location capability unsupported")]
    UnsupportedCapability,

    #[error("position unavailable: {0}")]
    PositionUnavailable(String),

    /// The service decoded the order and refused it.
    #[error("rejected: {0}")]
    Business(String),

    #[error("network error: {0}")]
    Network(NetworkError),
}

impl SubmissionFailure {
    pub fn banner(&self) -> Banner {
        match self {
            SubmissionFailure::UnsupportedCapability => Banner::CapabilityUnsupported,
            SubmissionFailure::PositionUnavailable(_) => Banner::LocationUnavailable,
            SubmissionFailure::Business(reason) => Banner::Rejected(reason.clone()),
            SubmissionFailure::Network(e) => Banner::NetworkFailure(e.to_string()),
        }
    }
}

impl From<LocationError> for SubmissionFailure {
    fn from(e: LocationError) -> Self {
        match e {
            LocationError::UnsupportedCapability => SubmissionFailure::UnsupportedCapability,
            LocationError::PositionUnavailable(reason) => {
                SubmissionFailure::PositionUnavailable(reason)
            }
        }
    }
}

/// Failures outside the workflow itself.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrchestratorError {
    /// A submission is already in flight or waiting for its reload.
    #[error("submission rejected while {0}")]
    Busy(SubmissionState),

    #[error(transparent)]
    Map(#[from] MapError),

    #[error(transparent)]
    Status(#[from] StatusError),
}
