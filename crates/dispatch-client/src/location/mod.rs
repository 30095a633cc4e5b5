//! # Location Service
//!
//! One-shot access to the device position. Every submission attempt asks for exactly one
//! fix through [`LocationService::request_fix`]; nothing here tracks position
//! continuously or caches an earlier fix.
//!
//! ## Implementations
//!
//! - [`FixedLocation`] - a configured position, for kiosks and tests
//! - [`NoLocation`] - the device has no location capability
//! - [`HttpGeolocation`] - asks a JSON position endpoint
//! - [`GeocodedLocation`] - resolves a typed address through the geocode endpoint

pub mod fixed;
pub mod geocode;
pub mod http;

pub use fixed::{FixedLocation, NoLocation};
pub use geocode::GeocodedLocation;
pub use http::HttpGeolocation;

use crate::config::LocationConfig;
use crate::model::Coord;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Why a fix could not be produced.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LocationError {
    /// The device or host has no location capability at all.
    #[error("Location capability not supported")]
    UnsupportedCapability,

    /// Permission was denied or no fix could be obtained.
    #[error("Position unavailable: {0}")]
    PositionUnavailable(String),
}

/// A single position reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionFix {
    pub coord: Coord,
    pub accuracy_m: Option<f64>,
}

impl PositionFix {
    pub fn new(coord: Coord) -> Self {
        Self {
            coord,
            accuracy_m: None,
        }
    }

    pub fn at(lat: f64, lon: f64) -> Self {
        Self::new(Coord::new(lat, lon))
    }
}

/// Source of position fixes.
#[async_trait]
pub trait LocationService: Send + Sync {
    /// Requests one current position. May prompt the user for permission.
    async fn request_fix(&self) -> Result<PositionFix, LocationError>;
}

/// Builds the configured location source.
pub fn from_config(config: &LocationConfig, http: reqwest::Client) -> Arc<dyn LocationService> {
    match config {
        LocationConfig::Fixed { lat, lon, accuracy_m } => Arc::new(FixedLocation::new(PositionFix {
            coord: Coord::new(*lat, *lon),
            accuracy_m: *accuracy_m,
        })),
        LocationConfig::Http { url, timeout_ms } => Arc::new(HttpGeolocation::new(
            http,
            url.clone(),
            Duration::from_millis(*timeout_ms),
        )),
        LocationConfig::Geocode {
            url,
            address,
            timeout_ms,
        } => Arc::new(GeocodedLocation::new(
            http,
            url.clone(),
            address.clone(),
            Duration::from_millis(*timeout_ms),
        )),
        LocationConfig::Unsupported => Arc::new(NoLocation),
    }
}

/// Reads a coordinate that may be sent as a JSON number or a numeric string.
pub(crate) fn coordinate_value(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Rejects fixes that cannot be placed on a map.
pub(crate) fn checked_fix(coord: Coord, accuracy_m: Option<f64>) -> Result<PositionFix, LocationError> {
    if coord.is_valid() {
        Ok(PositionFix { coord, accuracy_m })
    } else {
        Err(LocationError::PositionUnavailable(format!(
            "invalid coordinates {coord}"
        )))
    }
}
