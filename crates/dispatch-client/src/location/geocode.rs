use super::{checked_fix, coordinate_value, LocationError, LocationService, PositionFix};
use crate::model::Coord;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, instrument};

/// Resolves a typed address to a fix through the geocode endpoint
/// (`GET <url>?address=...`).
#[derive(Debug, Clone)]
pub struct GeocodedLocation {
    http: reqwest::Client,
    url: String,
    address: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct GeocodeBody {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    lat: Option<serde_json::Value>,
    #[serde(default)]
    lon: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<String>,
}

impl GeocodedLocation {
    pub fn new(
        http: reqwest::Client,
        url: impl Into<String>,
        address: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            http,
            url: url.into(),
            address: address.into(),
            timeout,
        }
    }
}

#[async_trait]
impl LocationService for GeocodedLocation {
    #[instrument(skip(self), fields(address = %self.address))]
    async fn request_fix(&self) -> Result<PositionFix, LocationError> {
        if self.address.trim().is_empty() {
            return Err(LocationError::PositionUnavailable(
                "No address provided".into(),
            ));
        }

        let response = self
            .http
            .get(&self.url)
            .query(&[("address", self.address.as_str())])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| LocationError::PositionUnavailable(e.to_string()))?;

        // 404 and 500 still carry a JSON error body
        let body: GeocodeBody = response
            .json()
            .await
            .map_err(|e| LocationError::PositionUnavailable(e.to_string()))?;

        if !body.success {
            return Err(LocationError::PositionUnavailable(
                body.error.unwrap_or_else(|| "Address not found".into()),
            ));
        }

        let lat = body.lat.as_ref().and_then(coordinate_value);
        let lon = body.lon.as_ref().and_then(coordinate_value);
        match (lat, lon) {
            (Some(lat), Some(lon)) => {
                info!(lat, lon, "Address resolved");
                checked_fix(Coord::new(lat, lon), None)
            }
            _ => Err(LocationError::PositionUnavailable(
                "geocoder returned no coordinates".into(),
            )),
        }
    }
}
