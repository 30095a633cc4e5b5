use super::{checked_fix, LocationError, LocationService, PositionFix};
use crate::model::Coord;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Asks a JSON endpoint for the current position.
///
/// Accepts `{"lat", "lon"}` bodies as well as the `latitude`/`longitude`/`lng` spellings
/// IP lookup services use. A body with `"status": "fail"` carries its reason in
/// `message`.
#[derive(Debug, Clone)]
pub struct HttpGeolocation {
    http: reqwest::Client,
    url: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct PositionBody {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default, alias = "latitude")]
    lat: Option<f64>,
    #[serde(default, alias = "lng", alias = "longitude")]
    lon: Option<f64>,
    #[serde(default)]
    accuracy: Option<f64>,
}

impl HttpGeolocation {
    pub fn new(http: reqwest::Client, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http,
            url: url.into(),
            timeout,
        }
    }
}

#[async_trait]
impl LocationService for HttpGeolocation {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn request_fix(&self) -> Result<PositionFix, LocationError> {
        let response = self
            .http
            .get(&self.url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Position lookup failed");
                LocationError::PositionUnavailable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LocationError::PositionUnavailable(format!(
                "position service responded with status {}",
                status.as_u16()
            )));
        }

        let body: PositionBody = response
            .json()
            .await
            .map_err(|e| LocationError::PositionUnavailable(e.to_string()))?;
        debug!(?body, "Position body");

        if body.status.as_deref() == Some("fail") {
            return Err(LocationError::PositionUnavailable(
                body.message.unwrap_or_else(|| "lookup failed".into()),
            ));
        }

        match (body.lat, body.lon) {
            (Some(lat), Some(lon)) => checked_fix(Coord::new(lat, lon), body.accuracy),
            _ => Err(LocationError::PositionUnavailable(
                "response carried no coordinates".into(),
            )),
        }
    }
}
