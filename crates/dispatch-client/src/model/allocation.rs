use crate::allocation::NetworkError;
use crate::model::Coord;
use serde::{Deserialize, Serialize};

/// Decoded allocation response.
///
/// Every field is optional on the wire. A missing `success` reads as `false`, so a body
/// like `{"error": "Quantity must be positive"}` is a rejection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllocationResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default, alias = "warehouse")]
    pub warehouse_name: Option<String>,
    #[serde(default)]
    pub wh_lat: Option<f64>,
    #[serde(default, alias = "wh_lng")]
    pub wh_lon: Option<f64>,
    #[serde(default)]
    pub dist: Option<f64>,
    #[serde(default)]
    pub eta: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A warehouse assignment extracted from a successful result.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub warehouse_name: String,
    pub destination: Coord,
    pub dist_km: Option<f64>,
    pub eta: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AllocationOutcome {
    Allocated(Assignment),
    Rejected(String),
}

impl AllocationResult {
    pub fn allocated(
        warehouse_name: impl Into<String>,
        destination: Coord,
        dist_km: f64,
        eta: impl Into<String>,
    ) -> Self {
        Self {
            success: true,
            warehouse_name: Some(warehouse_name.into()),
            wh_lat: Some(destination.lat),
            wh_lon: Some(destination.lon),
            dist: Some(dist_km),
            eta: Some(eta.into()),
            ..Default::default()
        }
    }

    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Default::default()
        }
    }

    /// Splits the result into an assignment or a rejection reason.
    ///
    /// A `success: true` body without a warehouse name or with unusable coordinates
    /// cannot be drawn and is reported as malformed.
    pub fn into_outcome(self) -> Result<AllocationOutcome, NetworkError> {
        if !self.success {
            let reason = self
                .error
                .or(self.message)
                .unwrap_or_else(|| "Unknown error".to_string());
            return Ok(AllocationOutcome::Rejected(reason));
        }

        let warehouse_name = self
            .warehouse_name
            .ok_or_else(|| NetworkError::Malformed("missing warehouse name".into()))?;
        let destination = match (self.wh_lat, self.wh_lon) {
            (Some(lat), Some(lon)) => Coord::new(lat, lon),
            _ => {
                return Err(NetworkError::Malformed(
                    "missing warehouse coordinates".into(),
                ))
            }
        };
        if !destination.is_valid() {
            return Err(NetworkError::Malformed(format!(
                "invalid warehouse coordinates {destination}"
            )));
        }

        Ok(AllocationOutcome::Allocated(Assignment {
            warehouse_name,
            destination,
            dist_km: self.dist,
            eta: self.eta,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_documented_fields() {
        let result: AllocationResult = serde_json::from_str(
            r#"{"success":true,"warehouse_name":"WH-Delhi","wh_lat":28.7,"wh_lon":77.1,"dist":12.3,"eta":"30 min"}"#,
        )
        .unwrap();

        let outcome = result.into_outcome().unwrap();
        assert_eq!(
            outcome,
            AllocationOutcome::Allocated(Assignment {
                warehouse_name: "WH-Delhi".into(),
                destination: Coord::new(28.7, 77.1),
                dist_km: Some(12.3),
                eta: Some("30 min".into()),
            })
        );
    }

    #[test]
    fn test_accepts_legacy_field_names() {
        let result: AllocationResult = serde_json::from_str(
            r#"{"success":true,"message":"Allocated by Proximity","warehouse":"Central","wh_lat":19.0,"wh_lng":72.8,"eta":"45 mins"}"#,
        )
        .unwrap();

        assert_eq!(result.warehouse_name.as_deref(), Some("Central"));
        assert_eq!(result.wh_lon, Some(72.8));
        assert_eq!(result.dist, None);
    }

    #[test]
    fn test_rejection_reason() {
        let outcome = AllocationResult::rejected("No warehouse available")
            .into_outcome()
            .unwrap();
        assert_eq!(
            outcome,
            AllocationOutcome::Rejected("No warehouse available".into())
        );

        // No success flag at all
        let bare: AllocationResult =
            serde_json::from_str(r#"{"error":"Quantity must be positive"}"#).unwrap();
        assert_eq!(
            bare.into_outcome().unwrap(),
            AllocationOutcome::Rejected("Quantity must be positive".into())
        );

        assert_eq!(
            AllocationResult::default().into_outcome().unwrap(),
            AllocationOutcome::Rejected("Unknown error".into())
        );
    }

    #[test]
    fn test_success_without_destination_is_malformed() {
        let result = AllocationResult {
            success: true,
            warehouse_name: Some("WH".into()),
            ..Default::default()
        };
        assert!(matches!(
            result.into_outcome(),
            Err(NetworkError::Malformed(_))
        ));
    }
}
