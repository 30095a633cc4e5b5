use crate::location::PositionFix;
use crate::model::Coord;
use serde::{Deserialize, Serialize};

/// Raw form values as typed by the user. Never validated here; the allocation
/// service owns validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFields {
    pub farmer_id: String,
    pub crop_type: String,
    pub quantity: String,
}

/// Body of the allocation request.
///
/// Built fresh for every submission from the fields and the fix acquired during that
/// same submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPayload {
    pub farmer_id: String,
    pub crop_type: String,
    pub quantity: String,
    pub lat: f64,
    pub lon: f64,
}

impl OrderPayload {
    pub fn new(fields: OrderFields, fix: &PositionFix) -> Self {
        Self {
            farmer_id: fields.farmer_id,
            crop_type: fields.crop_type,
            quantity: fields.quantity,
            lat: fix.coord.lat,
            lon: fix.coord.lon,
        }
    }

    /// Where the lot is collected.
    pub fn origin(&self) -> Coord {
        Coord::new(self.lat, self.lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_takes_position_from_fix() {
        let fields = OrderFields {
            farmer_id: "F1".into(),
            crop_type: "Wheat".into(),
            quantity: "10".into(),
        };
        let payload = OrderPayload::new(fields, &PositionFix::at(28.6, 77.2));

        assert_eq!(payload.origin(), Coord::new(28.6, 77.2));
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "farmer_id": "F1",
                "crop_type": "Wheat",
                "quantity": "10",
                "lat": 28.6,
                "lon": 77.2
            })
        );
    }
}
