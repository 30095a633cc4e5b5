use super::{checked_fix, LocationError, LocationService, PositionFix};
use async_trait::async_trait;
use tracing::debug;

/// Always reports the same position.
#[derive(Debug, Clone)]
pub struct FixedLocation {
    fix: PositionFix,
}

impl FixedLocation {
    pub fn new(fix: PositionFix) -> Self {
        Self { fix }
    }
}

#[async_trait]
impl LocationService for FixedLocation {
    async fn request_fix(&self) -> Result<PositionFix, LocationError> {
        debug!(lat = self.fix.coord.lat, lon = self.fix.coord.lon, "Fixed position");
        checked_fix(self.fix.coord, self.fix.accuracy_m)
    }
}

/// A host without any location capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocation;

#[async_trait]
impl LocationService for NoLocation {
    async fn request_fix(&self) -> Result<PositionFix, LocationError> {
        Err(LocationError::UnsupportedCapability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_location_rejects_out_of_range() {
        let service = FixedLocation::new(PositionFix::at(120.0, 0.0));
        assert!(matches!(
            service.request_fix().await,
            Err(LocationError::PositionUnavailable(_))
        ));
    }
}
