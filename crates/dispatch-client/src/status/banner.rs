use std::fmt::Display;

/// Severity of a banner, mapped to the alert style by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerLevel {
    Info,
    Success,
    Error,
}

/// The one status message shown at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum Banner {
    Acquiring,
    CapabilityUnsupported,
    LocationUnavailable,
    Allocated {
        warehouse_name: String,
        dist_km: Option<f64>,
        eta: Option<String>,
    },
    /// Business rejection text from the allocation service.
    Rejected(String),
    NetworkFailure(String),
}

impl Banner {
    pub fn level(&self) -> BannerLevel {
        match self {
            Banner::Acquiring => BannerLevel::Info,
            Banner::Allocated { .. } => BannerLevel::Success,
            Banner::CapabilityUnsupported
            | Banner::LocationUnavailable
            | Banner::Rejected(_)
            | Banner::NetworkFailure(_) => BannerLevel::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.level() == BannerLevel::Error
    }
}

impl Display for Banner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Banner::Acquiring => write!(f, "Acquiring location & computing route..."),
            Banner::CapabilityUnsupported => {
                write!(f, "Geolocation is not supported by this device.")
            }
            Banner::LocationUnavailable => {
                write!(f, "Unable to retrieve location. Allow location access.")
            }
            Banner::Allocated {
                warehouse_name,
                dist_km,
                eta,
            } => {
                writeln!(f, "Allocated to: {warehouse_name}")?;
                match dist_km {
                    Some(km) => writeln!(f, "Distance: {km} km")?,
                    None => writeln!(f, "Distance: unknown")?,
                }
                write!(f, "ETA: {}", eta.as_deref().unwrap_or("unknown"))
            }
            Banner::Rejected(reason) => write!(f, "Error: {reason}"),
            Banner::NetworkFailure(reason) => write!(f, "Network Error: {reason}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocated_banner_text() {
        let banner = Banner::Allocated {
            warehouse_name: "WH-Delhi".into(),
            dist_km: Some(12.3),
            eta: Some("30 min".into()),
        };
        assert_eq!(
            banner.to_string(),
            "Allocated to: WH-Delhi\nDistance: 12.3 km\nETA: 30 min"
        );
        assert_eq!(banner.level(), BannerLevel::Success);
    }

    #[test]
    fn test_allocated_banner_without_distance() {
        let banner = Banner::Allocated {
            warehouse_name: "Central".into(),
            dist_km: None,
            eta: Some("45 mins".into()),
        };
        assert!(banner.to_string().contains("Distance: unknown"));
    }

    #[test]
    fn test_error_banners() {
        assert_eq!(
            Banner::Rejected("No warehouse available".into()).to_string(),
            "Error: No warehouse available"
        );
        assert_eq!(
            Banner::NetworkFailure("request timed out".into()).to_string(),
            "Network Error: request timed out"
        );
        assert!(Banner::LocationUnavailable.is_error());
        assert!(!Banner::Acquiring.is_error());
    }
}
