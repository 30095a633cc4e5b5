//! Overlay and base layer descriptions held by the map.

use crate::model::Coord;

pub type LayerId = u64;

/// Icon URL used for destination markers.
pub const DESTINATION_ICON_URL: &str =
    "https://raw.githubusercontent.com/pointhi/leaflet-color-markers/master/img/marker-icon-2x-green.png";
pub const MARKER_SHADOW_URL: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/leaflet/0.7.7/images/marker-shadow.png";

/// Semantic role of a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerStyle {
    /// Where the lot is collected. Default icon.
    Origin,
    /// The assigned warehouse. Green icon.
    Destination,
}

impl MarkerStyle {
    /// `None` means the renderer's default icon.
    pub fn icon_url(&self) -> Option<&'static str> {
        match self {
            MarkerStyle::Origin => None,
            MarkerStyle::Destination => Some(DESTINATION_ICON_URL),
        }
    }

    /// Shadow drawn under a custom icon; the default icon carries its own.
    pub fn shadow_url(&self) -> Option<&'static str> {
        match self {
            MarkerStyle::Origin => None,
            MarkerStyle::Destination => Some(MARKER_SHADOW_URL),
        }
    }
}

/// Label attached to a marker, shown on interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub title: String,
    pub detail: String,
    pub open: bool,
}

impl Popup {
    pub fn new(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            detail: detail.into(),
            open: false,
        }
    }

    /// Popup shown immediately after the marker is placed.
    pub fn opened(mut self) -> Self {
        self.open = true;
        self
    }

    pub fn text(&self) -> String {
        format!("{}\n{}", self.title, self.detail)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: LayerId,
    pub coord: Coord,
    pub style: MarkerStyle,
    pub popup: Popup,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    pub color: String,
    pub weight: u32,
    pub opacity: f64,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: "green".to_string(),
            weight: 4,
            opacity: 0.7,
        }
    }
}

/// A straight line from origin to destination.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteLine {
    pub id: LayerId,
    pub from: Coord,
    pub to: Coord,
    pub style: LineStyle,
}

/// Base tile layer; rendering belongs to the host.
#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    pub url_template: String,
    pub attribution: String,
}
