//! Operations the [`MapView`](super::MapView) component accepts.

use super::layers::{LayerId, MarkerStyle, Popup};
use super::viewport::Viewport;
use crate::model::{Bounds, Coord};

#[derive(Debug, Clone)]
pub enum MapAction {
    /// Adds one marker.
    PlaceMarker {
        coord: Coord,
        style: MarkerStyle,
        popup: Popup,
    },
    /// Adds an origin marker, a destination marker and the line between them.
    DrawRoute {
        origin: Coord,
        destination: Coord,
        destination_label: String,
    },
    /// Moves the viewport so the region is visible.
    FitBounds(Bounds),
    /// Removes every overlay. The viewport stays where it is.
    Clear,
}

/// Results from MapActions - variants match 1:1 with MapAction
#[derive(Debug, Clone, PartialEq)]
pub enum MapActionResult {
    MarkerPlaced(LayerId),
    RouteDrawn {
        origin_marker: LayerId,
        destination_marker: LayerId,
        line: LayerId,
        /// Bounding region of both endpoints.
        bounds: Bounds,
    },
    ViewportChanged(Viewport),
    /// Number of overlays removed.
    Cleared(usize),
}
