//! [`ActorEntity`] implementation for [`MapView`].
//!
//! The map keeps everything drawn during the page session. Overlays accumulate across
//! actions until `Clear` or a reset; a reset also restores the initial viewport.

use super::actions::{MapAction, MapActionResult};
use super::error::MapError;
use super::layers::{LayerId, LineStyle, Marker, MarkerStyle, Popup, RouteLine, TileLayer};
use super::viewport::{Canvas, Viewport};
use crate::config::MapConfig;
use crate::model::{Bounds, Coord};
use async_trait::async_trait;
use dispatch_actor::ActorEntity;
use tracing::{debug, info};

pub const ORIGIN_POPUP_TITLE: &str = "Collection Point";
pub const ORIGIN_POPUP_DETAIL: &str = "Trader Location";
pub const DESTINATION_POPUP_DETAIL: &str = "Destination";

/// Map state for one page session.
#[derive(Debug)]
pub struct MapView {
    tiles: TileLayer,
    canvas: Canvas,
    min_zoom: u8,
    max_zoom: u8,
    initial: Viewport,
    viewport: Viewport,
    markers: Vec<Marker>,
    routes: Vec<RouteLine>,
    next_layer_id: LayerId,
}

/// Read-only copy of the map state.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSnapshot {
    pub tiles: TileLayer,
    pub viewport: Viewport,
    pub markers: Vec<Marker>,
    pub routes: Vec<RouteLine>,
}

impl MapSnapshot {
    /// The most recently drawn route.
    pub fn latest_route(&self) -> Option<&RouteLine> {
        self.routes.last()
    }

    pub fn markers_with_style(&self, style: MarkerStyle) -> impl Iterator<Item = &Marker> {
        self.markers.iter().filter(move |m| m.style == style)
    }

    /// No overlays drawn.
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty() && self.routes.is_empty()
    }
}

impl MapView {
    pub fn new(config: &MapConfig) -> Self {
        let canvas = config.canvas();
        let initial = Viewport::new(config.center, config.zoom, &canvas);
        Self {
            tiles: TileLayer {
                url_template: config.tile_url.clone(),
                attribution: config.attribution.clone(),
            },
            canvas,
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            initial,
            viewport: initial,
            markers: Vec::new(),
            routes: Vec::new(),
            next_layer_id: 1,
        }
    }

    fn next_id(&mut self) -> LayerId {
        let id = self.next_layer_id;
        self.next_layer_id += 1;
        id
    }

    fn place_marker(&mut self, coord: Coord, style: MarkerStyle, popup: Popup) -> Result<LayerId, MapError> {
        if !coord.is_valid() {
            return Err(MapError::InvalidCoordinate(coord));
        }
        // Only one popup is open at a time
        if popup.open {
            for marker in &mut self.markers {
                marker.popup.open = false;
            }
        }
        let id = self.next_id();
        debug!(id, lat = coord.lat, lon = coord.lon, ?style, "Marker placed");
        self.markers.push(Marker {
            id,
            coord,
            style,
            popup,
        });
        Ok(id)
    }

    fn draw_route(
        &mut self,
        origin: Coord,
        destination: Coord,
        destination_label: String,
    ) -> Result<MapActionResult, MapError> {
        // Validate both ends before touching state so a bad route adds nothing
        for coord in [origin, destination] {
            if !coord.is_valid() {
                return Err(MapError::InvalidCoordinate(coord));
            }
        }

        let origin_marker = self.place_marker(
            origin,
            MarkerStyle::Origin,
            Popup::new(ORIGIN_POPUP_TITLE, ORIGIN_POPUP_DETAIL).opened(),
        )?;
        let destination_marker = self.place_marker(
            destination,
            MarkerStyle::Destination,
            Popup::new(destination_label, DESTINATION_POPUP_DETAIL),
        )?;

        let line = self.next_id();
        self.routes.push(RouteLine {
            id: line,
            from: origin,
            to: destination,
            style: LineStyle::default(),
        });
        info!(%origin, %destination, "Route drawn");

        Ok(MapActionResult::RouteDrawn {
            origin_marker,
            destination_marker,
            line,
            bounds: Bounds::from_points(origin, destination),
        })
    }

    fn fit_bounds(&mut self, region: Bounds) -> Result<Viewport, MapError> {
        for corner in [region.south_west, region.north_east] {
            if !corner.is_valid() {
                return Err(MapError::InvalidCoordinate(corner));
            }
        }
        self.viewport = Viewport::fit(&region, &self.canvas, self.min_zoom, self.max_zoom);
        debug!(zoom = self.viewport.zoom, center = %self.viewport.center, "Viewport fitted");
        Ok(self.viewport)
    }

    fn clear_overlays(&mut self) -> usize {
        let removed = self.markers.len() + self.routes.len();
        self.markers.clear();
        self.routes.clear();
        removed
    }
}

#[async_trait]
impl ActorEntity for MapView {
    type Action = MapAction;
    type ActionResult = MapActionResult;
    type Snapshot = MapSnapshot;
    type Context = ();
    type Error = MapError;

    fn snapshot(&self) -> MapSnapshot {
        MapSnapshot {
            tiles: self.tiles.clone(),
            viewport: self.viewport,
            markers: self.markers.clone(),
            routes: self.routes.clone(),
        }
    }

    async fn handle_action(&mut self, action: MapAction, _ctx: &()) -> Result<MapActionResult, MapError> {
        match action {
            MapAction::PlaceMarker { coord, style, popup } => self
                .place_marker(coord, style, popup)
                .map(MapActionResult::MarkerPlaced),
            MapAction::DrawRoute {
                origin,
                destination,
                destination_label,
            } => self.draw_route(origin, destination, destination_label),
            MapAction::FitBounds(region) => {
                self.fit_bounds(region).map(MapActionResult::ViewportChanged)
            }
            MapAction::Clear => {
                let removed = self.clear_overlays();
                debug!(removed, "Overlays cleared");
                Ok(MapActionResult::Cleared(removed))
            }
        }
    }

    async fn on_reset(&mut self, _ctx: &()) -> Result<(), MapError> {
        self.clear_overlays();
        self.viewport = self.initial;
        Ok(())
    }
}
