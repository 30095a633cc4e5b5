//! Web-Mercator viewport math.
//!
//! Pixel coordinates follow the slippy-map convention: the world is a square of
//! `TILE_SIZE * 2^zoom` pixels with the origin at the north-west corner.

use crate::model::{Bounds, Coord};
use std::f64::consts::PI;

pub const TILE_SIZE: f64 = 256.0;

/// Latitude limit of the square Mercator world.
pub const MAX_LATITUDE: f64 = 85.0511287798066;

/// Size of the map container in pixels, with the padding kept free when fitting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Canvas {
    /// Space left for a fitted region once padding is taken off both sides.
    pub fn usable(&self) -> (f64, f64) {
        (
            (self.width - 2.0 * self.padding).max(1.0),
            (self.height - 2.0 * self.padding).max(1.0),
        )
    }
}

/// What the map currently shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: Coord,
    pub zoom: u8,
    /// Visible region for the canvas the viewport was computed for.
    pub bounds: Bounds,
}

/// Side of the square world in pixels.
pub fn world_size(zoom: u8) -> f64 {
    TILE_SIZE * 2f64.powi(i32::from(zoom))
}

pub fn project(coord: Coord, zoom: u8) -> (f64, f64) {
    let size = world_size(zoom);
    let lat = coord.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (coord.lon + 180.0) / 360.0 * size;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * size;
    (x, y)
}

pub fn unproject(x: f64, y: f64, zoom: u8) -> Coord {
    let size = world_size(zoom);
    let lon = x / size * 360.0 - 180.0;
    let n = PI - 2.0 * PI * y / size;
    let lat = n.sinh().atan().to_degrees();
    Coord::new(lat, lon)
}

impl Viewport {
    /// Viewport centered on `center`, with the visible bounds for `canvas`.
    ///
    /// Latitudes past `MAX_LATITUDE` are drawn on the world edge, so once the edge is in
    /// view the bounds extend to the pole on that side.
    pub fn new(center: Coord, zoom: u8, canvas: &Canvas) -> Self {
        let (cx, cy) = project(center, zoom);
        let (hw, hh) = (canvas.width / 2.0, canvas.height / 2.0);
        let mut south_west = unproject(cx - hw, cy + hh, zoom);
        let mut north_east = unproject(cx + hw, cy - hh, zoom);
        if north_east.lat >= MAX_LATITUDE {
            north_east.lat = 90.0;
        }
        if south_west.lat <= -MAX_LATITUDE {
            south_west.lat = -90.0;
        }
        Self {
            center,
            zoom,
            bounds: Bounds {
                south_west,
                north_east,
            },
        }
    }

    /// Highest zoom in `min_zoom..=max_zoom` at which `region` fits inside the padded
    /// canvas, centered on the region's projected midpoint.
    ///
    /// The whole world fits at any `min_zoom` that passes config validation, so the
    /// `min_zoom` fallback only applies to canvases too small for one world.
    pub fn fit(region: &Bounds, canvas: &Canvas, min_zoom: u8, max_zoom: u8) -> Self {
        let (usable_w, usable_h) = canvas.usable();
        let fits = |zoom: u8| {
            let (x0, y0) = project(region.south_west, zoom);
            let (x1, y1) = project(region.north_east, zoom);
            (x1 - x0).abs() <= usable_w && (y0 - y1).abs() <= usable_h
        };

        let zoom = (min_zoom..=max_zoom)
            .rev()
            .find(|z| fits(*z))
            .unwrap_or(min_zoom);

        let (x0, y0) = project(region.south_west, zoom);
        let (x1, y1) = project(region.north_east, zoom);
        let center = unproject((x0 + x1) / 2.0, (y0 + y1) / 2.0, zoom);
        Self::new(center, zoom, canvas)
    }

    pub fn contains(&self, point: Coord) -> bool {
        self.bounds.contains(point)
    }
}
