//! Configuration for the dispatch client.
//!
//! Loaded from a TOML file. Every section and every field has a default, so an empty
//! file is a valid configuration:
//!
//! ```toml
//! log_filter = "info"
//!
//! [allocation]
//! endpoint = "http://127.0.0.1:5000/api/allocate"
//! timeout_ms = 10000
//!
//! [location]
//! source = "fixed"
//! lat = 28.6
//! lon = 77.2
//!
//! [map]
//! zoom = 5
//! clear_between_submissions = false
//!
//! [refresh]
//! strategy = "reload"
//! delay_ms = 4000
//! ```

use crate::map_view::viewport::{world_size, Canvas};
use crate::model::Coord;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Parse(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.message().to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DispatchConfig {
    /// Tracing filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    #[serde(default)]
    pub allocation: AllocationConfig,
    #[serde(default)]
    pub location: LocationConfig,
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            allocation: AllocationConfig::default(),
            location: LocationConfig::default(),
            map: MapConfig::default(),
            refresh: RefreshConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AllocationConfig {
    #[serde(default = "default_allocation_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            endpoint: default_allocation_endpoint(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Where position fixes come from.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum LocationConfig {
    Fixed {
        lat: f64,
        lon: f64,
        #[serde(default)]
        accuracy_m: Option<f64>,
    },
    Http {
        #[serde(default = "default_position_url")]
        url: String,
        #[serde(default = "default_timeout_ms")]
        timeout_ms: u64,
    },
    Geocode {
        #[serde(default = "default_geocode_url")]
        url: String,
        address: String,
        #[serde(default = "default_timeout_ms")]
        timeout_ms: u64,
    },
    Unsupported,
}

impl Default for LocationConfig {
    fn default() -> Self {
        LocationConfig::Http {
            url: default_position_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MapConfig {
    #[serde(default = "default_map_center")]
    pub center: Coord,
    #[serde(default = "default_zoom")]
    pub zoom: u8,
    #[serde(default)]
    pub min_zoom: u8,
    #[serde(default = "default_max_zoom")]
    pub max_zoom: u8,
    #[serde(default = "default_width_px")]
    pub width_px: u32,
    #[serde(default = "default_height_px")]
    pub height_px: u32,
    #[serde(default = "default_padding_px")]
    pub padding_px: u32,
    #[serde(default = "default_tile_url")]
    pub tile_url: String,
    #[serde(default = "default_attribution")]
    pub attribution: String,
    /// Remove earlier markers and routes before drawing a new allocation.
    #[serde(default)]
    pub clear_between_submissions: bool,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: default_map_center(),
            zoom: default_zoom(),
            min_zoom: 0,
            max_zoom: default_max_zoom(),
            width_px: default_width_px(),
            height_px: default_height_px(),
            padding_px: default_padding_px(),
            tile_url: default_tile_url(),
            attribution: default_attribution(),
            clear_between_submissions: false,
        }
    }
}

impl MapConfig {
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: f64::from(self.width_px),
            height: f64::from(self.height_px),
            padding: f64::from(self.padding_px),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RefreshStrategy {
    /// Reload the page after `delay_ms`.
    Reload,
    /// Fetch the history summary from `stats_url`.
    Stats,
    Off,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RefreshConfig {
    #[serde(default = "default_refresh_strategy")]
    pub strategy: RefreshStrategy,
    #[serde(default = "default_reload_delay_ms")]
    pub delay_ms: u64,
    #[serde(default = "default_stats_url")]
    pub stats_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            strategy: default_refresh_strategy(),
            delay_ms: default_reload_delay_ms(),
            stats_url: default_stats_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_allocation_endpoint() -> String {
    "http://127.0.0.1:5000/api/allocate".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_position_url() -> String {
    "http://ip-api.com/json/".to_string()
}

fn default_geocode_url() -> String {
    "http://127.0.0.1:5000/api/geocode".to_string()
}

/// Centre of India.
fn default_map_center() -> Coord {
    Coord::new(20.5937, 78.9629)
}

fn default_zoom() -> u8 {
    5
}

fn default_max_zoom() -> u8 {
    18
}

fn default_width_px() -> u32 {
    800
}

fn default_height_px() -> u32 {
    600
}

fn default_padding_px() -> u32 {
    20
}

fn default_tile_url() -> String {
    "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string()
}

fn default_attribution() -> String {
    "© OpenStreetMap contributors".to_string()
}

fn default_refresh_strategy() -> RefreshStrategy {
    RefreshStrategy::Reload
}

fn default_reload_delay_ms() -> u64 {
    4000
}

fn default_stats_url() -> String {
    "http://127.0.0.1:5000/api/stats".to_string()
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

impl DispatchConfig {
    /// Reads, parses and validates a configuration file.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = tokio::fs::read_to_string(path.as_ref()).await?;
        contents.parse()
    }

    /// Checks values serde cannot: URL schemes, ranges, and zoom ordering.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_http_url(&self.allocation.endpoint) {
            return Err(ConfigError::Validation(format!(
                "allocation.endpoint must be an http(s) URL, got '{}'",
                self.allocation.endpoint
            )));
        }
        if self.allocation.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "allocation.timeout_ms must be greater than 0".into(),
            ));
        }

        match &self.location {
            LocationConfig::Fixed { lat, lon, .. } => {
                if !Coord::new(*lat, *lon).is_valid() {
                    return Err(ConfigError::Validation(format!(
                        "location ({lat}, {lon}) is out of range"
                    )));
                }
            }
            LocationConfig::Http { url, timeout_ms } => {
                if !is_http_url(url) || *timeout_ms == 0 {
                    return Err(ConfigError::Validation(
                        "location.url must be an http(s) URL with a non-zero timeout".into(),
                    ));
                }
            }
            LocationConfig::Geocode {
                url,
                address,
                timeout_ms,
            } => {
                if !is_http_url(url) || *timeout_ms == 0 {
                    return Err(ConfigError::Validation(
                        "location.url must be an http(s) URL with a non-zero timeout".into(),
                    ));
                }
                if address.trim().is_empty() {
                    return Err(ConfigError::Validation(
                        "location.address cannot be empty".into(),
                    ));
                }
            }
            LocationConfig::Unsupported => {}
        }

        let map = &self.map;
        if !map.center.is_valid() {
            return Err(ConfigError::Validation(format!(
                "map.center {} is out of range",
                map.center
            )));
        }
        if map.min_zoom > map.max_zoom || map.zoom < map.min_zoom || map.zoom > map.max_zoom {
            return Err(ConfigError::Validation(format!(
                "map zoom levels must satisfy min_zoom <= zoom <= max_zoom (got {} <= {} <= {})",
                map.min_zoom, map.zoom, map.max_zoom
            )));
        }
        if map.max_zoom > 24 {
            return Err(ConfigError::Validation(
                "map.max_zoom cannot exceed 24".into(),
            ));
        }
        if map.width_px <= 2 * map.padding_px || map.height_px <= 2 * map.padding_px {
            return Err(ConfigError::Validation(
                "map padding leaves no room inside the canvas".into(),
            ));
        }
        let (usable_w, usable_h) = map.canvas().usable();
        if world_size(map.min_zoom) > usable_w.min(usable_h) {
            return Err(ConfigError::Validation(format!(
                "map.min_zoom {} is too close to show a whole route inside the padded canvas",
                map.min_zoom
            )));
        }

        if self.refresh.strategy == RefreshStrategy::Stats && !is_http_url(&self.refresh.stats_url)
        {
            return Err(ConfigError::Validation(format!(
                "refresh.stats_url must be an http(s) URL, got '{}'",
                self.refresh.stats_url
            )));
        }

        Ok(())
    }
}

impl FromStr for DispatchConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: DispatchConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}
