//! Output regions a banner can be rendered to.

use super::banner::{Banner, BannerLevel};
use std::sync::Mutex;
use tracing::{info, warn};

/// The host's status message area. `None` empties it.
pub trait BannerSink: Send + Sync {
    fn render(&self, banner: Option<&Banner>);
}

/// Writes banners to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl BannerSink for TracingSink {
    fn render(&self, banner: Option<&Banner>) {
        match banner {
            Some(b) if b.level() == BannerLevel::Error => warn!(banner = %b, "Status"),
            Some(b) => info!(banner = %b, "Status"),
            None => info!("Status cleared"),
        }
    }
}

/// Keeps every render in order. Used by embedders that poll the banner instead of
/// being pushed to.
#[derive(Debug, Default)]
pub struct MemorySink {
    renders: Mutex<Vec<Option<Banner>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn renders(&self) -> Vec<Option<Banner>> {
        self.renders
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// What the output region shows now.
    pub fn current(&self) -> Option<Banner> {
        self.renders().pop().flatten()
    }
}

impl BannerSink for MemorySink {
    fn render(&self, banner: Option<&Banner>) {
        if let Ok(mut renders) = self.renders.lock() {
            renders.push(banner.cloned());
        }
    }
}
