//! # History Refresh
//!
//! After a successful allocation the order history shown next to the form is stale.
//! A [`HistoryRefresher`] brings it up to date in one of two ways:
//!
//! - [`DelayedReload`] asks the host to reload the whole page after a fixed delay. The
//!   reload also resets the map and the banner.
//! - [`StatsRefresher`] fetches the history summary directly and publishes it to
//!   subscribers, leaving the page as it is.

pub mod reload;
pub mod stats;

pub use reload::DelayedReload;
pub use stats::StatsRefresher;

use crate::model::DashboardStats;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// A page reload will happen after `delay`.
    ReloadScheduled { delay: Duration },
    /// Fresh history was fetched and published.
    Refreshed(DashboardStats),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum RefreshError {
    #[error("history request failed: {0}")]
    Request(String),

    #[error("malformed history response: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait HistoryRefresher: Send + Sync {
    async fn refresh(&self) -> Result<RefreshOutcome, RefreshError>;

    /// Drops any refresh still waiting to happen. Called on shutdown.
    fn cancel_pending(&self) {}
}

/// The page hosting the workflow.
pub trait PageHost: Send + Sync {
    /// Full reload. Everything scoped to the page session starts over.
    fn reload(&self);
}
