//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the process-wide `tracing-subscriber` used by binaries.
//!
//! The format is compact and hides module paths (`with_target(false)`); components log
//! a `component` field instead, and the submission workflow runs inside a
//! `submit_order{attempt=N}` span, so a line reads like:
//!
//! ```text
//! INFO submit_order{attempt=1}: Location acquired lat=28.6 lon=77.2
//! INFO submit_order{attempt=1}: Allocation accepted warehouse="WH-Delhi"
//! ```
//!
//! ## Levels
//!
//! ```bash
//! RUST_LOG=info cargo run      # workflow transitions
//! RUST_LOG=debug cargo run     # payloads and every component request
//! ```
//!
//! `RUST_LOG` wins over the default directive passed by the caller.

use tracing_subscriber::EnvFilter;

/// Initializes logging. `default_filter` applies when `RUST_LOG` is unset or invalid.
///
/// Calling it twice is harmless; the second installation is ignored.
pub fn setup_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}
