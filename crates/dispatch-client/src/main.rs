//! # dispatch-client
//!
//! Submits one crop-lot order from the command line and prints the banner the page
//! would show.
//!
//! ```bash
//! dispatch-client --config dispatch.toml --farmer-id F1 --crop-type Wheat --quantity 10 \
//!     --lat 28.6 --lon 77.2
//! ```

use clap::Parser;
use dispatch_actor::tracing::setup_tracing;
use dispatch_client::config::{DispatchConfig, LocationConfig};
use dispatch_client::form::FormValues;
use dispatch_client::history::RefreshOutcome;
use dispatch_client::lifecycle::{Collaborators, DispatchSystem};
use dispatch_client::orchestrator::SubmissionOutcome;
use dispatch_client::status::{Banner, BannerLevel, BannerSink};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "dispatch-client")]
#[command(about = "Submit a crop lot for warehouse allocation", long_about = None)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long, default_value = "")]
    farmer_id: String,

    #[arg(long, default_value = "")]
    crop_type: String,

    #[arg(long, default_value = "")]
    quantity: String,

    /// Device latitude; overrides the configured location source
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Device longitude
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Skip waiting for the scheduled page reload
    #[arg(long)]
    no_wait: bool,
}

/// Prints banners the way the status area shows them.
struct ConsoleSink;

impl BannerSink for ConsoleSink {
    fn render(&self, banner: Option<&Banner>) {
        match banner {
            Some(b) => {
                let tag = match b.level() {
                    BannerLevel::Info => "info",
                    BannerLevel::Success => "success",
                    BannerLevel::Error => "error",
                };
                println!("[{tag}] {b}");
            }
            None => println!("[cleared]"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => DispatchConfig::from_file(path).await?,
        None => DispatchConfig::default(),
    };
    if let (Some(lat), Some(lon)) = (args.lat, args.lon) {
        config.location = LocationConfig::Fixed {
            lat,
            lon,
            accuracy_m: None,
        };
        config.validate()?;
    }

    setup_tracing(&config.log_filter);
    info!(endpoint = %config.allocation.endpoint, "Starting dispatch client");

    let form = Arc::new(FormValues::with_order(
        &args.farmer_id,
        &args.crop_type,
        &args.quantity,
    ));
    let system = DispatchSystem::start(&config, Collaborators::new(form, Arc::new(ConsoleSink)))?;
    let session = system.session();

    match system.orchestrator.submit_order().await {
        Ok(SubmissionOutcome::Allocated { refresh, .. }) => {
            info!("Order allocated");
            if let Some(RefreshOutcome::ReloadScheduled { delay }) = refresh {
                if !args.no_wait {
                    info!(delay_ms = delay.as_millis() as u64, "Waiting for page reload");
                    session.reloaded().await;
                }
            }
        }
        Ok(SubmissionOutcome::Failed(failure)) => info!(%failure, "Order not allocated"),
        Err(e) => error!(error = %e, "Submission could not run"),
    }

    drop(session);
    system.shutdown().await?;
    info!("Done");
    Ok(())
}
