//! # Dispatch Client
//!
//! Client-side workflow for dispatching a crop lot: read the order form, get one
//! position fix, ask the allocation service for a warehouse and show the result as a
//! route on the map plus a status banner.
//!
//! ## Modules
//!
//! - [`orchestrator`]: the submission state machine tying everything together
//! - [`location`], [`allocation`]: the two asynchronous collaborators
//! - [`map_view`], [`status`]: actor-owned page components, reached through [`clients`]
//! - [`history`]: refreshing the order history after an allocation
//! - [`lifecycle`]: starting and stopping the whole page
//! - [`config`], [`form`], [`model`]: configuration, input fields, plain data
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dispatch_client::config::DispatchConfig;
//! use dispatch_client::form::FormValues;
//! use dispatch_client::lifecycle::{Collaborators, DispatchSystem};
//! use dispatch_client::status::TracingSink;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DispatchConfig::default();
//!     let form = Arc::new(FormValues::with_order("F1", "Wheat", "10"));
//!     let system = DispatchSystem::start(&config, Collaborators::new(form, Arc::new(TracingSink)))?;
//!
//!     let outcome = system.orchestrator.submit_order().await?;
//!     println!("{outcome:?}");
//!
//!     system.shutdown().await?;
//!     Ok(())
//! }
//! ```

pub mod allocation;
pub mod clients;
pub mod config;
pub mod form;
pub mod history;
pub mod lifecycle;
pub mod location;
pub mod map_view;
pub mod model;
pub mod orchestrator;
pub mod status;
