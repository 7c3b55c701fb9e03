//! `launchdash` - An interactive launch records dashboard
//!
//! This library loads a table of rocket launch records once at start-up and
//! computes two linked charts from it: an outcome pie per site and a payload
//! versus outcome scatter plot. A small dependency graph re-runs each chart
//! when one of the controls it reads changes, and an HTTP server exposes the
//! page and the recompute endpoint.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod catalog;
pub mod chart;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod layout;
pub mod logging;
pub mod reactive;
pub mod server;

pub use catalog::{SiteCatalog, SiteSelection};
pub use chart::Figure;
pub use config::Config;
pub use dataset::{LaunchRecord, LaunchTable, Outcome, PayloadRange};
pub use error::{Error, Result};
pub use layout::DashboardLayout;
pub use logging::init_logging;
pub use reactive::{ControlState, Dashboard, InputId, OutputId};
pub use server::AppState;
