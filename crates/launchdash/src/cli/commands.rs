//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::catalog::ALL_SITES;

/// Serve command arguments.
#[derive(Debug, Default, Args)]
pub struct ServeCommand {
    /// Address to bind (overrides `server.host`)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind (overrides `server.port`)
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Sites command arguments.
#[derive(Debug, Args)]
pub struct SitesCommand {
    /// Output the dropdown options as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Pie command arguments.
#[derive(Debug, Args)]
pub struct PieCommand {
    /// Site label, or ALL for every site
    #[arg(short, long, default_value = ALL_SITES)]
    pub site: String,
}

/// Scatter command arguments.
#[derive(Debug, Args)]
pub struct ScatterCommand {
    /// Site label, or ALL for every site
    #[arg(short, long, default_value = ALL_SITES)]
    pub site: String,

    /// Lowest payload mass in kg (defaults to the dataset minimum)
    #[arg(long)]
    pub min: Option<f64>,

    /// Highest payload mass in kg (defaults to the dataset maximum)
    #[arg(long)]
    pub max: Option<f64>,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_command_default() {
        let cmd = ServeCommand::default();
        assert!(cmd.host.is_none());
        assert!(cmd.port.is_none());
    }

    #[test]
    fn test_scatter_command_debug() {
        let cmd = ScatterCommand {
            site: "ALL".to_string(),
            min: Some(0.0),
            max: Some(5000.0),
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("site"));
        assert!(debug_str.contains("5000"));
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }
}
