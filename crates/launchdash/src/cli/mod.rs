//! Command-line interface for launchdash.
//!
//! This module provides the CLI structure for the `launchdash` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{ConfigCommand, PieCommand, ScatterCommand, ServeCommand, SitesCommand};

/// launchdash - Interactive launch records dashboard
///
/// Loads a launch records CSV file and serves a page with an outcome pie
/// chart and a payload scatter plot driven by a site dropdown and a payload
/// range slider. Run without a subcommand to start the server.
#[derive(Debug, Parser)]
#[command(name = "launchdash")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Launch records CSV file (overrides `dataset.path`)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute (defaults to `serve`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the dashboard
    Serve(ServeCommand),

    /// List the launch sites in the dataset
    Sites(SitesCommand),

    /// Print the outcome pie chart specification
    Pie(PieCommand),

    /// Print the payload scatter chart specification
    Scatter(ScatterCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }

    /// The command to run, with `serve` standing in for none.
    #[must_use]
    pub fn command_or_default(self) -> Command {
        self.command
            .unwrap_or(Command::Serve(ServeCommand::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn cli(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            data: None,
            verbose,
            quiet,
            command: None,
        }
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "launchdash");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_levels() {
        use crate::logging::Verbosity;
        assert_eq!(cli(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(cli(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(cli(2, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_no_subcommand_serves() {
        let cli = Cli::try_parse_from(["launchdash"]).unwrap();
        assert!(cli.command.is_none());
        assert!(matches!(cli.command_or_default(), Command::Serve(_)));
    }

    #[test]
    fn test_parse_serve_with_port() {
        let cli = Cli::try_parse_from(["launchdash", "serve", "--port", "9000"]).unwrap();
        match cli.command {
            Some(Command::Serve(cmd)) => assert_eq!(cmd.port, Some(9000)),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_pie() {
        let cli = Cli::try_parse_from(["launchdash", "pie", "--site", "KSC LC-39A"]).unwrap();
        match cli.command {
            Some(Command::Pie(cmd)) => assert_eq!(cmd.site, "KSC LC-39A"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_scatter_defaults() {
        let cli = Cli::try_parse_from(["launchdash", "scatter"]).unwrap();
        match cli.command {
            Some(Command::Scatter(cmd)) => {
                assert_eq!(cmd.site, "ALL");
                assert!(cmd.min.is_none());
                assert!(cmd.max.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_with_data_and_config() {
        let cli = Cli::try_parse_from([
            "launchdash",
            "-c",
            "/custom/config.toml",
            "--data",
            "launches.csv",
            "sites",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
        assert_eq!(cli.data, Some(PathBuf::from("launches.csv")));
        assert!(matches!(cli.command, Some(Command::Sites(_))));
    }

    #[test]
    fn test_parse_with_verbose() {
        let cli = Cli::try_parse_from(["launchdash", "-vv", "sites"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
