//! `launchdash` - CLI for the launch records dashboard
//!
//! With no subcommand the binary loads the dataset and serves the dashboard.
//! The other subcommands print the site list or chart specifications for
//! inspection.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;

use launchdash::chart::{pie_chart, scatter_chart};
use launchdash::cli::{Cli, Command, ConfigCommand, ScatterCommand, ServeCommand};
use launchdash::{init_logging, AppState, Config, LaunchTable, PayloadRange, SiteCatalog, SiteSelection};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let mut config = Config::load_from(cli.config.clone())?;
    if let Some(data) = cli.data.clone() {
        config.dataset.path = data;
    }

    match cli.command_or_default() {
        Command::Serve(serve_cmd) => handle_serve(config, serve_cmd),
        Command::Sites(sites_cmd) => {
            let table = load_table(&config)?;
            let catalog = SiteCatalog::from_table(&table);
            if sites_cmd.json {
                println!("{}", serde_json::to_string_pretty(&catalog.options())?);
            } else {
                for site in catalog.sites() {
                    println!("{site}");
                }
            }
            Ok(())
        }
        Command::Pie(pie_cmd) => {
            let table = load_table(&config)?;
            let figure = pie_chart(
                &table,
                &SiteSelection::parse(&pie_cmd.site),
                &config.pie_style(),
            );
            println!("{}", serde_json::to_string_pretty(&figure)?);
            Ok(())
        }
        Command::Scatter(scatter_cmd) => handle_scatter(&config, &scatter_cmd),
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

/// Load the dataset; any failure here aborts start-up.
fn load_table(config: &Config) -> anyhow::Result<LaunchTable> {
    LaunchTable::load(&config.dataset.path)
        .with_context(|| format!("cannot load dataset {}", config.dataset.path.display()))
}

fn handle_serve(mut config: Config, cmd: ServeCommand) -> anyhow::Result<()> {
    if let Some(host) = cmd.host {
        config.server.host = host;
    }
    if let Some(port) = cmd.port {
        config.server.port = port;
    }
    config.validate()?;

    let addr = config.bind_addr()?;
    let table = load_table(&config)?;
    let state = AppState::build(table, &config);

    // One event at a time: a single-threaded runtime is all the dashboard needs.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("cannot start async runtime")?;
    runtime.block_on(launchdash::server::serve(addr, state))?;
    Ok(())
}

fn handle_scatter(config: &Config, cmd: &ScatterCommand) -> anyhow::Result<()> {
    let table = load_table(config)?;
    let bounds = table.payload_bounds();
    let range = PayloadRange::new(
        cmd.min.unwrap_or(bounds.low()),
        cmd.max.unwrap_or(bounds.high()),
    )?;
    let figure = scatter_chart(&table, &SiteSelection::parse(&cmd.site), &range);
    println!("{}", serde_json::to_string_pretty(&figure)?);
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Dataset]");
                println!("  Path:               {}", config.dataset.path.display());
                println!();
                println!("[Server]");
                println!("  Host:               {}", config.server.host);
                println!("  Port:               {}", config.server.port);
                println!();
                println!("[UI]");
                println!("  Title:              {}", config.ui.title);
                println!("  Slider step (kg):   {}", config.ui.slider_step);
                println!("  Pie pull:           {}", config.ui.pie_pull);
                println!("  All-sites colours:  {}", config.ui.all_sites_colors);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
