//! Peerscope CLI - compare a fund's holdings with its peers.
//!
//! # Usage
//!
//! ```bash
//! # Overlap between the reference fund and each peer
//! peerscope peers overlap --holdings holdings.csv --master master.csv \
//!     --funds funds.csv --peer-set "Asia ex Japan"
//!
//! # Active share as JSON
//! peerscope --format json peers active-share --holdings holdings.csv \
//!     --funds funds.csv --peer-set "Asia ex Japan"
//!
//! # Changes across the last four weekly fact snapshots
//! peerscope history --facts facts.csv
//!
//! # One fund's timeline
//! peerscope history --facts facts.csv --fund "Peer Fund A"
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod config;
mod error;
mod output;

use cli::{Cli, Commands};
use config::{CliConfig, LoadedConfig};
use output::{print_error, Printer};

fn main() {
    if let Err(e) = run() {
        print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so table/JSON/CSV output stays clean
    let filter = if cli.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("peerscope=debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let loaded = match &cli.command {
        Commands::Config(args) if args.is_init() => LoadedConfig::defaults(),
        _ => CliConfig::load(cli.config.as_deref())?,
    };
    let settings = &loaded.config.output;
    if !settings.color {
        colored::control::set_override(false);
    }
    let format = cli.format.unwrap_or(settings.format);
    let printer = Printer::new(format, cli.quiet, settings.precision);

    match cli.command {
        Commands::Peers(args) => commands::peers::execute(args, &loaded.config.analytics, printer)?,
        Commands::History(args) => {
            commands::history::execute(args, &loaded.config.history, printer)?;
        }
        Commands::Config(args) => {
            commands::config::execute(args, &loaded, cli.config.as_deref(), printer)?;
        }
    }

    Ok(())
}
