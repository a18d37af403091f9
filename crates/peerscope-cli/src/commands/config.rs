//! Config command implementation.

use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::{candidates, user_config_path, CliConfig, LoadedConfig};
use crate::error::{CliError, CliResult};
use crate::output::{print_info, print_success, KeyValue, Printer};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

impl ConfigArgs {
    /// True for `config init`, which must not require an existing file.
    pub fn is_init(&self) -> bool {
        matches!(self.command, ConfigCommand::Init(_))
    }
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Show which configuration file is used and where files are looked up
    Path,

    /// Write a configuration file with default values
    Init(InitArgs),
}

/// Arguments for the init subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Destination (defaults to --config, then the user config path)
    pub path: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Execute the config command.
pub fn execute(
    args: ConfigArgs,
    loaded: &LoadedConfig,
    explicit: Option<&Path>,
    printer: Printer,
) -> CliResult<()> {
    match args.command {
        ConfigCommand::Show => execute_show(&loaded.config, printer),
        ConfigCommand::Path => execute_path(loaded),
        ConfigCommand::Init(init) => execute_init(init, explicit),
    }
}

fn execute_show(config: &CliConfig, printer: Printer) -> CliResult<()> {
    if printer.is_json() {
        return printer.json(config);
    }

    let a = &config.analytics;
    let rows = vec![
        KeyValue::new("analytics.parallel", a.parallel.to_string()),
        KeyValue::new("analytics.parallel_threshold", a.parallel_threshold.to_string()),
        KeyValue::new("analytics.rare_peer_threshold", a.rare_peer_threshold.to_string()),
        KeyValue::new("analytics.consensus_fraction", a.consensus_fraction.to_string()),
        KeyValue::new("analytics.top_contributors", a.top_contributors.to_string()),
        KeyValue::new("analytics.large_cap_min_musd", a.large_cap_min_musd.to_string()),
        KeyValue::new("analytics.mid_cap_min_musd", a.mid_cap_min_musd.to_string()),
        KeyValue::new("analytics.profile_top_n", a.profile_top_n.to_string()),
        KeyValue::new(
            "history.snapshots_to_compare",
            config.history.snapshots_to_compare.to_string(),
        ),
        KeyValue::new("output.format", config.output.format.as_str()),
        KeyValue::new("output.color", config.output.color.to_string()),
        KeyValue::new("output.precision", config.output.precision.to_string()),
    ];
    printer.section("Current Configuration", &rows)
}

fn execute_path(loaded: &LoadedConfig) -> CliResult<()> {
    match &loaded.source {
        Some(path) => print_info(&format!("Config file: {}", path.display())),
        None => print_info("Config file: none (using defaults)"),
    }
    for path in candidates() {
        let status = if path.exists() { "exists" } else { "missing" };
        print_info(&format!("Search path: {} ({status})", path.display()));
    }
    Ok(())
}

fn execute_init(args: InitArgs, explicit: Option<&Path>) -> CliResult<()> {
    let path = args
        .path
        .or_else(|| explicit.map(Path::to_path_buf))
        .or_else(user_config_path)
        .ok_or_else(|| CliError::Config("could not determine config directory".to_string()))?;

    if path.exists() && !args.force {
        return Err(CliError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, CliConfig::default().to_toml()?)?;

    print_success(&format!("Wrote default configuration to {}", path.display()));
    Ok(())
}
