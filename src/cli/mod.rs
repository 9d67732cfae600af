use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use strategy_kit::config::{DEFAULT_ENTRYPOINT_GROUP, DEFAULT_PACKAGE};

mod validate;

#[derive(Parser)]
#[command(
    name = "strategy-kit",
    version,
    about = "Strategy pack development toolkit"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Output format for validation results.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum Format {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// JSON object with outcome and issues
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate strategy-pack constraints (imports, interface, manifest)
    Validate {
        /// Strategy-pack root
        #[arg(long, default_value = ".")]
        path: PathBuf,
        /// Python package name
        #[arg(long, default_value = DEFAULT_PACKAGE)]
        package: String,
        /// Manifest entrypoint group holding strategy registrations
        #[arg(long, default_value = DEFAULT_ENTRYPOINT_GROUP)]
        entrypoint_group: String,
        /// Additional forbidden external namespace (repeatable)
        #[arg(long, value_name = "NAMESPACE")]
        forbid: Vec<String>,
        /// Additional restricted engine namespace (repeatable)
        #[arg(long, value_name = "NAMESPACE")]
        restrict: Vec<String>,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

pub fn run(cli: Cli) {
    match cli.command {
        Some(Commands::Validate {
            path,
            package,
            entrypoint_group,
            forbid,
            restrict,
            format,
        }) => validate::run(path, package, entrypoint_group, forbid, restrict, format),
        None => {
            eprintln!("Usage: strategy-kit <command> [args]");
            eprintln!("Run `strategy-kit --help` for details.");
            std::process::exit(1);
        }
    }
}

/// Install a stderr `tracing` subscriber. `RUST_LOG` overrides `-v`.
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
