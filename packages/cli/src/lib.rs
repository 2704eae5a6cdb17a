//! # tapeworks-cli
//!
//! Runs the bundled tapeworks programs from the command line and prints the
//! final tape with the machine's statistics.
//!
//! ## Usage
//!
//! ```bash
//! tapeworks beaver4
//! tapeworks accept abcdef abc
//! tapeworks --json sequence abcdef abc def
//! tapeworks --verbose increment 0111 --flipping
//! RUST_LOG=tapeworks_core=debug tapeworks --config machine.json handwritten abc cba
//! ```

use std::path::PathBuf;

use clap::Parser;
use tapeworks_core::MachineConfig;
use tracing_subscriber::{fmt, EnvFilter};

pub mod commands;
pub mod config;
pub mod error;

pub use commands::{execute, Command, Printer};
pub use error::{CliError, Result};

/// Tapeworks - run multi-tape machine programs
#[derive(Parser, Debug)]
#[command(name = "tapeworks")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// JSON file with machine configuration
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log every tape operation and transition
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Reset tapes to their defaults after a clean halt
    #[arg(long, global = true)]
    pub reset_after: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Machine configuration from the config file, environment and flags.
    pub fn machine_config(&self, env_verbose: Option<&str>) -> Result<MachineConfig> {
        config::resolve(
            self.config.as_deref(),
            env_verbose,
            config::Overrides {
                verbose: self.verbose,
                reset_after: self.reset_after,
            },
        )
    }

    pub fn printer(&self) -> Printer {
        Printer {
            json: self.json,
            color: !self.json && !self.no_color,
        }
    }
}

/// Install the log subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

