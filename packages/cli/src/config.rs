//! Machine configuration for a CLI run.
//!
//! Precedence, lowest first: defaults, the `--config` JSON file, the
//! `TAPEWORKS_VERBOSE` environment variable, command-line flags.

use std::fs;
use std::path::Path;

use tapeworks_core::MachineConfig;

use crate::error::{CliError, Result};

pub const VERBOSE_ENV: &str = "TAPEWORKS_VERBOSE";

/// Read a [`MachineConfig`] from a JSON file. Missing fields keep their
/// defaults.
pub fn load(path: &Path) -> Result<MachineConfig> {
    let text = fs::read_to_string(path).map_err(|source| CliError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::ParseConfig {
        path: path.to_path_buf(),
        source,
    })
}

/// Whether an environment value switches a flag on.
pub fn env_flag(value: Option<&str>) -> bool {
    match value {
        Some(v) => matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        None => false,
    }
}

/// Flags that can only turn settings on.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    pub verbose: bool,
    pub reset_after: bool,
}

pub fn resolve(file: Option<&Path>, env_verbose: Option<&str>, overrides: Overrides) -> Result<MachineConfig> {
    let mut config = match file {
        Some(path) => load(path)?,
        None => MachineConfig::default(),
    };
    if env_flag(env_verbose) || overrides.verbose {
        config.verbose = true;
    }
    if overrides.reset_after {
        config.reset_after_execution = true;
    }
    Ok(config)
}
