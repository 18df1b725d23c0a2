//! Highway planner CLI library.
//!
//! This crate provides the command handlers and output rendering behind the
//! `highway` binary, so they can be exercised without spawning a process.

pub mod commands;
pub mod output;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use highway_lib::RegistryConfig;

use crate::output::OutputFormat;

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Maximum number of vehicles per station (overrides --config).
    #[arg(long, global = true)]
    pub fleet_capacity: Option<usize>,

    /// JSON file with registry settings, e.g. {"fleet_capacity": 512}.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Log filter (defaults to RUST_LOG, then "info"). Logs go to stderr.
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

impl GlobalOptions {
    /// Resolve the registry configuration from the config file and flags.
    pub fn registry_config(&self) -> Result<RegistryConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("failed to read config from {}", path.display()))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("failed to parse config from {}", path.display()))?
            }
            None => RegistryConfig::default(),
        };
        if let Some(capacity) = self.fleet_capacity {
            config.fleet_capacity = capacity;
        }
        config.validate().context("invalid registry configuration")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_reference_capacity() {
        let config = GlobalOptions::default()
            .registry_config()
            .expect("default config");
        assert_eq!(config, RegistryConfig::default());
    }

    #[test]
    fn flag_overrides_default() {
        let options = GlobalOptions {
            fleet_capacity: Some(3),
            ..GlobalOptions::default()
        };
        assert_eq!(
            options.registry_config().expect("valid").fleet_capacity,
            3
        );
    }

    #[test]
    fn zero_capacity_is_an_error() {
        let options = GlobalOptions {
            fleet_capacity: Some(0),
            ..GlobalOptions::default()
        };
        assert!(options.registry_config().is_err());
    }
}
