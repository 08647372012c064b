//! Configuration management for the CLI
//!
//! Settings come from `~/.config/bundle-resources/config.toml` (optional)
//! overlaid with `BUNDLE_*` environment variables. Command-line flags win
//! over both.

use anyhow::{Context, Result};
use bundle_lib::{AnalysisSettings, DefaultResourcePolicy};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Node label holding the pool name
    pub pool_label: Option<String>,
    /// CPU charged to containers without requests (cores)
    pub default_cpu: Option<f64>,
    /// Memory charged to containers without requests (MiB)
    pub default_memory_mib: Option<f64>,
    /// Default output format
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = Self::config_path() {
            builder = builder.add_source(config::File::from(path).required(false));
        }

        builder
            .add_source(config::Environment::with_prefix("BUNDLE"))
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Failed to parse configuration")
    }

    /// Settings for an analysis run; `pool_label` overrides the configured key
    pub fn analysis_settings(&self, pool_label: Option<String>) -> AnalysisSettings {
        let defaults = AnalysisSettings::default();
        let policy = DefaultResourcePolicy {
            cpu: self.default_cpu.unwrap_or(defaults.default_policy.cpu),
            memory_mib: self
                .default_memory_mib
                .unwrap_or(defaults.default_policy.memory_mib),
        };

        AnalysisSettings {
            pool_label_key: pool_label
                .or_else(|| self.pool_label.clone())
                .unwrap_or(defaults.pool_label_key),
            default_policy: policy,
        }
    }

    /// Configured output format, table if unset or unrecognized
    pub fn output_format(&self) -> OutputFormat {
        self.default_format
            .as_deref()
            .and_then(|f| OutputFormat::from_str(f, true).ok())
            .unwrap_or_default()
    }

    /// Get the configuration file path
    fn config_path() -> Option<PathBuf> {
        let home = dirs_next::home_dir()?;
        Some(
            home.join(".config")
                .join("bundle-resources")
                .join("config.toml"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bundle_lib::DEFAULT_POOL_LABEL;

    #[test]
    fn test_defaults_when_unset() {
        let settings = Config::default().analysis_settings(None);
        assert_eq!(settings, AnalysisSettings::default());
        assert_eq!(settings.pool_label_key, DEFAULT_POOL_LABEL);
    }

    #[test]
    fn test_flag_overrides_config() {
        let config = Config {
            pool_label: Some("from-config".to_string()),
            default_cpu: Some(0.5),
            ..Default::default()
        };

        let settings = config.analysis_settings(None);
        assert_eq!(settings.pool_label_key, "from-config");
        assert_eq!(settings.default_policy.cpu, 0.5);
        assert_eq!(settings.default_policy.memory_mib, 512.0);

        let settings = config.analysis_settings(Some("from-flag".to_string()));
        assert_eq!(settings.pool_label_key, "from-flag");
    }

    #[test]
    fn test_output_format_from_config() {
        let config = Config {
            default_format: Some("JSON".to_string()),
            ..Default::default()
        };
        assert!(matches!(config.output_format(), OutputFormat::Json));
        assert!(matches!(Config::default().output_format(), OutputFormat::Table));
    }
}
