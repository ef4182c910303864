//! TOML configuration file support for repeatable runs.
//!
//! Instead of passing many CLI flags, users can specify settings in a
//! config file (CLI flags still win over config values):
//!
//! ```toml
//! # masspool.toml
//! [pooling]
//! plate_format = 384
//! compounds_per_well = 10
//! threshold = 0.05
//! delimiter = "tab"
//! sample_column = "sample"
//! mass_column = "ExactMass"
//! output_prefix = "screen42"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Root configuration structure for masspool.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Pooling-specific settings.
    #[serde(default)]
    pub pooling: PoolingConfig,
}

/// Configuration for the pool command.
#[derive(Debug, Default, Deserialize)]
pub struct PoolingConfig {
    /// Plate format id (96, 384 or 1536).
    pub plate_format: Option<u32>,

    /// Number of compounds per well (exclusive with total_wells).
    pub compounds_per_well: Option<usize>,

    /// Total number of wells (exclusive with compounds_per_well).
    pub total_wells: Option<usize>,

    /// Mass collision threshold.
    pub threshold: Option<f64>,

    /// Input delimiter name (tab, comma, space).
    pub delimiter: Option<String>,

    /// Sample identifier column name.
    pub sample_column: Option<String>,

    /// Exact mass column name.
    pub mass_column: Option<String>,

    /// Prefix for output report files.
    pub output_prefix: Option<String>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [pooling]
            plate_format = 1536
            compounds_per_well = 8
            threshold = 0.05
            delimiter = "comma"
            sample_column = "id"
            mass_column = "MonoMass"
            output_prefix = "screen42"
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.pooling.plate_format, Some(1536));
        assert_eq!(config.pooling.compounds_per_well, Some(8));
        assert_eq!(config.pooling.total_wells, None);
        assert_eq!(config.pooling.threshold, Some(0.05));
        assert_eq!(config.pooling.delimiter.as_deref(), Some("comma"));
        assert_eq!(config.pooling.sample_column.as_deref(), Some("id"));
        assert_eq!(config.pooling.mass_column.as_deref(), Some("MonoMass"));
        assert_eq!(config.pooling.output_prefix.as_deref(), Some("screen42"));
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [pooling]
            total_wells = 48
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.pooling.total_wells, Some(48));
        assert_eq!(config.pooling.threshold, None);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.pooling.plate_format, None);
    }
}
