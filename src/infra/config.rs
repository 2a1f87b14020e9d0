//! Configuration loading from TOML files
//!
//! Config file is selected via:
//! 1. --config <path> command line argument
//! 2. ROUTE_CONFIG environment variable
//! 3. Default: config/route.toml

use anyhow::Context;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use tracing::warn;

const DEFAULT_CONFIG_PATH: &str = "config/route.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingConfig {
    /// Appended to every candidate address, e.g. "Edmonton, AB, Canada"
    #[serde(default = "default_locality")]
    pub locality: String,
    /// Max classifications in flight during fan-out
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self { locality: default_locality(), concurrency: default_concurrency() }
    }
}

fn default_locality() -> String {
    "Edmonton, AB, Canada".to_string()
}

fn default_concurrency() -> usize {
    8
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClusteringConfig {
    /// Inclusive walking-distance threshold between zone members (meters)
    #[serde(default = "default_max_walking_distance_m")]
    pub max_walking_distance_m: f64,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self { max_walking_distance_m: default_max_walking_distance_m() }
    }
}

fn default_max_walking_distance_m() -> f64 {
    500.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// House-number span above which a range is flagged as a likely misread
    #[serde(default = "default_suspicious_span")]
    pub suspicious_span: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self { suspicious_span: default_suspicious_span() }
    }
}

fn default_suspicious_span() -> u32 {
    100
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_report_file")]
    pub report_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { report_file: default_report_file() }
    }
}

fn default_report_file() -> String {
    "route_report.json".to_string()
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub geocoding: GeocodingConfig,
    #[serde(default)]
    pub clustering: ClusteringConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Main configuration struct used throughout the application
#[derive(Debug, Clone)]
pub struct Config {
    locality: String,
    concurrency: usize,
    max_walking_distance_m: f64,
    suspicious_span: u32,
    report_file: String,
    config_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_toml(TomlConfig::default(), "default".to_string())
    }
}

impl Config {
    fn from_toml(toml_config: TomlConfig, config_file: String) -> Self {
        Self {
            locality: toml_config.geocoding.locality,
            // A zero limit would stall the fan-out forever
            concurrency: toml_config.geocoding.concurrency.max(1),
            max_walking_distance_m: toml_config.clustering.max_walking_distance_m,
            suspicious_span: toml_config.analysis.suspicious_span,
            report_file: toml_config.output.report_file,
            config_file,
        }
    }

    /// Determine config file path from the CLI flag or environment
    pub fn resolve_config_path(cli_path: Option<&str>) -> String {
        if let Some(path) = cli_path {
            return path.to_string();
        }

        if let Ok(path) = env::var("ROUTE_CONFIG") {
            return path;
        }

        DEFAULT_CONFIG_PATH.to_string()
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let toml_config: TomlConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Ok(Self::from_toml(toml_config, path.display().to_string()))
    }

    /// Load configuration - tries TOML file first, falls back to defaults
    pub fn load_from_path(path: &str) -> Self {
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %format!("{:#}", e), "config_load_failed_using_defaults");
                Self::default()
            }
        }
    }

    pub fn locality(&self) -> &str {
        &self.locality
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    pub fn max_walking_distance_m(&self) -> f64 {
        self.max_walking_distance_m
    }

    pub fn suspicious_span(&self) -> u32 {
        self.suspicious_span
    }

    pub fn report_file(&self) -> &str {
        &self.report_file
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }
}
