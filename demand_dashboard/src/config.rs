//! Dashboard configuration loaded from TOML

use anyhow::{Context, Result};
use demand_forecast::{ArtifactPaths, ReportedMetrics};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file looked up when none is named on the command line
pub const DEFAULT_CONFIG_FILE: &str = "dashboard.toml";

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct DashboardConfig {
    #[serde(default)]
    pub artifacts: ArtifactsConfig,
    /// Figures shown in the model performance panel
    #[serde(default)]
    pub metrics: ReportedMetrics,
    #[serde(default)]
    pub chart: ChartConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ArtifactsConfig {
    #[serde(default = "default_model")]
    pub model: PathBuf,
    #[serde(default = "default_features")]
    pub features: PathBuf,
    #[serde(default = "default_dataset")]
    pub dataset: PathBuf,
    #[serde(default)]
    pub export: Option<PathBuf>,
}

fn default_model() -> PathBuf {
    PathBuf::from("model.json")
}
fn default_features() -> PathBuf {
    PathBuf::from("features.json")
}
fn default_dataset() -> PathBuf {
    PathBuf::from("train.csv")
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            features: default_features(),
            dataset: default_dataset(),
            export: None,
        }
    }
}

impl ArtifactsConfig {
    pub fn paths(&self) -> ArtifactPaths {
        ArtifactPaths {
            model: self.model.clone(),
            features: self.features.clone(),
            dataset: self.dataset.clone(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ChartConfig {
    #[serde(default = "default_chart_width")]
    pub width: usize,
    #[serde(default = "default_chart_height")]
    pub height: usize,
}

fn default_chart_width() -> usize {
    72
}
fn default_chart_height() -> usize {
    12
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_chart_width(),
            height: default_chart_height(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

/// Parse and validate a configuration document
pub fn parse_config(content: &str) -> Result<DashboardConfig> {
    let config: DashboardConfig =
        toml::from_str(content).with_context(|| "Failed to parse config file")?;

    if config.chart.width < 2 {
        anyhow::bail!("chart.width must be >= 2");
    }
    if config.chart.height < 2 {
        anyhow::bail!("chart.height must be >= 2");
    }
    if config.metrics.r2.is_nan() || config.metrics.r2 > 1.0 {
        anyhow::bail!("metrics.r2 must be <= 1.0");
    }
    if config.metrics.mae < 0.0 || config.metrics.rmse < 0.0 {
        anyhow::bail!("metrics.mae and metrics.rmse must be >= 0");
    }

    Ok(config)
}

pub fn load_config(path: &Path) -> Result<DashboardConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config(&content)
}

/// Load the named config file, or `dashboard.toml` when it exists, or the
/// built-in defaults.
pub fn resolve_config(path: Option<&Path>) -> Result<DashboardConfig> {
    match path {
        Some(path) => load_config(path),
        None => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            if default.exists() {
                load_config(default)
            } else {
                Ok(DashboardConfig::default())
            }
        }
    }
}
