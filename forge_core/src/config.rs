//! Configuration file support for FitForge.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/fitforge/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub generator: GeneratorConfig,

    #[serde(default)]
    pub progress: ProgressConfig,

    #[serde(default)]
    pub fixtures: FixturesConfig,
}

/// Workout generation parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Prescribed load for any non-bodyweight exercise
    #[serde(default = "default_weight")]
    pub default_weight: f64,

    #[serde(default = "default_strength_rest")]
    pub strength_rest_seconds: u32,

    #[serde(default = "default_rest")]
    pub default_rest_seconds: u32,

    /// Upper bound (inclusive) of the random reps added to the baseline
    #[serde(default = "default_max_rep_jitter")]
    pub max_rep_jitter: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            default_weight: default_weight(),
            strength_rest_seconds: default_strength_rest(),
            default_rest_seconds: default_rest(),
            max_rep_jitter: default_max_rep_jitter(),
        }
    }
}

/// Aggregation windows, in days
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProgressConfig {
    #[serde(default = "default_weekly_window")]
    pub weekly_window_days: i64,

    #[serde(default = "default_chart_window")]
    pub chart_window_days: i64,

    #[serde(default = "default_history_window")]
    pub history_window_days: i64,

    /// Window used to list exercises on the progress overview
    #[serde(default = "default_overview_window")]
    pub overview_window_days: i64,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            weekly_window_days: default_weekly_window(),
            chart_window_days: default_chart_window(),
            history_window_days: default_history_window(),
            overview_window_days: default_overview_window(),
        }
    }
}

/// Seed data location
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct FixturesConfig {
    /// Directory whose JSON files replace the embedded fixtures
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

// Default value functions
fn default_weight() -> f64 {
    45.0
}

fn default_strength_rest() -> u32 {
    180
}

fn default_rest() -> u32 {
    60
}

fn default_max_rep_jitter() -> u32 {
    3
}

fn default_weekly_window() -> i64 {
    7
}

fn default_chart_window() -> i64 {
    30
}

fn default_history_window() -> i64 {
    30
}

fn default_overview_window() -> i64 {
    90
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            std::env::var_os("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .unwrap_or_else(|| PathBuf::from(".config"))
        });
        base.join("fitforge").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Reject values the generator and aggregator cannot work with
    pub fn validate(&self) -> Result<()> {
        let weight = self.generator.default_weight;
        if !weight.is_finite() || weight < 0.0 {
            return Err(Error::Config(format!(
                "generator.default_weight must be non-negative, got {}",
                weight
            )));
        }

        let windows = [
            ("weekly_window_days", self.progress.weekly_window_days),
            ("chart_window_days", self.progress.chart_window_days),
            ("history_window_days", self.progress.history_window_days),
            ("overview_window_days", self.progress.overview_window_days),
        ];
        for (name, days) in windows {
            if days <= 0 {
                return Err(Error::Config(format!(
                    "progress.{} must be positive, got {}",
                    name, days
                )));
            }
        }

        Ok(())
    }
}
