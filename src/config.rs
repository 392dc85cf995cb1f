use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use pantry_matching::DEFAULT_ACCEPTANCE_THRESHOLD;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub observability: ObservabilityConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub planning: PlanningConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Forces JSON log lines outside production
    #[serde(default)]
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct MatchingConfig {
    /// Minimum similarity for free text to resolve to a catalog entry
    #[serde(default = "default_acceptance_threshold")]
    pub acceptance_threshold: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            acceptance_threshold: default_acceptance_threshold(),
        }
    }
}

fn default_acceptance_threshold() -> f64 {
    DEFAULT_ACCEPTANCE_THRESHOLD
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlanningConfig {
    #[serde(default = "default_week_days")]
    pub week_days: u16,
    /// Servings used by `recipes` and `fulfillment` when none is given;
    /// unset means each recipe's base servings.
    #[serde(default)]
    pub default_servings: Option<f64>,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            week_days: default_week_days(),
            default_servings: None,
        }
    }
}

fn default_week_days() -> u16 {
    7
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (PANTRY__MATCHING__ACCEPTANCE_THRESHOLD, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("observability.log_level", default_log_level())?
            .set_default("observability.json", false)?
            .set_default("matching.acceptance_threshold", DEFAULT_ACCEPTANCE_THRESHOLD)?
            .set_default("planning.week_days", i64::from(default_week_days()))?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Optional, ignored when missing
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("PANTRY")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        let threshold = self.matching.acceptance_threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(format!(
                "Matching acceptance_threshold must be in (0, 1], got {threshold}"
            ));
        }
        if self.planning.week_days == 0 {
            return Err("Planning week_days must be at least 1".to_string());
        }
        if let Some(servings) = self.planning.default_servings {
            if !(servings.is_finite() && servings > 0.0) {
                return Err(format!(
                    "Planning default_servings must be positive, got {servings}"
                ));
            }
        }
        Ok(())
    }
}
