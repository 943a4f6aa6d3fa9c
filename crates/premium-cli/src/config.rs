//! Predictor configuration
//!
//! Loaded in order, later sources overriding earlier ones:
//! 1. built-in defaults
//! 2. `config/default.toml` (optional)
//! 3. the file passed with `--config` (required when given)
//! 4. environment variables prefixed `PREMIUM__` (e.g. `PREMIUM__MODELS__YOUNG`)

use config::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Paths of the fitted artifacts
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ModelPaths {
    /// Model for age 25 and under
    pub young: PathBuf,
    /// Model for everyone older
    pub rest: PathBuf,
    /// Min-max scaler
    pub scaler: PathBuf,
}

impl Default for ModelPaths {
    fn default() -> Self {
        Self {
            young: PathBuf::from("models/poly_model_pipeline.json"),
            rest: PathBuf::from("models/reg_model_rest.json"),
            scaler: PathBuf::from("models/minmax_scaler.json"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ValidationSection {
    /// Reject labels the form does not offer
    pub strict_categories: bool,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PredictorConfig {
    pub models: ModelPaths,
    pub logging: LoggingConfig,
    pub validation: ValidationSection,
}

impl PredictorConfig {
    /// Load configuration from files and environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false));

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config: PredictorConfig = builder
            .add_source(config::Environment::with_prefix("PREMIUM").separator("__"))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, path) in [
            ("models.young", &self.models.young),
            ("models.rest", &self.models.rest),
            ("models.scaler", &self.models.scaler),
        ] {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Message(format!("{} must not be empty", name)));
            }
        }

        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Message("logging.level must not be empty".into()));
        }

        Ok(())
    }
}
