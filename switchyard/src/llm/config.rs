//! Model configuration: which model to call and at what temperature.
//!
//! Passed explicitly to `ChatOpenAI::new` and to the task dispatcher's factory.
//! Nothing in the library reads the environment except `ModelConfig::from_env`.

use thiserror::Error;

/// Model used when neither the environment nor the caller picks one.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

const ENV_MODEL: &str = "OPENAI_MODEL";
const ENV_TEMPERATURE: &str = "OPENAI_TEMPERATURE";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid temperature {value:?}: {reason}")]
    InvalidTemperature { value: String, reason: String },
}

/// Model name and sampling temperature.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub model: String,
    pub temperature: f32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.0,
        }
    }
}

impl ModelConfig {
    pub fn new(model: impl Into<String>, temperature: f32) -> Self {
        Self {
            model: model.into(),
            temperature,
        }
    }

    /// Same model, different temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Reads `OPENAI_MODEL` and `OPENAI_TEMPERATURE`; unset or empty values keep the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like `from_env`, with an explicit lookup (tests pass a map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::default().overlay(lookup)
    }

    /// Replaces the model and temperature with any set through `lookup`; unset keys keep `self`.
    pub fn overlay<F>(self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = self;
        if let Some(model) = lookup(ENV_MODEL).filter(|m| !m.trim().is_empty()) {
            config.model = model.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_TEMPERATURE).filter(|t| !t.trim().is_empty()) {
            config.temperature = parse_temperature(&raw)?;
        }
        Ok(config)
    }
}

/// Parses a sampling temperature; must be a finite number in `0.0..=2.0`.
pub fn parse_temperature(raw: &str) -> Result<f32, ConfigError> {
    let value: f32 = raw
        .trim()
        .parse()
        .map_err(|e: std::num::ParseFloatError| ConfigError::InvalidTemperature {
            value: raw.to_string(),
            reason: e.to_string(),
        })?;
    if !value.is_finite() || !(0.0..=2.0).contains(&value) {
        return Err(ConfigError::InvalidTemperature {
            value: raw.to_string(),
            reason: "must be between 0 and 2".to_string(),
        });
    }
    Ok(value)
}
