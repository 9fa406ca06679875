//! Calculator settings, read from a TOML file.
//!
//! Every key is optional; a missing key keeps the default, an unknown key is an error.
//! Range checks run after deserialisation in [`CalculatorConfig::validate`].
//! ```toml
//! integration_steps = 1000
//! limit_epsilon = 1e-4
//! decimal_places = 6
//! substitution = "identifier"   # or "legacy"
//! default_variable = "x"
//! log_level = "info"
//! log_file = "calculus.log"
//! ```

use crate::numerical::substitution::SubstitutionMode;
use crate::numerical::{DISPLAY_DECIMALS, EstimatorSettings, INTEGRATION_STEPS, LIMIT_EPSILON};
use log::LevelFilter;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

// f64 carries at most 17 significant digits
const MAX_DECIMAL_PLACES: usize = 17;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

fn invalid(key: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.into(),
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalculatorConfig {
    pub integration_steps: usize,
    pub limit_epsilon: f64,
    pub decimal_places: usize,
    pub substitution: SubstitutionMode,
    pub default_variable: String,
    pub log_level: LevelFilter,
    pub log_file: Option<PathBuf>,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            integration_steps: INTEGRATION_STEPS,
            limit_epsilon: LIMIT_EPSILON,
            decimal_places: DISPLAY_DECIMALS,
            substitution: SubstitutionMode::Identifier,
            default_variable: "x".to_string(),
            log_level: LevelFilter::Info,
            log_file: None,
        }
    }
}

/// parses a log level name such as "info" or "DEBUG"
pub fn parse_level(text: &str) -> Option<LevelFilter> {
    LevelFilter::from_str(text.trim()).ok()
}

impl CalculatorConfig {
    /// Parses TOML text on top of the defaults and validates the result.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let mut config: CalculatorConfig = toml::from_str(text)?;
        config.default_variable = config.default_variable.trim().to_string();
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.estimator_settings()
            .validate()
            .map_err(|err| invalid("estimator", err.to_string()))?;
        if self.decimal_places > MAX_DECIMAL_PLACES {
            return Err(invalid(
                "decimal_places",
                format!("at most {} decimal places are meaningful", MAX_DECIMAL_PLACES),
            ));
        }
        if self.default_variable.is_empty() {
            return Err(invalid("default_variable", "must not be empty"));
        }
        Ok(())
    }

    pub fn estimator_settings(&self) -> EstimatorSettings {
        EstimatorSettings {
            integration_steps: self.integration_steps,
            limit_epsilon: self.limit_epsilon,
            substitution: self.substitution,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_match_estimator_constants() {
        let config = CalculatorConfig::default();
        assert_eq!(config.estimator_settings(), EstimatorSettings::default());
        assert_eq!(config.decimal_places, 6);
        assert_eq!(config.default_variable, "x");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "integration_steps = 200\nlimit_epsilon = 1e-6\nsubstitution = \"legacy\"\n\
             default_variable = \"t\"\nlog_level = \"debug\"\nlog_file = \"calc.log\""
        )
        .unwrap();
        let config = CalculatorConfig::from_file(file.path()).unwrap();
        assert_eq!(config.integration_steps, 200);
        assert_eq!(config.limit_epsilon, 1e-6);
        assert_eq!(config.substitution, SubstitutionMode::Legacy);
        assert_eq!(config.default_variable, "t");
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.log_file, Some(PathBuf::from("calc.log")));
        assert_eq!(config.decimal_places, DISPLAY_DECIMALS);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let text = "limit_epsilon = 1\nlog_level = \"WARN\"\ndefault_variable = \" y \"";
        let config = CalculatorConfig::from_toml_str(text).unwrap();
        assert_eq!(config.limit_epsilon, 1.0);
        assert_eq!(config.log_level, LevelFilter::Warn);
        assert_eq!(config.default_variable, "y");
        assert_eq!(config.integration_steps, INTEGRATION_STEPS);
        assert_eq!(config.substitution, SubstitutionMode::Identifier);
        assert_eq!(CalculatorConfig::from_toml_str("").unwrap(), CalculatorConfig::default());
    }

    #[test]
    fn test_rejects_unknown_keys_and_bad_values() {
        assert!(matches!(
            CalculatorConfig::from_toml_str("steps = 10"),
            Err(ConfigError::Toml(err)) if err.to_string().contains("steps")
        ));
        assert!(matches!(
            CalculatorConfig::from_toml_str("integration_steps = 0"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            CalculatorConfig::from_toml_str("decimal_places = 30"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            CalculatorConfig::from_toml_str("default_variable = \"  \""),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            CalculatorConfig::from_toml_str("integration_steps = -5"),
            Err(ConfigError::Toml(_))
        ));
        assert!(matches!(
            CalculatorConfig::from_toml_str("substitution = \"regex\""),
            Err(ConfigError::Toml(_))
        ));
        assert!(matches!(
            CalculatorConfig::from_toml_str("log_level = \"loud\""),
            Err(ConfigError::Toml(_))
        ));
        assert!(matches!(
            CalculatorConfig::from_toml_str("limit_epsilon = ="),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = CalculatorConfig::from_file(dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
