//! SDK configuration.
//!
//! Loaded from a TOML file named by `CONNECT_SDK_CONFIG`, then overridden
//! field by field from the environment. Every field is required in the file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::ConfigError;

pub const CONFIG_PATH_ENV: &str = "CONNECT_SDK_CONFIG";
pub const REGION_ENV: &str = "CONNECT_REGION";
pub const ENDPOINT_URL_ENV: &str = "CONNECT_ENDPOINT_URL";
pub const VALIDATION_MODE_ENV: &str = "CONNECT_VALIDATION_MODE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SdkConfig {
    pub region: String,
    /// Overrides the regional endpoint, e.g. for a local stub service.
    pub endpoint_url: Option<String>,
    pub validation_mode: ValidationMode,
    /// Fill an unset client token with a fresh UUID before sending.
    pub auto_client_token: bool,
    /// Upper bound on pages fetched by one pagination call.
    pub max_pages: u32,
}

/// Whether requests are checked against service constraints before dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    Off,
    Strict,
}

impl ValidationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationMode::Off => "off",
            ValidationMode::Strict => "strict",
        }
    }

    pub fn from_str_value(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "off" => Some(ValidationMode::Off),
            "strict" => Some(ValidationMode::Strict),
            _ => None,
        }
    }
}

impl SdkConfig {
    /// Strict validation, automatic client tokens, at most 100 pages.
    pub fn for_region(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            endpoint_url: None,
            validation_mode: ValidationMode::Strict,
            auto_client_token: true,
            max_pages: 100,
        }
    }

    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .ok_or(ConfigError::MissingConfigPath)?;
        let mut config = Self::from_path(&path)?;
        config.apply_env_overrides()?;
        config.validate()?;
        tracing::debug!(
            path = %path.display(),
            region = %config.region,
            validation_mode = config.validation_mode.as_str(),
            "loaded SDK configuration"
        );
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: SdkConfig = toml::from_str(contents)?;
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(region) = lookup(REGION_ENV) {
            self.region = region;
        }
        if let Some(endpoint) = lookup(ENDPOINT_URL_ENV) {
            self.endpoint_url = Some(endpoint).filter(|value| !value.trim().is_empty());
        }
        if let Some(mode) = lookup(VALIDATION_MODE_ENV) {
            self.validation_mode =
                ValidationMode::from_str_value(&mode).ok_or_else(|| ConfigError::InvalidValue {
                    field: "validation_mode",
                    value: mode.clone(),
                    reason: "expected 'off' or 'strict'".to_string(),
                })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.region.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "region",
                value: self.region.clone(),
                reason: "must not be empty".to_string(),
            });
        }
        if let Some(endpoint) = &self.endpoint_url {
            if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                return Err(ConfigError::InvalidValue {
                    field: "endpoint_url",
                    value: endpoint.clone(),
                    reason: "must be an http or https URL".to_string(),
                });
            }
        }
        if self.max_pages == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_pages",
                value: self.max_pages.to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Base URL requests are sent to.
    pub fn endpoint(&self) -> String {
        match &self.endpoint_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://connect.{}.amazonaws.com", self.region),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SAMPLE: &str = r#"
region = "us-west-2"
validation_mode = "strict"
auto_client_token = true
max_pages = 10
"#;

    #[test]
    fn test_parse_minimal_file() {
        let config = SdkConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.region, "us-west-2");
        assert_eq!(config.endpoint_url, None);
        assert_eq!(config.validation_mode, ValidationMode::Strict);
        assert_eq!(config.endpoint(), "https://connect.us-west-2.amazonaws.com");
        config.validate().unwrap();
    }

    #[test]
    fn test_unknown_field_rejected() {
        let contents = format!("{}\nretries = 3\n", SAMPLE);
        assert!(matches!(
            SdkConfig::from_toml_str(&contents),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (REGION_ENV, "eu-central-1"),
            (ENDPOINT_URL_ENV, "http://localhost:4566/"),
            (VALIDATION_MODE_ENV, "OFF"),
        ]
        .into_iter()
        .collect();
        let mut config = SdkConfig::from_toml_str(SAMPLE).unwrap();
        config
            .apply_overrides(|key| env.get(key).map(|value| value.to_string()))
            .unwrap();
        assert_eq!(config.region, "eu-central-1");
        assert_eq!(config.validation_mode, ValidationMode::Off);
        assert_eq!(config.endpoint(), "http://localhost:4566");
    }

    #[test]
    fn test_bad_validation_mode_override() {
        let mut config = SdkConfig::for_region("us-east-1");
        let err = config
            .apply_overrides(|key| (key == VALIDATION_MODE_ENV).then(|| "loose".to_string()))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "validation_mode",
                ..
            }
        ));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = SdkConfig::for_region("  ");
        assert!(config.validate().is_err());

        config.region = "us-east-1".to_string();
        config.endpoint_url = Some("ftp://example.com".to_string());
        assert!(config.validate().is_err());

        config.endpoint_url = None;
        config.max_pages = 0;
        assert!(config.validate().is_err());

        config.max_pages = 1;
        assert!(config.validate().is_ok());
    }
}
