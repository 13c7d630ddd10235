//! Error types for model construction, validation and configuration

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while mutating a shape.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("Duplicated keys ({key}) are provided for {field}")]
    DuplicateMapKey { field: &'static str, key: String },
}

/// Client-side constraint violations.
///
/// Shapes never validate on assignment; these come out of an explicit
/// [`crate::Validate::validate`] call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    RequiredFieldMissing { field: String },

    #[error("Length of {field} is {len}, expected {min}..={max}")]
    LengthOutOfRange {
        field: String,
        len: usize,
        min: usize,
        max: usize,
    },

    #[error("Value of {field} is {value}, expected {min}..={max}")]
    ValueOutOfRange {
        field: String,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("{field} has {count} items, at most {max} allowed")]
    TooManyItems {
        field: String,
        count: usize,
        max: usize,
    },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

impl ValidationError {
    /// Name of the offending field, as a dotted wire path.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::RequiredFieldMissing { field }
            | ValidationError::LengthOutOfRange { field, .. }
            | ValidationError::ValueOutOfRange { field, .. }
            | ValidationError::TooManyItems { field, .. }
            | ValidationError::InvalidValue { field, .. } => field,
        }
    }

    /// Re-roots the error under a parent field, e.g. `Threshold` becomes
    /// `Metrics[2].Threshold`.
    pub fn within(mut self, parent: &str) -> Self {
        let field = match &mut self {
            ValidationError::RequiredFieldMissing { field }
            | ValidationError::LengthOutOfRange { field, .. }
            | ValidationError::ValueOutOfRange { field, .. }
            | ValidationError::TooManyItems { field, .. }
            | ValidationError::InvalidValue { field, .. } => field,
        };
        *field = format!("{}.{}", parent, field);
        self
    }

    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration file path (set CONNECT_SDK_CONFIG)")]
    MissingConfigPath,

    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config value for {field}: {value} - {reason}")]
    InvalidValue {
        field: &'static str,
        value: String,
        reason: String,
    },
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_key_display() {
        let err = ModelError::DuplicateMapKey {
            field: "Tags",
            key: "team".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Duplicated keys (team)"));
        assert!(msg.contains("Tags"));
    }

    #[test]
    fn test_validation_error_display_length() {
        let err = ValidationError::LengthOutOfRange {
            field: "InstanceId".to_string(),
            len: 0,
            min: 1,
            max: 100,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("InstanceId"));
        assert!(msg.contains("1..=100"));
    }

    #[test]
    fn test_validation_error_within_prefixes_path() {
        let err = ValidationError::RequiredFieldMissing {
            field: "Name".to_string(),
        }
        .within("Metrics[1]")
        .within("Request");
        assert_eq!(err.field(), "Request.Metrics[1].Name");
    }

    #[test]
    fn test_config_error_display_invalid_value() {
        let err = ConfigError::InvalidValue {
            field: "endpoint_url",
            value: "ftp://x".to_string(),
            reason: "must be http or https".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("endpoint_url"));
        assert!(msg.contains("ftp://x"));
        assert!(msg.contains("must be http or https"));
    }
}
