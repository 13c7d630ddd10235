//! Client error types

use connect_core::{ConfigError, ConnectFault, ValidationError};
use thiserror::Error;

use crate::transport::TransportError;

/// Everything that can go wrong sending one operation.
#[derive(Debug, Error)]
pub enum ConnectError {
    /// Rejected before dispatch.
    #[error("Request validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Reported by the service.
    #[error("Service fault: {0}")]
    Fault(#[from] ConnectFault),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Transport error: {reason}")]
    Transport { reason: String },

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl From<TransportError> for ConnectError {
    fn from(err: TransportError) -> Self {
        ConnectError::Transport { reason: err.reason }
    }
}

impl ConnectError {
    pub fn fault(&self) -> Option<&ConnectFault> {
        match self {
            ConnectError::Fault(fault) => Some(fault),
            _ => None,
        }
    }

    /// Only service faults can be retryable; everything else is final.
    pub fn is_retryable(&self) -> bool {
        self.fault().is_some_and(ConnectFault::is_retryable)
    }
}

pub type ConnectResult<T> = Result<T, ConnectError>;

/// Failure to install the tracing subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },

    #[error("Failed to init subscriber: {0}")]
    Init(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_accessor_and_retryable() {
        let err = ConnectError::from(ConnectFault::from_code("ThrottlingException", "slow"));
        assert!(err.is_retryable());
        assert_eq!(err.fault().map(ConnectFault::code), Some("ThrottlingException"));

        let err = ConnectError::from(TransportError::new("connection reset"));
        assert!(!err.is_retryable());
        assert_eq!(err.to_string(), "Transport error: connection reset");
    }

    #[test]
    fn test_validation_display() {
        let err = ConnectError::from(ValidationError::RequiredFieldMissing {
            field: "InstanceId".to_string(),
        });
        assert!(err.to_string().contains("InstanceId"));
        assert!(err.fault().is_none());
    }
}
