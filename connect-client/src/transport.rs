//! Transport seam
//!
//! The client never speaks HTTP itself. It hands a fully serialized
//! [`OperationCall`] to a [`Transport`], which owns request construction,
//! signing, retries and connection reuse, and gets back either a success
//! body or the raw error payload.

use async_trait::async_trait;
use std::collections::BTreeMap;

/// One serialized operation ready for dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationCall {
    pub operation: &'static str,
    pub endpoint: String,
    pub body: serde_json::Value,
}

/// What came back from the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportResponse {
    Success {
        body: Vec<u8>,
    },
    Error {
        status: u16,
        headers: BTreeMap<String, String>,
        body: Vec<u8>,
    },
}

impl TransportResponse {
    pub fn success(body: impl Into<Vec<u8>>) -> Self {
        TransportResponse::Success { body: body.into() }
    }

    pub fn error(status: u16, body: impl Into<Vec<u8>>) -> Self {
        TransportResponse::Error {
            status,
            headers: BTreeMap::new(),
            body: body.into(),
        }
    }

    /// Adds a response header; only meaningful on error responses.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let TransportResponse::Error { headers, .. } = &mut self {
            headers.insert(name.into(), value.into());
        }
        self
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        match self {
            TransportResponse::Error { headers, .. } => header_value(headers, name),
            TransportResponse::Success { .. } => None,
        }
    }
}

pub(crate) fn header_value<'a>(headers: &'a BTreeMap<String, String>, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// The request never produced a service response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct TransportError {
    pub reason: String,
}

impl TransportError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn invoke(&self, call: OperationCall) -> Result<TransportResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn invoke(&self, call: OperationCall) -> Result<TransportResponse, TransportError> {
        (**self).invoke(call).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lookup_ignores_case() {
        let response = TransportResponse::error(403, "{}")
            .with_header("X-Amzn-ErrorType", "DestinationNotAllowedException");
        assert_eq!(
            response.header("x-amzn-errortype"),
            Some("DestinationNotAllowedException")
        );
        assert_eq!(response.header("content-type"), None);
    }

    #[test]
    fn test_success_has_no_headers() {
        let response = TransportResponse::success("{}").with_header("a", "b");
        assert_eq!(response, TransportResponse::success("{}"));
    }
}
