//! Service faults
//!
//! Faults are conditions reported by the service itself, as opposed to
//! client-side validation failures. Each known error code has its own
//! variant carrying the service's message; anything unrecognized lands in
//! [`ConnectFault::Unknown`] with the raw code preserved.

use serde::Deserialize;
use thiserror::Error;

/// Response header that carries the error code, when present.
pub const ERROR_TYPE_HEADER: &str = "x-amzn-ErrorType";

const UNKNOWN_ERROR_CODE: &str = "UnknownError";

macro_rules! connect_faults {
    ($(
        $(#[$doc:meta])*
        $Variant:ident => $code:tt, status $status:expr, retryable $retryable:expr;
    )*) => {
        /// A fault reported by the service.
        #[derive(Debug, Clone, Error, PartialEq, Eq)]
        pub enum ConnectFault {
            $(
                $(#[$doc])*
                #[error("{}: {}", $code, .message)]
                $Variant { message: String },
            )*

            /// An error code this SDK does not recognize.
            #[error("{code}: {message}")]
            Unknown { code: String, message: String },
        }

        impl ConnectFault {
            /// Builds the fault for a (sanitized) error code.
            pub fn from_code(code: &str, message: impl Into<String>) -> Self {
                let message = message.into();
                match code {
                    $( $code => ConnectFault::$Variant { message }, )*
                    other => ConnectFault::Unknown {
                        code: other.to_string(),
                        message,
                    },
                }
            }

            pub fn code(&self) -> &str {
                match self {
                    $( ConnectFault::$Variant { .. } => $code, )*
                    ConnectFault::Unknown { code, .. } => code,
                }
            }

            pub fn message(&self) -> &str {
                match self {
                    $( ConnectFault::$Variant { message } )|*
                    | ConnectFault::Unknown { message, .. } => message,
                }
            }

            /// HTTP status the service documents for this fault.
            pub fn http_status(&self) -> Option<u16> {
                match self {
                    $( ConnectFault::$Variant { .. } => Some($status), )*
                    ConnectFault::Unknown { .. } => None,
                }
            }

            /// Whether resending the same request may succeed. Informational;
            /// nothing in this SDK retries.
            pub fn is_retryable(&self) -> bool {
                match self {
                    $( ConnectFault::$Variant { .. } => $retryable, )*
                    ConnectFault::Unknown { .. } => false,
                }
            }
        }
    };
}

connect_faults! {
    /// Caller lacks permission for the action.
    AccessDenied => "AccessDeniedException", status 403, retryable false;
    Conflict => "ConflictException", status 409, retryable false;
    /// The flow has not been published.
    ContactFlowNotPublished => "ContactFlowNotPublishedException", status 400, retryable false;
    /// The contact is no longer active.
    ContactNotFound => "ContactNotFoundException", status 410, retryable false;
    /// Outbound calls to the destination phone number are not allowed.
    DestinationNotAllowed => "DestinationNotAllowedException", status 403, retryable false;
    DuplicateResource => "DuplicateResourceException", status 409, retryable false;
    /// A different request was already sent with the same client token.
    Idempotency => "IdempotencyException", status 409, retryable false;
    InternalService => "InternalServiceException", status 500, retryable true;
    InvalidContactFlow => "InvalidContactFlowException", status 400, retryable false;
    InvalidParameter => "InvalidParameterException", status 400, retryable false;
    InvalidRequest => "InvalidRequestException", status 400, retryable false;
    /// The allowed limit for the resource has been exceeded.
    LimitExceeded => "LimitExceededException", status 429, retryable false;
    /// The contact is not permitted.
    OutboundContactNotPermitted => "OutboundContactNotPermittedException", status 403, retryable false;
    PropertyValidation => "PropertyValidationException", status 400, retryable false;
    ResourceConflict => "ResourceConflictException", status 409, retryable false;
    ResourceInUse => "ResourceInUseException", status 409, retryable false;
    ResourceNotFound => "ResourceNotFoundException", status 404, retryable false;
    ResourceNotReady => "ResourceNotReadyException", status 409, retryable true;
    ServiceQuotaExceeded => "ServiceQuotaExceededException", status 402, retryable false;
    /// The throttling limit has been exceeded.
    Throttling => "ThrottlingException", status 429, retryable true;
    UserNotFound => "UserNotFoundException", status 404, retryable false;
}

/// Reduces a raw error type to its bare code.
///
/// Strips a namespace prefix (`aws.connect#`) and any `:`-suffixed detail,
/// so `aws.connect#ThrottlingException:http://...` becomes
/// `ThrottlingException`.
pub fn sanitize_error_code(raw: &str) -> &str {
    let without_namespace = raw.rsplit('#').next().unwrap_or(raw);
    let without_detail = without_namespace.split(':').next().unwrap_or(without_namespace);
    without_detail.trim()
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(rename = "__type")]
    error_type: Option<String>,
    code: Option<String>,
    message: Option<String>,
    #[serde(rename = "Message")]
    capitalized_message: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> String {
        self.message.or(self.capitalized_message).unwrap_or_default()
    }
}

/// Decodes an error response into a fault.
///
/// The code comes from the `x-amzn-ErrorType` header when present,
/// otherwise from the body's `__type` or `code` member. A body that is not
/// JSON still yields a fault, with an empty message.
pub fn decode_fault(status: u16, error_type_header: Option<&str>, body: &[u8]) -> ConnectFault {
    let parsed: ErrorBody = if body.is_empty() {
        ErrorBody::default()
    } else {
        serde_json::from_slice(body).unwrap_or_else(|e| {
            tracing::debug!(status, error = %e, "error body is not JSON");
            ErrorBody::default()
        })
    };

    let raw_code = error_type_header
        .filter(|value| !value.trim().is_empty())
        .or(parsed.error_type.as_deref())
        .or(parsed.code.as_deref())
        .unwrap_or(UNKNOWN_ERROR_CODE);
    let code = match sanitize_error_code(raw_code) {
        "" => UNKNOWN_ERROR_CODE,
        code => code,
    }
    .to_string();

    let fault = ConnectFault::from_code(&code, parsed.into_message());
    tracing::debug!(status, code = fault.code(), "decoded service fault");
    fault
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_error_code() {
        assert_eq!(sanitize_error_code("ThrottlingException"), "ThrottlingException");
        assert_eq!(
            sanitize_error_code("aws.connect#DestinationNotAllowedException"),
            "DestinationNotAllowedException"
        );
        assert_eq!(
            sanitize_error_code("ThrottlingException:http://internal.amazon.com/"),
            "ThrottlingException"
        );
        assert_eq!(sanitize_error_code(" AccessDeniedException "), "AccessDeniedException");
    }

    #[test]
    fn test_header_wins_over_body() {
        let body = br#"{"__type":"InvalidRequestException","message":"bad"}"#;
        let fault = decode_fault(403, Some("DestinationNotAllowedException"), body);
        assert_eq!(
            fault,
            ConnectFault::DestinationNotAllowed {
                message: "bad".to_string()
            }
        );
        assert_eq!(fault.http_status(), Some(403));
    }

    #[test]
    fn test_body_type_and_capitalized_message() {
        let body = br#"{"__type":"aws.connect#ThrottlingException","Message":"slow down"}"#;
        let fault = decode_fault(429, None, body);
        assert_eq!(fault.code(), "ThrottlingException");
        assert_eq!(fault.message(), "slow down");
        assert!(fault.is_retryable());
    }

    #[test]
    fn test_both_message_spellings_keep_the_code() {
        let body = br#"{"__type":"ThrottlingException","message":"lower","Message":"upper"}"#;
        let fault = decode_fault(429, None, body);
        assert_eq!(fault.code(), "ThrottlingException");
        assert_eq!(fault.message(), "lower");
        assert!(fault.is_retryable());
    }

    #[test]
    fn test_body_code_member() {
        let body = br#"{"code":"UserNotFoundException","message":"who"}"#;
        assert!(matches!(
            decode_fault(404, None, body),
            ConnectFault::UserNotFound { .. }
        ));
    }

    #[test]
    fn test_unrecognized_code_is_preserved() {
        let fault = decode_fault(400, Some("BrandNewException"), b"{}");
        assert_eq!(
            fault,
            ConnectFault::Unknown {
                code: "BrandNewException".to_string(),
                message: String::new()
            }
        );
        assert_eq!(fault.http_status(), None);
    }

    #[test]
    fn test_garbage_body_falls_back_to_unknown_error() {
        let fault = decode_fault(502, None, b"<html>gateway</html>");
        assert_eq!(fault.code(), "UnknownError");
        assert!(!fault.is_retryable());
    }

    #[test]
    fn test_display_includes_code_and_message() {
        let fault = ConnectFault::from_code("DestinationNotAllowedException", "no calls to +1555");
        assert_eq!(
            fault.to_string(),
            "DestinationNotAllowedException: no calls to +1555"
        );
    }
}
