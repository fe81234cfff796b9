//! Normalized error type for all SDK operations.
//!
//! Every failure a caller can observe - transport failures, HTTP error
//! responses, local validation, credential store trouble - is folded into
//! the single `AuthError` shape before it leaves the crate. Callers never
//! see a raw `reqwest::Error`.

use std::collections::HashMap;

use serde::Deserialize;

use crate::auth::store::StoreError;

/// Result alias used by every public operation in the SDK.
pub type AuthResult<T> = Result<T, AuthError>;

/// Machine-readable error codes.
///
/// Server-supplied codes pass through verbatim; these constants cover the
/// locally-assigned ones (transport classification, validation, storage).
pub mod codes {
    pub const BAD_REQUEST: &str = "bad_request";
    pub const UNAUTHORIZED: &str = "unauthorized";
    pub const FORBIDDEN: &str = "forbidden";
    pub const NOT_FOUND: &str = "not_found";
    pub const RATE_LIMITED: &str = "rate_limited";
    pub const SERVER_ERROR: &str = "server_error";
    pub const HTTP_ERROR: &str = "http_error";
    pub const NETWORK_ERROR: &str = "network_error";
    pub const NETWORK_TIMEOUT: &str = "network_timeout";
    pub const NETWORK_UNREACHABLE: &str = "network_unreachable";
    pub const INVALID_RESPONSE: &str = "invalid_response";
    pub const VALIDATION_FAILED: &str = "validation_failed";
    pub const STORAGE_ERROR: &str = "storage_error";
}

/// Maximum length of a response body quoted in an error message
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Error returned by every SDK operation.
///
/// Equality is defined by `code` alone: two errors with the same code but
/// different messages or details compare equal. This is a documented
/// invariant of the API, not an oversight.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{code}: {message}")]
pub struct AuthError {
    /// Machine-readable code, see [`codes`]
    pub code: String,
    /// Human-readable description
    pub message: String,
    /// Field-to-message mapping, populated for validation errors
    pub details: Option<HashMap<String, String>>,
}

impl PartialEq for AuthError {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for AuthError {}

/// Structured error body the server may send alongside a non-2xx status
#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: Option<String>,
    details: Option<HashMap<String, String>>,
}

impl AuthError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Truncate a response body so error messages stay readable.
    /// The cut backs off to a char boundary so multibyte bodies can't
    /// split a character.
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut cut = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        format!(
            "{}... (truncated, {} total bytes)",
            &body[..cut],
            body.len()
        )
    }

    /// Default code for a status the server didn't classify itself
    fn code_for_status(status: reqwest::StatusCode) -> &'static str {
        match status.as_u16() {
            400 => codes::BAD_REQUEST,
            401 => codes::UNAUTHORIZED,
            403 => codes::FORBIDDEN,
            404 => codes::NOT_FOUND,
            429 => codes::RATE_LIMITED,
            500..=599 => codes::SERVER_ERROR,
            _ => codes::HTTP_ERROR,
        }
    }

    /// Normalize an HTTP error response.
    ///
    /// The body is expected to look like `{code?, message?, details?}`;
    /// absent fields are defaulted (code from the status classification
    /// table, message to a generic string quoting the body).
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let parsed: Option<ErrorBody> = serde_json::from_str(body).ok();
        let (code, message, details) = match parsed {
            Some(b) => (b.code, b.message, b.details),
            None => (None, None, None),
        };
        Self {
            code: code.unwrap_or_else(|| Self::code_for_status(status).to_string()),
            message: message.unwrap_or_else(|| {
                format!("Request failed with status {}: {}", status, Self::truncate_body(body))
            }),
            details,
        }
    }

    /// Classify a transport-level failure (never reached the HTTP layer,
    /// or the connection died mid-exchange)
    pub fn from_transport(err: &reqwest::Error) -> Self {
        let code = if err.is_timeout() {
            codes::NETWORK_TIMEOUT
        } else if err.is_connect() {
            codes::NETWORK_UNREACHABLE
        } else {
            codes::NETWORK_ERROR
        };
        Self::new(code, err.to_string())
    }

    /// Local validation failure; `details` maps field name to message.
    /// Never sent over the wire.
    pub fn validation(details: HashMap<String, String>) -> Self {
        Self {
            code: codes::VALIDATION_FAILED.to_string(),
            message: "Validation failed".to_string(),
            details: Some(details),
        }
    }

    /// A response that came back 2xx but couldn't be interpreted
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(codes::INVALID_RESPONSE, message)
    }
}

/// Credential store failures surface with their own code so they can never
/// be confused with an authentication failure or with "no token stored".
impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        Self::new(codes::STORAGE_ERROR, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_is_code_only() {
        let a = AuthError::new("X", "a");
        let b = AuthError::new("X", "b");
        let c = AuthError::new("Y", "a");
        assert_eq!(a, b);
        assert_ne!(a, c);

        let mut details = HashMap::new();
        details.insert("email".to_string(), "bad".to_string());
        let d = AuthError {
            code: "X".to_string(),
            message: "other".to_string(),
            details: Some(details),
        };
        assert_eq!(a, d);
    }

    #[test]
    fn test_from_status_uses_server_code() {
        let err = AuthError::from_status(
            reqwest::StatusCode::BAD_REQUEST,
            r#"{"code":"INVALID_EMAIL","message":"bad email"}"#,
        );
        assert_eq!(err.code, "INVALID_EMAIL");
        assert_eq!(err.message, "bad email");
    }

    #[test]
    fn test_from_status_defaults_absent_fields() {
        let err = AuthError::from_status(reqwest::StatusCode::UNAUTHORIZED, "");
        assert_eq!(err.code, codes::UNAUTHORIZED);
        assert!(err.message.contains("401"));
        assert!(err.details.is_none());
    }

    #[test]
    fn test_from_status_classification_table() {
        let cases = [
            (400, codes::BAD_REQUEST),
            (401, codes::UNAUTHORIZED),
            (403, codes::FORBIDDEN),
            (404, codes::NOT_FOUND),
            (429, codes::RATE_LIMITED),
            (500, codes::SERVER_ERROR),
            (503, codes::SERVER_ERROR),
            (418, codes::HTTP_ERROR),
        ];
        for (status, code) in cases {
            let status = reqwest::StatusCode::from_u16(status).unwrap();
            assert_eq!(AuthError::from_status(status, "{}").code, code);
        }
    }

    #[test]
    fn test_from_status_parses_details() {
        let err = AuthError::from_status(
            reqwest::StatusCode::BAD_REQUEST,
            r#"{"code":"VALIDATION","details":{"email":"required"}}"#,
        );
        let details = err.details.expect("details should be present");
        assert_eq!(details.get("email").map(String::as_str), Some("required"));
    }

    #[test]
    fn test_store_error_maps_to_storage_code() {
        let err: AuthError = StoreError::Unavailable("keystore locked".to_string()).into();
        assert_eq!(err.code, codes::STORAGE_ERROR);
        assert_ne!(err, AuthError::new(codes::UNAUTHORIZED, ""));
    }

    #[test]
    fn test_truncates_long_bodies() {
        let body = "x".repeat(2000);
        let err = AuthError::from_status(reqwest::StatusCode::IM_A_TEAPOT, &body);
        assert!(err.message.len() < 700);
        assert!(err.message.contains("truncated"));
    }

    #[test]
    fn test_truncation_backs_off_to_char_boundary() {
        // "日" starts at byte 499 and spans bytes 499..502, straddling the
        // truncation offset
        let body = format!("{}日本語", "a".repeat(499));
        let err = AuthError::from_status(reqwest::StatusCode::INTERNAL_SERVER_ERROR, &body);
        assert!(err.message.contains("truncated"));
        assert!(err.message.contains(&format!("{} total bytes", body.len())));
    }

    #[test]
    fn test_truncation_keeps_whole_multibyte_chars() {
        let body = "日".repeat(300);
        let err = AuthError::from_status(reqwest::StatusCode::INTERNAL_SERVER_ERROR, &body);
        // 500 is not a multiple of 3, so the cut must land short of it
        assert!(err.message.contains("truncated"));
        assert!(err.message.matches('日').count() < 300);
    }
}
