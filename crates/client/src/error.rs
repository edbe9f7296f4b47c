//! Client error types and error body unwrapping.

use serde_json::Value;
use thiserror::Error;

/// Message used when an error response carries nothing readable.
pub const GENERIC_ERROR_MESSAGE: &str = "Request failed";

/// Errors returned by [`crate::FinancialClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure, timeout or undecodable response.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message recovered from the response body.
        message: String,
    },

    /// A token refresh was attempted without an active session.
    #[error("No active session")]
    NoSession,
}

impl ClientError {
    /// Returns the HTTP status for API errors.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Recovers a human readable message from an error response body.
///
/// JSON bodies yield their `message`, `error` or `detail` field (in that
/// order). Anything else yields the raw text, and an empty body yields
/// [`GENERIC_ERROR_MESSAGE`].
///
/// ```
/// use nepfin_client::extract_error_message;
///
/// let body = r#"{"error":"NOT_SUPPORTED","message":"pdf export is not available"}"#;
/// assert_eq!(extract_error_message(body), "pdf export is not available");
/// assert_eq!(extract_error_message("Bad Gateway"), "Bad Gateway");
/// assert_eq!(extract_error_message("  "), "Request failed");
/// ```
#[must_use]
pub fn extract_error_message(body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        let field = ["message", "error", "detail"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .filter(|s| !s.trim().is_empty());
        if let Some(message) = field {
            return message.to_string();
        }
    }

    let text = body.trim();
    if text.is_empty() {
        GENERIC_ERROR_MESSAGE.to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(r#"{"message":"Invalid month: 13"}"#, "Invalid month: 13")]
    #[case(r#"{"error":"VALIDATION_ERROR"}"#, "VALIDATION_ERROR")]
    #[case(r#"{"detail":"Not found."}"#, "Not found.")]
    #[case(r#"{"error":"E","message":"preferred"}"#, "preferred")]
    #[case("<html>502</html>", "<html>502</html>")]
    #[case("", GENERIC_ERROR_MESSAGE)]
    fn test_extract_error_message(#[case] body: &str, #[case] expected: &str) {
        assert_eq!(extract_error_message(body), expected);
    }

    #[test]
    fn test_json_without_known_fields_falls_back_to_text() {
        assert_eq!(extract_error_message(r#"{"code":1}"#), r#"{"code":1}"#);
    }

    #[test]
    fn test_status() {
        let err = ClientError::Api {
            status: 501,
            message: "x".into(),
        };
        assert_eq!(err.status(), Some(501));
        assert_eq!(ClientError::NoSession.status(), None);
    }
}
