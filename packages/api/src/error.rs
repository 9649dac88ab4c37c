//! Error type shared by every backend and identity provider call.

use thiserror::Error;

/// Failure of a request against the backend or the identity provider.
///
/// Messages are meant to be shown to the user as-is: `Status` carries the
/// backend's own `message` field when it sent one.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Your session has expired, please sign in again")]
    Unauthorized,

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("{0}")]
    Identity(String),

    #[error("You need to sign in first")]
    NotSignedIn,
}

impl ApiError {
    /// Build a `Status` error from a response body, preferring its `message`.
    pub(crate) fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("Request failed with status {status}"));
        ApiError::Status { status, message }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_prefers_backend_message() {
        let err = ApiError::from_status(403, r#"{"message":"forbidden access"}"#);
        assert_eq!(err.to_string(), "forbidden access");
        assert!(matches!(err, ApiError::Status { status: 403, .. }));
    }

    #[test]
    fn test_status_falls_back_on_plain_body() {
        let err = ApiError::from_status(500, "Internal Server Error");
        assert_eq!(err.to_string(), "Request failed with status 500");

        let err = ApiError::from_status(404, r#"{"message":""}"#);
        assert_eq!(err.to_string(), "Request failed with status 404");
    }
}
