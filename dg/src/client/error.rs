//! Generation client error types

use thiserror::Error;

/// Message shown when the service rejects a request without a `detail`
pub const GENERIC_FAILURE: &str = "Generation failed";

/// Errors that can occur talking to the generation service
///
/// None of these are retried; each remote call is sent exactly once.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Non-success response; `detail` comes from the response body and is shown as sent
    #[error("{detail}")]
    Remote { status: u16, detail: String },

    /// The service could not be reached
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// Build a remote error from a failed response body
    ///
    /// Uses the body's `detail` member verbatim when it is a string, and
    /// [`GENERIC_FAILURE`] otherwise.
    pub fn from_body(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
            .unwrap_or_else(|| GENERIC_FAILURE.to_string());
        ClientError::Remote { status, detail }
    }

    /// Check if the service answered with an error status
    pub fn is_remote(&self) -> bool {
        matches!(self, ClientError::Remote { .. })
    }

    /// The message a user should see
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Remote { detail, .. } => detail.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_body_uses_detail() {
        let err = ClientError::from_body(400, r#"{"detail": "Generation error: Unknown field type: foo"}"#);
        match &err {
            ClientError::Remote { status, detail } => {
                assert_eq!(*status, 400);
                assert_eq!(detail, "Generation error: Unknown field type: foo");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.user_message(), "Generation error: Unknown field type: foo");
        assert_eq!(err.to_string(), "Generation error: Unknown field type: foo");
    }

    #[test]
    fn test_from_body_falls_back() {
        for body in ["", "<html>bad gateway</html>", r#"{"error": "x"}"#, r#"{"detail": ["loc", "msg"]}"#] {
            let err = ClientError::from_body(502, body);
            assert_eq!(err.user_message(), GENERIC_FAILURE, "body {body:?}");
        }
    }

    #[test]
    fn test_is_remote() {
        assert!(ClientError::from_body(429, "").is_remote());
        assert!(!ClientError::InvalidResponse("x".to_string()).is_remote());
    }
}
