use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body returned by the backend alongside a non-2xx status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
        }
    }

    /// Parses an error body leniently: anything that is not a JSON object
    /// with a string `error` field yields an empty error.
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    pub fn message(&self) -> Option<&str> {
        self.error.as_deref().filter(|message| !message.is_empty())
    }
}

/// Inference rejection shown once to the user and then dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct InferenceError {
    pub message: String,
}

impl InferenceError {
    /// Prefers the server-provided message, falling back to the status code.
    pub fn from_response(status: u16, body: &ApiError) -> Self {
        let message = body
            .message()
            .map(str::to_string)
            .unwrap_or_else(|| status.to_string());
        Self { message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inference_error_prefers_server_message() {
        let body = ApiError::from_body(br#"{"error":"model not found"}"#);
        let err = InferenceError::from_response(404, &body);
        assert_eq!(err.message, "model not found");
    }

    #[test]
    fn inference_error_falls_back_to_status_code() {
        let body = ApiError::from_body(b"<html>Internal Server Error</html>");
        assert!(body.error.is_none());
        let err = InferenceError::from_response(500, &body);
        assert_eq!(err.to_string(), "500");
    }

    #[test]
    fn empty_error_field_counts_as_missing() {
        let body = ApiError::from_body(br#"{"error":""}"#);
        assert_eq!(InferenceError::from_response(422, &body).message, "422");
    }
}
