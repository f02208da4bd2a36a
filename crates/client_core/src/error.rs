use shared::error::{ApiError, InferenceError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DetectError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("server rejected request with status {status}")]
    Rejected { status: u16, body: ApiError },
    #[error("network failure: {0}")]
    Network(String),
    #[error("malformed server response: {0}")]
    Decode(String),
    #[error("failed to read image {path}: {source}")]
    ReadImage {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl DetectError {
    /// The rejection as shown to the user, if this is a server rejection.
    pub fn as_inference_error(&self) -> Option<InferenceError> {
        match self {
            Self::Rejected { status, body } => Some(InferenceError::from_response(*status, body)),
            _ => None,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

impl From<reqwest::Error> for DetectError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Self::Decode(value.to_string())
        } else {
            Self::Network(value.to_string())
        }
    }
}

impl From<url::ParseError> for DetectError {
    fn from(value: url::ParseError) -> Self {
        Self::Config(format!("invalid endpoint url: {value}"))
    }
}
