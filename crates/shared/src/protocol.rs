//! Wire bodies of the detection backend endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::{HistoryRecord, InferenceResult, ModelInfo};

/// `GET /models`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsResponse {
    pub models: Vec<String>,
    pub default: String,
}

impl From<ModelsResponse> for ModelInfo {
    fn from(value: ModelsResponse) -> Self {
        Self {
            names: value.models,
            default_name: value.default,
        }
    }
}

/// `POST /infer?model=<name>`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferResponse {
    pub labels: Vec<String>,
    pub output_image: String,
}

impl From<InferResponse> for InferenceResult {
    fn from(value: InferResponse) -> Self {
        Self {
            labels: value.labels,
            output_image_path: value.output_image,
        }
    }
}

/// `GET /history`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub history: Vec<HistoryRecord>,
}

/// `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

pub const INFER_FILE_FIELD: &str = "file";
pub const INFER_MODEL_PARAM: &str = "model";
