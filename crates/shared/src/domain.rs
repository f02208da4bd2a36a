use serde::{Deserialize, Serialize};

/// Models offered by the backend, in server order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub names: Vec<String>,
    pub default_name: String,
}

impl ModelInfo {
    pub fn is_default(&self, name: &str) -> bool {
        self.default_name == name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceResult {
    pub labels: Vec<String>,
    pub output_image_path: String,
}

/// One persisted inference run. `timestamp` is kept as the server sent it
/// and only interpreted when rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: i64,
    pub timestamp: String,
    pub model: String,
    pub filename: String,
    #[serde(default)]
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelVisibility {
    #[default]
    Hidden,
    Visible,
}

impl PanelVisibility {
    pub fn is_visible(self) -> bool {
        self == Self::Visible
    }
}
