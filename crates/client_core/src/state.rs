//! Application state of record. Panels hold rendered markup; nothing here
//! performs I/O.

use shared::domain::{HistoryRecord, InferenceResult, ModelInfo, ModelOption, PanelVisibility};

use crate::{error::DetectError, view};

/// Token handed out when a flow issues a request; only the latest one may
/// apply its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct RequestGeneration(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultPanel {
    pub result: InferenceResult,
    pub markup: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryPanel {
    pub visibility: PanelVisibility,
    pub records: Vec<HistoryRecord>,
    pub markup: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub model_options: Vec<ModelOption>,
    pub selected_model: Option<String>,
    pub result: Option<ResultPanel>,
    pub history: HistoryPanel,
    infer_generation: RequestGeneration,
    history_generation: RequestGeneration,
}

impl AppState {
    pub fn apply_model_info(&mut self, info: &ModelInfo) {
        self.model_options = view::render_model_options(&info.names, &info.default_name);
        self.selected_model = Some(info.default_name.clone());
    }

    pub fn select_model(&mut self, name: &str) -> Result<(), DetectError> {
        if !self.model_options.iter().any(|option| option.value == name) {
            return Err(DetectError::Validation(format!("unknown model '{name}'")));
        }
        self.selected_model = Some(name.to_string());
        Ok(())
    }

    pub fn begin_inference(&mut self) -> RequestGeneration {
        self.infer_generation.0 += 1;
        self.infer_generation
    }

    pub fn is_current_inference(&self, generation: RequestGeneration) -> bool {
        self.infer_generation == generation
    }

    /// Replaces the result panel and then hides history.
    pub fn show_result(&mut self, result: InferenceResult, markup: String) {
        self.result = Some(ResultPanel { result, markup });
        self.hide_history_for_result();
    }

    /// Cross-panel rule: a freshly shown result always closes the history
    /// panel, including a reveal that is still waiting on the network.
    pub fn hide_history_for_result(&mut self) {
        self.history.visibility = PanelVisibility::Hidden;
        self.history_generation.0 += 1;
    }

    pub fn begin_history_fetch(&mut self) -> RequestGeneration {
        self.history_generation.0 += 1;
        self.history_generation
    }

    pub fn is_current_history_fetch(&self, generation: RequestGeneration) -> bool {
        self.history_generation == generation
    }

    pub fn reveal_history(&mut self, records: Vec<HistoryRecord>, markup: String) {
        self.history.records = records;
        self.history.markup = Some(markup);
        self.history.visibility = PanelVisibility::Visible;
    }

    pub fn hide_history(&mut self) {
        self.history.visibility = PanelVisibility::Hidden;
    }

    pub fn history_visible(&self) -> bool {
        self.history.visibility.is_visible()
    }
}
