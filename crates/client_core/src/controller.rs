use shared::{
    domain::{InferenceResult, ModelInfo},
    error::InferenceError,
};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::{
    error::DetectError,
    state::{AppState, RequestGeneration},
    surface::{Panel, ScrollBehavior, UiSurface},
    transport::{DetectApi, ImageUpload},
    view::{self, ViewSettings},
};

pub const NO_FILE_SELECTED: &str = "이미지를 선택해주세요";
pub const INFER_ERROR_PREFIX: &str = "서버 오류: ";
pub const INFER_MALFORMED_RESPONSE: &str = "응답 형식 오류";
pub const INFER_NETWORK_ERROR: &str = "추론 요청 중 네트워크 오류";
pub const HISTORY_LOAD_ERROR: &str = "이력 로딩 중 오류";
pub const HISTORY_NETWORK_ERROR: &str = "이력 로딩 중 네트워크 오류";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InferOutcome {
    Rendered(InferenceResult),
    MissingFile,
    Rejected(InferenceError),
    Failed(String),
    /// A newer submission was issued while this one was in flight.
    Superseded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryOutcome {
    Hidden,
    Revealed { rows: usize },
    Failed,
    Superseded,
}

/// Drives the model list, inference and history flows over one [`AppState`].
///
/// The state lock is never held across a network call, so flows interleave
/// freely; stale responses are dropped by generation.
pub struct DetectController<A: DetectApi, S: UiSurface> {
    api: A,
    surface: S,
    view: ViewSettings,
    state: Mutex<AppState>,
}

impl<A: DetectApi, S: UiSurface> DetectController<A, S> {
    pub fn new(api: A, surface: S, view: ViewSettings) -> Self {
        Self {
            api,
            surface,
            view,
            state: Mutex::new(AppState::default()),
        }
    }

    pub async fn snapshot(&self) -> AppState {
        self.state.lock().await.clone()
    }

    /// Populates the model options once at startup. Failures leave the
    /// options empty and are not shown to the user.
    pub async fn load_models(&self) -> Result<ModelInfo, DetectError> {
        match self.api.fetch_models().await {
            Ok(info) => {
                self.state.lock().await.apply_model_info(&info);
                info!(
                    models = info.names.len(),
                    default = %info.default_name,
                    "models: options populated"
                );
                Ok(info)
            }
            Err(err) => {
                warn!("models: failed to load model list: {err}");
                Err(err)
            }
        }
    }

    pub async fn select_model(&self, name: &str) -> Result<(), DetectError> {
        self.state.lock().await.select_model(name)
    }

    pub async fn submit(&self, file: Option<ImageUpload>) -> InferOutcome {
        let Some(upload) = file else {
            self.surface.notify(NO_FILE_SELECTED);
            return InferOutcome::MissingFile;
        };

        let (generation, model) = {
            let mut guard = self.state.lock().await;
            let generation = guard.begin_inference();
            (generation, guard.selected_model.clone().unwrap_or_default())
        };
        info!(
            generation = generation.0,
            model = %model,
            filename = %upload.filename,
            "infer: submitting"
        );

        let response = self.api.submit_inference(&model, upload).await;

        let mut guard = self.state.lock().await;
        if !guard.is_current_inference(generation) {
            info!(generation = generation.0, "infer: discarding superseded response");
            return InferOutcome::Superseded;
        }

        match response {
            Ok(result) => {
                let markup = view::render_result(
                    &result.labels,
                    &result.output_image_path,
                    &self.view.output_prefix,
                );
                guard.show_result(result.clone(), markup);
                info!(
                    generation = generation.0,
                    labels = result.labels.len(),
                    output_image = %result.output_image_path,
                    "infer: result rendered"
                );
                InferOutcome::Rendered(result)
            }
            Err(err) => {
                drop(guard);
                self.report_inference_failure(err)
            }
        }
    }

    fn report_inference_failure(&self, err: DetectError) -> InferOutcome {
        if let Some(rejection) = err.as_inference_error() {
            warn!("infer: server rejected request: {err} ({rejection})");
            self.surface
                .notify(&format!("{INFER_ERROR_PREFIX}{}", rejection.message));
            return InferOutcome::Rejected(rejection);
        }
        error!("infer: request failed: {err}");
        match err {
            DetectError::Decode(_) => self
                .surface
                .notify(&format!("{INFER_ERROR_PREFIX}{INFER_MALFORMED_RESPONSE}")),
            _ => self.surface.notify(INFER_NETWORK_ERROR),
        }
        InferOutcome::Failed(err.to_string())
    }

    /// Hides a visible history panel, otherwise fetches and reveals it.
    pub async fn toggle_history(&self) -> HistoryOutcome {
        {
            let mut guard = self.state.lock().await;
            if guard.history_visible() {
                guard.hide_history();
                info!("history: panel hidden");
                return HistoryOutcome::Hidden;
            }
        }
        self.fetch_history().await
    }

    pub async fn fetch_history(&self) -> HistoryOutcome {
        let generation = self.state.lock().await.begin_history_fetch();

        let records = match self.api.fetch_history().await {
            Ok(records) => records,
            Err(err) => return self.report_history_failure(generation, err).await,
        };

        let mut guard = self.state.lock().await;
        if !guard.is_current_history_fetch(generation) {
            info!(generation = generation.0, "history: discarding stale response");
            return HistoryOutcome::Superseded;
        }
        let rows = records.len();
        let markup = view::render_history(&records, self.view.display_offset);
        guard.reveal_history(records, markup);
        drop(guard);

        info!(generation = generation.0, rows, "history: panel revealed");
        self.surface
            .scroll_into_view(Panel::History, ScrollBehavior::Smooth);
        HistoryOutcome::Revealed { rows }
    }

    async fn report_history_failure(
        &self,
        generation: RequestGeneration,
        err: DetectError,
    ) -> HistoryOutcome {
        if !self.state.lock().await.is_current_history_fetch(generation) {
            info!(generation = generation.0, "history: discarding stale failure");
            return HistoryOutcome::Superseded;
        }
        match err {
            DetectError::Rejected { status, .. } => {
                warn!(status, "history: server rejected request");
                self.surface.notify(HISTORY_LOAD_ERROR);
            }
            err => {
                error!("history: network failure: {err}");
                self.surface.notify(HISTORY_NETWORK_ERROR);
            }
        }
        HistoryOutcome::Failed
    }
}
