//! HTTP access to the detection backend.

use std::{path::Path, sync::Arc};

use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client, Response,
};
use shared::{
    domain::{HistoryRecord, InferenceResult, ModelInfo},
    error::ApiError,
    protocol::{
        HealthResponse, HistoryResponse, InferResponse, ModelsResponse, INFER_FILE_FIELD,
        INFER_MODEL_PARAM,
    },
};
use tracing::{debug, info};
use url::Url;

use crate::error::DetectError;

/// Image selected by the user for one inference submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl ImageUpload {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        let filename = filename.into();
        let mime_type = mime_guess::from_path(&filename)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self {
            filename,
            bytes,
            mime_type,
        }
    }

    pub async fn from_path(path: &Path) -> Result<Self, DetectError> {
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                DetectError::Validation(format!("'{}' has no usable file name", path.display()))
            })?
            .to_string();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| DetectError::ReadImage {
                path: path.display().to_string(),
                source,
            })?;
        Ok(Self::new(filename, bytes))
    }
}

#[async_trait]
pub trait DetectApi: Send + Sync {
    async fn fetch_models(&self) -> Result<ModelInfo, DetectError>;
    async fn submit_inference(
        &self,
        model: &str,
        upload: ImageUpload,
    ) -> Result<InferenceResult, DetectError>;
    async fn fetch_history(&self) -> Result<Vec<HistoryRecord>, DetectError>;
    async fn health(&self) -> Result<HealthResponse, DetectError>;
}

#[async_trait]
impl<T> DetectApi for Arc<T>
where
    T: DetectApi + ?Sized,
{
    async fn fetch_models(&self) -> Result<ModelInfo, DetectError> {
        (**self).fetch_models().await
    }

    async fn submit_inference(
        &self,
        model: &str,
        upload: ImageUpload,
    ) -> Result<InferenceResult, DetectError> {
        (**self).submit_inference(model, upload).await
    }

    async fn fetch_history(&self) -> Result<Vec<HistoryRecord>, DetectError> {
        (**self).fetch_history().await
    }

    async fn health(&self) -> Result<HealthResponse, DetectError> {
        (**self).health().await
    }
}

pub struct HttpDetectApi {
    http: Client,
    base_url: Url,
}

impl HttpDetectApi {
    /// `base_url` must end with a slash; see [`crate::config::Settings::base_url`].
    pub fn new(base_url: Url) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, DetectError> {
        Ok(self.base_url.join(path)?)
    }

    pub fn infer_url(&self, model: &str) -> Result<Url, DetectError> {
        let mut url = self.endpoint("infer")?;
        url.query_pairs_mut().append_pair(INFER_MODEL_PARAM, model);
        Ok(url)
    }
}

async fn ensure_success(response: Response) -> Result<Response, DetectError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .bytes()
        .await
        .map(|bytes| ApiError::from_body(&bytes))
        .unwrap_or_default();
    debug!(status = status.as_u16(), error = ?body.error, "http: request rejected");
    Err(DetectError::Rejected {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl DetectApi for HttpDetectApi {
    async fn fetch_models(&self) -> Result<ModelInfo, DetectError> {
        let response = self.http.get(self.endpoint("models")?).send().await?;
        let body: ModelsResponse = ensure_success(response).await?.json().await?;
        Ok(body.into())
    }

    async fn submit_inference(
        &self,
        model: &str,
        upload: ImageUpload,
    ) -> Result<InferenceResult, DetectError> {
        let url = self.infer_url(model)?;
        let size_bytes = upload.bytes.len();
        let part = Part::bytes(upload.bytes)
            .file_name(upload.filename.clone())
            .mime_str(&upload.mime_type)
            .map_err(|e| {
                DetectError::Validation(format!("invalid mime type '{}': {e}", upload.mime_type))
            })?;
        let form = Form::new().part(INFER_FILE_FIELD, part);
        info!(
            model,
            filename = %upload.filename,
            size_bytes,
            "http: posting inference request"
        );
        let response = self.http.post(url).multipart(form).send().await?;
        let body: InferResponse = ensure_success(response).await?.json().await?;
        Ok(body.into())
    }

    async fn fetch_history(&self) -> Result<Vec<HistoryRecord>, DetectError> {
        let response = self.http.get(self.endpoint("history")?).send().await?;
        let body: HistoryResponse = ensure_success(response).await?.json().await?;
        Ok(body.history)
    }

    async fn health(&self) -> Result<HealthResponse, DetectError> {
        let response = self.http.get(self.endpoint("health")?).send().await?;
        Ok(ensure_success(response).await?.json().await?)
    }
}
