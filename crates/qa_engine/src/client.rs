use std::time::Duration;

use engine_logging::{engine_debug, engine_warn};
use qa_core::{QaRecord, UploadCandidate, FALLBACK_ERROR_MESSAGE};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::{AnalysisError, FailureKind};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/qa";

/// Multipart field the service reads the document from.
const FILE_FIELD: &str = "file";

/// Connection settings for the analysis service.
///
/// No timeouts are applied unless set; a slow analysis is only observed
/// through the request's own resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisSettings {
    pub endpoint: String,
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: None,
            request_timeout: None,
        }
    }
}

#[async_trait::async_trait]
pub trait AnalysisClient: Send + Sync {
    /// Sends the document once and returns the generated records in server order.
    async fn analyze(&self, candidate: &UploadCandidate) -> Result<Vec<QaRecord>, AnalysisError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestAnalysisClient {
    settings: AnalysisSettings,
}

impl ReqwestAnalysisClient {
    pub fn new(settings: AnalysisSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, AnalysisError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = self.settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().map_err(|err| {
            engine_warn!("Failed to build HTTP client: {}", err);
            AnalysisError::new(FailureKind::Network, FALLBACK_ERROR_MESSAGE)
        })
    }
}

#[async_trait::async_trait]
impl AnalysisClient for ReqwestAnalysisClient {
    async fn analyze(&self, candidate: &UploadCandidate) -> Result<Vec<QaRecord>, AnalysisError> {
        let url = reqwest::Url::parse(&self.settings.endpoint).map_err(|err| {
            engine_warn!("Invalid analysis endpoint {:?}: {}", self.settings.endpoint, err);
            AnalysisError::new(FailureKind::InvalidEndpoint, FALLBACK_ERROR_MESSAGE)
        })?;
        let client = self.build_client()?;

        let part = Part::bytes(candidate.bytes().to_vec())
            .file_name(candidate.name().to_string())
            .mime_str(candidate.declared_type())
            .map_err(|err| {
                engine_warn!("Rejected content type {:?}: {}", candidate.declared_type(), err);
                AnalysisError::new(FailureKind::InvalidRequest, FALLBACK_ERROR_MESSAGE)
            })?;
        let form = Form::new().part(FILE_FIELD, part);

        engine_debug!("POST {} ({} bytes)", url, candidate.bytes().len());
        let response = client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;

        if !status.is_success() {
            let message =
                error_detail(&body).unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());
            engine_warn!("Analysis service answered {}: {}", status, message);
            return Err(AnalysisError::new(
                FailureKind::HttpStatus(status.as_u16()),
                message,
            ));
        }

        serde_json::from_slice::<Vec<QaRecord>>(&body).map_err(|err| {
            engine_warn!("Analysis response is not a Q&A list: {}", err);
            AnalysisError::new(FailureKind::InvalidResponse, FALLBACK_ERROR_MESSAGE)
        })
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// Extracts a non-empty string `detail` field from an error body.
fn error_detail(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.detail)
        .filter(|detail| !detail.trim().is_empty())
}

fn map_reqwest_error(err: reqwest::Error) -> AnalysisError {
    engine_warn!("Analysis request failed: {}", err);
    if err.is_timeout() {
        return AnalysisError::new(FailureKind::Timeout, FALLBACK_ERROR_MESSAGE);
    }
    AnalysisError::new(FailureKind::Network, FALLBACK_ERROR_MESSAGE)
}
