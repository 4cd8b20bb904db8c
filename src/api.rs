//! HTTP client for the ExplainIt analysis backend
//!
//! Two endpoints: `POST /analyze` takes the file as a multipart upload and
//! returns the per-function report; `POST /explain` takes the same upload
//! with the function name in the query string and returns Markdown text.

use std::time::Duration;

use reqwest::{Client as HttpClient, Response, StatusCode};
use tracing::debug;

use crate::session::LoadedFile;
use crate::types::{AnalyzeResponse, ExplainResponse};

const DEFAULT_TIMEOUT_SECS: u64 = 60;
const UPLOAD_TIMEOUT_SECS: u64 = 120;

/// Errors surfaced by the backend client
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("backend returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("unexpected response body: {0}")]
    Decode(String),
}

/// Client for the analysis backend
///
/// The base URL is injected configuration; call sites never hardcode it.
pub struct ApiClient {
    client: HttpClient,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: HttpClient::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Upload a file for static analysis
    pub async fn analyze(&self, file: &LoadedFile) -> Result<AnalyzeResponse, ApiError> {
        let url = format!("{}/analyze", self.base_url);
        debug!("POST {} ({} bytes)", url, file.bytes.len());

        let response = self
            .client
            .post(&url)
            .multipart(Self::upload_form(file)?)
            .timeout(Duration::from_secs(UPLOAD_TIMEOUT_SECS))
            .send()
            .await?;

        let body = Self::success_body(response).await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Request an explanation for one function of the uploaded file.
    /// The function name travels as a query parameter, not form data.
    pub async fn explain(
        &self,
        file: &LoadedFile,
        function_name: &str,
    ) -> Result<String, ApiError> {
        let url = format!(
            "{}/explain?function_name={}",
            self.base_url,
            urlencoding::encode(function_name)
        );
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .multipart(Self::upload_form(file)?)
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .send()
            .await?;

        let body = Self::success_body(response).await?;
        let parsed: ExplainResponse =
            serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(parsed.explanation)
    }

    /// Build the single-field multipart form both endpoints expect.
    /// Content-Type of the request is left to reqwest.
    fn upload_form(file: &LoadedFile) -> Result<reqwest::multipart::Form, ApiError> {
        let mime = mime_guess::from_path(&file.name)
            .first_or_octet_stream()
            .to_string();
        let part = reqwest::multipart::Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&mime)?;
        Ok(reqwest::multipart::Form::new().part("file", part))
    }

    async fn success_body(response: Response) -> Result<String, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }
        Ok(response.text().await?)
    }
}
