use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{info, warn};

use super::download::save_artifact;
use super::types::GenerationResponse;
use crate::config::AppConfig;
use crate::error::{GenerationError, HrDocsError};

/// Network boundary to the document-generation service.
pub trait GenerationService: Send + Sync {
    /// POST `payload` as JSON to `endpoint` and parse the success body.
    fn submit(
        &self,
        endpoint: &str,
        payload: &serde_json::Value,
    ) -> impl Future<Output = Result<GenerationResponse, GenerationError>> + Send;

    /// Absolute URL of a generated file.
    fn download_url(&self, file_name: &str) -> String;

    /// Fetch a generated file into `dest_dir`, returning the saved path.
    fn download(
        &self,
        file_name: &str,
        dest_dir: &Path,
    ) -> impl Future<Output = Result<PathBuf, GenerationError>> + Send;
}

/// reqwest-backed client for the document service.
#[derive(Debug, Clone)]
pub struct HttpGenerationService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGenerationService {
    /// Build a client for the configured service:
    /// - User-Agent: HRDocs/1.0
    /// - 10 second connect timeout (the whole-request limit lives in the orchestrator)
    pub fn new(config: &AppConfig) -> Result<Self, HrDocsError> {
        let mut builder = reqwest::Client::builder()
            .user_agent("HRDocs/1.0")
            .connect_timeout(Duration::from_secs(10));
        if !config.service.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .map_err(|e| HrDocsError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn rejected(response: reqwest::Response) -> GenerationError {
        let status = response.status().as_u16();
        match response.text().await {
            Ok(body) => GenerationError::Rejected { status, body },
            Err(e) => GenerationError::Unreachable(e.to_string()),
        }
    }
}

impl GenerationService for HttpGenerationService {
    async fn submit(
        &self,
        endpoint: &str,
        payload: &serde_json::Value,
    ) -> Result<GenerationResponse, GenerationError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let field_count = payload.as_object().map(|o| o.len()).unwrap_or(0);
        info!("POST {} ({} fields)", url, field_count);

        let response = self.client.post(&url).json(payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Generation request to {} returned {}", url, status);
            return Err(Self::rejected(response).await);
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| {
            warn!("Unparseable generation response from {}: {}", url, e);
            GenerationError::Malformed(e.to_string())
        })
    }

    fn download_url(&self, file_name: &str) -> String {
        format!(
            "{}/download/{}",
            self.base_url,
            urlencoding::encode(file_name)
        )
    }

    async fn download(
        &self,
        file_name: &str,
        dest_dir: &Path,
    ) -> Result<PathBuf, GenerationError> {
        let url = self.download_url(file_name);
        info!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("Download of {} returned {}", file_name, status);
            return Err(Self::rejected(response).await);
        }

        let bytes = response.bytes().await?;
        save_artifact(dest_dir, file_name, &bytes)
            .map_err(|e| GenerationError::Download(e.to_string()))
    }
}
