use crate::service_trait::TranscriptionService;
use async_trait::async_trait;
use callscribe_core::config::ApiConfig;
use callscribe_core::{RequestError, TranscriptJob};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct UploadResponse {
    upload_url: String,
}

#[derive(Debug, Serialize)]
struct SubmitRequest<'a> {
    audio_url: &'a str,
    speaker_labels: bool,
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    id: String,
}

/// Client for an AssemblyAI-style REST API (`/upload`, `/transcript`,
/// `/transcript/{id}`).
pub struct HttpTranscriptionService {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpTranscriptionService {
    pub fn new(config: &ApiConfig) -> Result<Self, RequestError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RequestError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn send(request: reqwest::RequestBuilder) -> Result<reqwest::Response, RequestError> {
    request
        .send()
        .await
        .map_err(|e| RequestError::Transport(e.to_string()))
}

/// Read the body, reject statuses `accept` refuses, then decode as JSON.
async fn read_json<T, F>(response: reqwest::Response, accept: F) -> Result<T, RequestError>
where
    T: DeserializeOwned,
    F: Fn(StatusCode) -> bool,
{
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| RequestError::Transport(format!("failed to read response body: {e}")))?;

    if !accept(status) {
        return Err(RequestError::Status {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(|e| RequestError::Decode(format!("{e}: {body}")))
}

#[async_trait]
impl TranscriptionService for HttpTranscriptionService {
    fn name(&self) -> &str {
        "http"
    }

    async fn upload(&self, audio: Vec<u8>) -> Result<String, RequestError> {
        let url = self.url("/upload");
        tracing::debug!(url = %url, bytes = audio.len(), "uploading audio");

        let request = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/octet-stream")
            .header(AUTHORIZATION, self.api_key.as_str())
            .body(audio);

        // Upload only counts as done on exactly 200.
        let parsed: UploadResponse = read_json(send(request).await?, |s| s == StatusCode::OK).await?;
        Ok(parsed.upload_url)
    }

    async fn submit(&self, audio_url: &str) -> Result<String, RequestError> {
        let url = self.url("/transcript");
        tracing::debug!(url = %url, audio_url = %audio_url, "submitting transcription job");

        let request = self
            .client
            .post(&url)
            .header(AUTHORIZATION, self.api_key.as_str())
            .json(&SubmitRequest {
                audio_url,
                speaker_labels: true,
            });

        let parsed: SubmitResponse = read_json(send(request).await?, |s| s.is_success()).await?;
        Ok(parsed.id)
    }

    async fn fetch(&self, job_id: &str) -> Result<TranscriptJob, RequestError> {
        let url = self.url(&format!("/transcript/{job_id}"));
        tracing::debug!(url = %url, "fetching transcript status");

        let request = self
            .client
            .get(&url)
            .header(AUTHORIZATION, self.api_key.as_str())
            .header(CONTENT_TYPE, "application/json");

        read_json(send(request).await?, |s| s.is_success()).await
    }
}
