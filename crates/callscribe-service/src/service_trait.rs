use async_trait::async_trait;
use callscribe_core::{RequestError, TranscriptJob};

/// A remote speech-transcription backend.
///
/// The pipeline only needs three calls: push the audio somewhere the backend
/// can read it, start a diarized transcription job, and read the job back.
#[async_trait]
pub trait TranscriptionService: Send + Sync {
    /// Short backend name used in log lines.
    fn name(&self) -> &str;
    /// Upload raw audio bytes; returns the hosted URL.
    async fn upload(&self, audio: Vec<u8>) -> Result<String, RequestError>;
    /// Start a transcription job with speaker labels; returns the job id.
    async fn submit(&self, audio_url: &str) -> Result<String, RequestError>;
    /// Fetch the current state of a job.
    async fn fetch(&self, job_id: &str) -> Result<TranscriptJob, RequestError>;
}
