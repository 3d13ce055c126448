//! Upload → submit → poll → format, run once against a transcription service.

use callscribe_core::{AppConfig, PipelineError, PollingConfig};
use callscribe_service::{
    poll_transcript, submit_job, upload_audio, Sleeper, TokioSleeper, TranscriptionService,
};
use callscribe_transcript::{header_for, SpeakerLabels, TranscriptFile};
use std::path::PathBuf;

pub struct Pipeline {
    service: Box<dyn TranscriptionService>,
    sleeper: Box<dyn Sleeper>,
    input_path: PathBuf,
    max_upload_bytes: Option<u64>,
    output: TranscriptFile,
    polling: PollingConfig,
    labels: SpeakerLabels,
}

impl Pipeline {
    pub fn new(config: &AppConfig, service: Box<dyn TranscriptionService>) -> Self {
        Self {
            service,
            sleeper: Box::new(TokioSleeper),
            input_path: config.input.path.clone(),
            max_upload_bytes: config.input.max_bytes,
            output: TranscriptFile::new(config.output.path.clone()),
            polling: config.polling.clone(),
            labels: SpeakerLabels::from(&config.labels),
        }
    }

    pub fn with_sleeper(mut self, sleeper: Box<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Run every step in order and return the transcript that was written.
    pub async fn run(&self) -> Result<String, PipelineError> {
        tracing::info!(path = ?self.input_path, "Uploading audio file...");
        let audio_url = upload_audio(
            self.service.as_ref(),
            &self.input_path,
            self.max_upload_bytes,
        )
        .await?;
        tracing::info!("Audio file uploaded successfully: {audio_url}");

        tracing::info!("Transcribing audio file...");
        let job_id = submit_job(self.service.as_ref(), &audio_url).await?;
        tracing::info!("Transcription job submitted: {job_id}");

        tracing::info!("Getting transcript...");
        let words = poll_transcript(
            self.service.as_ref(),
            &job_id,
            &self.polling,
            self.sleeper.as_ref(),
        )
        .await?;
        tracing::info!(words = words.len(), "Transcript received");

        let transcript = self
            .output
            .save(&header_for(&self.input_path), &words, &self.labels)
            .inspect_err(|e| tracing::error!("Error saving transcription: {e}"))?;
        tracing::info!(path = ?self.output.path(), "Transcript written");

        Ok(transcript)
    }
}
