use crate::service_trait::TranscriptionService;
use callscribe_core::{RequestError, TranscriptionError};
use std::path::Path;

/// Log whatever diagnostic detail a failed call carries.
pub(crate) fn log_request_failure(context: &str, err: &RequestError) {
    match err {
        RequestError::Status { status, body } => {
            tracing::error!(status = *status, body = %body, "{context}");
        }
        other => tracing::error!("{context}: {other}"),
    }
}

/// Read `path` into memory and upload it; returns the hosted URL.
pub async fn upload_audio(
    service: &dyn TranscriptionService,
    path: &Path,
    max_bytes: Option<u64>,
) -> Result<String, TranscriptionError> {
    if let Some(limit) = max_bytes {
        let size = tokio::fs::metadata(path)
            .await
            .map_err(|e| upload_failed(RequestError::Io(e)))?
            .len();
        if size > limit {
            tracing::error!(size, limit, path = ?path, "audio file exceeds upload limit");
            return Err(TranscriptionError::AudioTooLarge { size, limit });
        }
    }

    let audio = tokio::fs::read(path)
        .await
        .map_err(|e| upload_failed(RequestError::Io(e)))?;
    tracing::debug!(path = ?path, bytes = audio.len(), backend = service.name(), "read audio file");

    service.upload(audio).await.map_err(upload_failed)
}

fn upload_failed(err: RequestError) -> TranscriptionError {
    log_request_failure("Error uploading audio file", &err);
    TranscriptionError::Upload(err)
}

/// Start a speaker-labelled transcription of `audio_url`; returns the job id.
pub async fn submit_job(
    service: &dyn TranscriptionService,
    audio_url: &str,
) -> Result<String, TranscriptionError> {
    service.submit(audio_url).await.map_err(|err| {
        log_request_failure("Error transcribing audio file", &err);
        TranscriptionError::Submission(err)
    })
}
