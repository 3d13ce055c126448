use crate::service_trait::TranscriptionService;
use crate::steps::log_request_failure;
use async_trait::async_trait;
use callscribe_core::{JobStatus, PollingConfig, TranscriptionError, Word};
use std::time::Duration;

/// Waits between status checks. Swapped out in tests so polling runs instantly.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Poll `job_id` until the service reports `completed` or `error`.
///
/// Sleeps `policy.interval()` between checks. With `max_attempts` unset the
/// loop only ends on a terminal status or a failed request.
pub async fn poll_transcript(
    service: &dyn TranscriptionService,
    job_id: &str,
    policy: &PollingConfig,
    sleeper: &dyn Sleeper,
) -> Result<Vec<Word>, TranscriptionError> {
    let mut attempts: u32 = 0;

    let words = loop {
        attempts += 1;
        let job = service.fetch(job_id).await.map_err(|err| {
            log_request_failure("Error getting transcript", &err);
            TranscriptionError::Polling(err)
        })?;
        tracing::info!(job_id = %job_id, attempt = attempts, "Transcript status: {}", job.status);

        match job.status {
            JobStatus::Completed => break job.words.unwrap_or_default(),
            JobStatus::Error => {
                let message = job.error.unwrap_or_else(|| "unknown error".to_string());
                tracing::error!(job_id = %job_id, "transcription failed: {message}");
                return Err(TranscriptionError::TranscriptionFailed(message));
            }
            _ => {}
        }

        if policy.max_attempts.is_some_and(|max| attempts >= max) {
            tracing::error!(job_id = %job_id, attempts, "giving up on transcript");
            return Err(TranscriptionError::PollLimitExceeded(attempts));
        }

        sleeper.sleep(policy.interval()).await;
    };

    if words.is_empty() {
        tracing::error!(job_id = %job_id, "completed transcript has no words");
        return Err(TranscriptionError::NoWords);
    }

    Ok(words)
}
