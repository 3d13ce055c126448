use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("environment variable not found: {0}")]
    EnvVarNotFound(String),
}

/// Failure of a single call against the transcription service.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("failed to read audio file")]
    Io(#[from] std::io::Error),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Decode(String),
}

impl RequestError {
    /// HTTP status code, when the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Response body, when the service answered with a non-success status.
    pub fn body(&self) -> Option<&str> {
        match self {
            RequestError::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum TranscriptionError {
    #[error("error uploading audio file")]
    Upload(#[source] RequestError),

    #[error("audio file is {size} bytes, above the {limit} byte upload limit")]
    AudioTooLarge { size: u64, limit: u64 },

    #[error("error submitting transcription job")]
    Submission(#[source] RequestError),

    #[error("error getting transcript")]
    Polling(#[source] RequestError),

    #[error("transcription failed: {0}")]
    TranscriptionFailed(String),

    #[error("transcript not completed after {0} status checks")]
    PollLimitExceeded(u32),

    #[error("no words found in the transcript")]
    NoWords,
}

impl TranscriptionError {
    pub fn request_error(&self) -> Option<&RequestError> {
        match self {
            TranscriptionError::Upload(e)
            | TranscriptionError::Submission(e)
            | TranscriptionError::Polling(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("no words found in the transcript")]
    EmptyTranscript,

    #[error("failed to write transcript to {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Transcription(#[from] TranscriptionError),

    #[error("error saving transcription")]
    Transcript(#[from] TranscriptError),
}

impl PipelineError {
    /// The underlying HTTP-shaped failure, if this error came from a service call.
    pub fn request_error(&self) -> Option<&RequestError> {
        match self {
            PipelineError::Transcription(e) => e.request_error(),
            PipelineError::Transcript(_) => None,
        }
    }
}
