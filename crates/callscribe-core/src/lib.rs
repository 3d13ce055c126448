pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, LabelConfig, PollingConfig};
pub use error::{ConfigError, PipelineError, RequestError, TranscriptError, TranscriptionError};
pub use types::{JobStatus, TranscriptJob, Word};
