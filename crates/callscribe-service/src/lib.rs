pub mod http_service;
pub mod poller;
pub mod service_trait;
pub mod steps;

pub use http_service::HttpTranscriptionService;
pub use poller::{poll_transcript, Sleeper, TokioSleeper};
pub use service_trait::TranscriptionService;
pub use steps::{submit_job, upload_audio};
