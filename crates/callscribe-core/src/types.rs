use serde::{Deserialize, Deserializer};

/// One recognized token as reported by the transcription service.
///
/// `start` and `end` are offsets into the audio in milliseconds. Numeric
/// fields the service leaves out or sends as `null` read as `0.0`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Word {
    pub text: String,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub start: f64,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub end: f64,
    #[serde(default)]
    pub speaker: Option<String>,
    #[serde(default, deserialize_with = "number_or_zero")]
    pub confidence: f64,
}

fn number_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}

impl Word {
    /// Speaker tag, or `""` when the service did not attribute the word.
    pub fn speaker_tag(&self) -> &str {
        self.speaker.as_deref().unwrap_or_default()
    }
}

/// Job status vocabulary. Anything else the service reports is kept verbatim
/// in `Other` and treated as still in progress.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum JobStatus {
    Queued,
    Processing,
    Completed,
    Error,
    Other(String),
}

impl From<String> for JobStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "queued" => JobStatus::Queued,
            "processing" => JobStatus::Processing,
            "completed" => JobStatus::Completed,
            "error" => JobStatus::Error,
            _ => JobStatus::Other(raw),
        }
    }
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Error)
    }

    /// The status string as the service reported it.
    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Error => "error",
            JobStatus::Other(raw) => raw,
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `GET /transcript/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptJob {
    #[serde(default)]
    pub id: Option<String>,
    pub status: JobStatus,
    #[serde(default)]
    pub words: Option<Vec<Word>>,
    #[serde(default)]
    pub error: Option<String>,
}
