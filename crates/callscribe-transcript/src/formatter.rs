use callscribe_core::{LabelConfig, TranscriptError, Word};
use std::path::Path;

/// Maps service speaker tags onto the two roles of a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakerLabels {
    agent_speaker: String,
    agent_label: String,
    caller_label: String,
}

impl SpeakerLabels {
    pub fn new(
        agent_speaker: impl Into<String>,
        agent_label: impl Into<String>,
        caller_label: impl Into<String>,
    ) -> Self {
        Self {
            agent_speaker: agent_speaker.into(),
            agent_label: agent_label.into(),
            caller_label: caller_label.into(),
        }
    }

    /// Exactly one tag is the agent; every other tag is the caller.
    pub fn label_for(&self, speaker: &str) -> &str {
        if speaker == self.agent_speaker {
            &self.agent_label
        } else {
            &self.caller_label
        }
    }
}

impl Default for SpeakerLabels {
    fn default() -> Self {
        Self::from(&LabelConfig::default())
    }
}

impl From<&LabelConfig> for SpeakerLabels {
    fn from(config: &LabelConfig) -> Self {
        Self::new(
            config.agent_speaker.as_str(),
            config.agent_label.as_str(),
            config.caller_label.as_str(),
        )
    }
}

/// Header line naming the transcribed file, e.g. `recording.ogg transcription:`.
pub fn header_for(audio_path: &Path) -> String {
    let name = audio_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| audio_path.to_string_lossy().into_owned());
    format!("{name} transcription:")
}

/// Fold `words` into speaker paragraphs under `header`.
///
/// Every change of speaker starts a new `"\n\n<LABEL>: "` paragraph; words from
/// the same speaker are joined with single spaces.
pub fn format_transcript(
    header: &str,
    words: &[Word],
    labels: &SpeakerLabels,
) -> Result<String, TranscriptError> {
    if words.is_empty() {
        return Err(TranscriptError::EmptyTranscript);
    }

    let mut transcript = String::from(header);
    let mut current_speaker: Option<&str> = None;

    for word in words {
        let speaker = word.speaker_tag();
        if current_speaker == Some(speaker) {
            transcript.push(' ');
            transcript.push_str(&word.text);
        } else {
            current_speaker = Some(speaker);
            transcript.push_str("\n\n");
            transcript.push_str(labels.label_for(speaker));
            transcript.push_str(": ");
            transcript.push_str(&word.text);
        }
    }

    Ok(transcript)
}
