use crate::formatter::{format_transcript, SpeakerLabels};
use callscribe_core::{TranscriptError, Word};
use std::path::{Path, PathBuf};

/// Destination file for a finished transcript. Each write replaces the
/// previous contents.
pub struct TranscriptFile {
    path: PathBuf,
}

impl TranscriptFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, transcript: &str) -> Result<(), TranscriptError> {
        std::fs::write(&self.path, transcript).map_err(|source| TranscriptError::Write {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = ?self.path, bytes = transcript.len(), "transcript written");
        Ok(())
    }

    /// Format `words` and write the result; returns the transcript text.
    ///
    /// Nothing is written when formatting fails.
    pub fn save(
        &self,
        header: &str,
        words: &[Word],
        labels: &SpeakerLabels,
    ) -> Result<String, TranscriptError> {
        let transcript = format_transcript(header, words, labels)?;
        self.write(&transcript)?;
        Ok(transcript)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_file_writes_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let file = TranscriptFile::new(dir.path().join("out.txt"));
        file.write("header:\n\nCALLER: hi").unwrap();

        let contents = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(contents, "header:\n\nCALLER: hi");
    }

    #[test]
    fn test_transcript_file_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let file = TranscriptFile::new(dir.path().join("out.txt"));
        file.write("first run with a longer body").unwrap();
        file.write("second").unwrap();

        let contents = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(contents, "second");
    }

    #[test]
    fn test_transcript_file_unwritable_path_fails() {
        let file = TranscriptFile::new("/nonexistent/dir/out.txt");
        match file.write("x") {
            Err(TranscriptError::Write { path, .. }) => {
                assert_eq!(path, PathBuf::from("/nonexistent/dir/out.txt"));
            }
            other => panic!("expected Write error, got {other:?}"),
        }
    }
}
