use callscribe_core::{TranscriptError, Word};
use callscribe_transcript::{header_for, SpeakerLabels, TranscriptFile};
use std::path::Path;

fn word(text: &str, speaker: &str) -> Word {
    Word {
        text: text.to_string(),
        start: 0.0,
        end: 0.0,
        speaker: Some(speaker.to_string()),
        confidence: 0.95,
    }
}

#[test]
fn test_save_writes_labelled_transcript() {
    let dir = tempfile::tempdir().unwrap();
    let file = TranscriptFile::new(dir.path().join("recording-transcript.txt"));
    let words = vec![word("Hello", "A"), word("there", "A"), word("Hi", "B")];

    let text = file
        .save(
            &header_for(Path::new("./recording.ogg")),
            &words,
            &SpeakerLabels::default(),
        )
        .unwrap();

    let expected = "recording.ogg transcription:\n\nCALLER: Hello there\n\nAGENT: Hi";
    assert_eq!(text, expected);
    assert_eq!(std::fs::read_to_string(file.path()).unwrap(), expected);
}

#[test]
fn test_save_empty_words_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let file = TranscriptFile::new(dir.path().join("recording-transcript.txt"));

    match file.save("h:", &[], &SpeakerLabels::default()) {
        Err(TranscriptError::EmptyTranscript) => {}
        other => panic!("expected EmptyTranscript, got {other:?}"),
    }
    assert!(!file.path().exists());
}

#[test]
fn test_save_empty_words_keeps_previous_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = TranscriptFile::new(dir.path().join("recording-transcript.txt"));
    file.write("previous run").unwrap();

    assert!(file.save("h:", &[], &SpeakerLabels::default()).is_err());
    assert_eq!(std::fs::read_to_string(file.path()).unwrap(), "previous run");
}
