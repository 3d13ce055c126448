pub mod file_writer;
pub mod formatter;

pub use file_writer::TranscriptFile;
pub use formatter::{format_transcript, header_for, SpeakerLabels};
