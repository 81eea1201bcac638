//! Narration inputs produced around the text-to-speech stage.
//!
//! - `speech_marks`: sentence texts and durations from TTS speech marks
//! - `intro`: lead-in offset taken from the speech-to-text result
//! - `ssml`: the SSML script sent to the TTS engine

mod intro;
mod speech_marks;
mod ssml;

pub use intro::{intro_from_transcription, intro_from_transcription_json};
pub use speech_marks::{parse_speech_marks, Narration, SpeechMark};
pub use ssml::{build_ssml, escape_xml, MAX_BREAK_MS};
