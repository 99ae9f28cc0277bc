//! crates/study_assistant_core/src/speech.rs
//!
//! Helpers around one-shot voice input: locale selection, transcript merging,
//! and the one-session-per-screen guard.

use crate::domain::Language;
use serde::Serialize;

pub const HINDI_LOCALE: &str = "hi-IN";
pub const DEFAULT_LOCALE: &str = "en-US";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpeechError {
    #[error("A voice session is already in progress")]
    AlreadyListening,
    #[error("Voice input is not supported")]
    Unsupported,
}

pub fn locale_for(language: Language) -> &'static str {
    match language {
        Language::Hindi => HINDI_LOCALE,
        Language::English | Language::Hinglish => DEFAULT_LOCALE,
    }
}

/// Appends a transcript to whatever the student already typed.
pub fn append_transcript(existing: &str, transcript: &str) -> String {
    let transcript = transcript.trim();
    match (existing.is_empty(), transcript.is_empty()) {
        (_, true) => existing.to_string(),
        (true, false) => transcript.to_string(),
        (false, false) => format!("{existing} {transcript}"),
    }
}

/// At most one listening session at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListeningSlot {
    #[serde(rename = "listening")]
    active: bool,
}

impl ListeningSlot {
    pub fn is_listening(&self) -> bool {
        self.active
    }

    pub fn try_begin(&mut self) -> Result<(), SpeechError> {
        if self.active {
            return Err(SpeechError::AlreadyListening);
        }
        self.active = true;
        Ok(())
    }

    /// Ends the session on result or error alike.
    pub fn finish(&mut self) {
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hindi_gets_its_own_locale() {
        assert_eq!(locale_for(Language::Hindi), "hi-IN");
        assert_eq!(locale_for(Language::English), "en-US");
        assert_eq!(locale_for(Language::Hinglish), "en-US");
    }

    #[test]
    fn transcript_is_appended() {
        assert_eq!(append_transcript("", "hello"), "hello");
        assert_eq!(append_transcript("What is", "gravity"), "What is gravity");
        assert_eq!(append_transcript("keep", "  "), "keep");
    }

    #[test]
    fn one_session_at_a_time() {
        let mut slot = ListeningSlot::default();
        slot.try_begin().unwrap();
        assert_eq!(slot.try_begin(), Err(SpeechError::AlreadyListening));
        slot.finish();
        assert!(slot.try_begin().is_ok());
    }
}
