//! crates/study_assistant_core/src/domain.rs
//!
//! Defines the core data structures for the application.
//! The serialized shapes match what the generation service returns and what the
//! profile store persists, so they carry serde derives.

use serde::{Deserialize, Serialize};
use std::fmt;

//=========================================================================================
// Profile
//=========================================================================================

/// The language the student wants explanations in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Hindi,
    Hinglish,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::English, Language::Hindi, Language::Hinglish];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::Hinglish => "Hinglish",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Curriculum board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Board {
    #[default]
    #[serde(rename = "CBSE")]
    Cbse,
    #[serde(rename = "ICSE")]
    Icse,
    #[serde(rename = "State Board")]
    StateBoard,
    Other,
}

impl Board {
    pub fn as_str(&self) -> &'static str {
        match self {
            Board::Cbse => "CBSE",
            Board::Icse => "ICSE",
            Board::StateBoard => "State Board",
            Board::Other => "Other",
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Senior-secondary stream, only offered to classes 11 and 12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stream {
    #[serde(rename = "Science (PCM)")]
    SciencePcm,
    #[serde(rename = "Science (PCB)")]
    SciencePcb,
    Commerce,
    #[serde(rename = "Arts/Humanities")]
    Arts,
}

impl Stream {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stream::SciencePcm => "Science (PCM)",
            Stream::SciencePcb => "Science (PCB)",
            Stream::Commerce => "Commerce",
            Stream::Arts => "Arts/Humanities",
        }
    }
}

/// Class levels a student can pick: "1" through "12", plus competitive-exam aspirants.
pub const COMPETITIVE_EXAM: &str = "Competitive Exam";

pub fn is_valid_class_level(class_level: &str) -> bool {
    class_level == COMPETITIVE_EXAM
        || class_level
            .parse::<u8>()
            .map(|n| (1..=12).contains(&n) && !class_level.starts_with('0'))
            .unwrap_or(false)
}

/// Streams are only offered for the senior-secondary classes.
pub fn offers_stream(class_level: &str) -> bool {
    matches!(class_level, "11" | "12")
}

/// The student's onboarding-collected identity and preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub class_level: String,
    pub board: Board,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<Stream>,
    pub language: Language,
    pub onboarded: bool,
}

//=========================================================================================
// Doubt chat
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

/// A single turn in the doubt-solving thread. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

//=========================================================================================
// Notes
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NoteStyle {
    #[default]
    Simple,
    Exam,
    Detailed,
}

impl NoteStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteStyle::Simple => "Simple",
            NoteStyle::Exam => "Exam",
            NoteStyle::Detailed => "Detailed",
        }
    }
}

impl fmt::Display for NoteStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//=========================================================================================
// Quiz and study plan
//=========================================================================================

/// One multiple-choice question as returned by the generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options`.
    pub correct_answer: usize,
    pub explanation: String,
}

/// A single study block within a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudySlot {
    pub time: String,
    pub subject: String,
    pub topic: String,
}

/// One day of a weekly study plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    pub day: String,
    pub sessions: Vec<StudySlot>,
}
