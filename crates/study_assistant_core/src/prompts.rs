//! crates/study_assistant_core/src/prompts.rs
//!
//! Pure construction of instruction text and response schemas for each feature.
//! Nothing here touches the network or holds state; the builders assume the
//! caller already rejected empty primary input.

use crate::domain::{Language, NoteStyle, UserProfile};
use crate::generation::{image_part, ContentPart};
use serde_json::{json, Value};

/// Number of questions requested when the caller does not say otherwise.
pub const DEFAULT_QUIZ_COUNT: usize = 5;

const FUNNY_TONE: &str = "funny, witty, and relatable like a cool older brother";
const TEACHER_TONE: &str = "kind, encouraging, and clear like a professional teacher";

/// Instruction and content for a doubt-solving turn.
#[derive(Debug, Clone, PartialEq)]
pub struct DoubtPrompt {
    pub system_instruction: String,
    /// Image part first (if any), then the query text.
    pub user_content: Vec<ContentPart>,
}

/// Instruction plus the JSON shape the service is asked to honour.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredPrompt {
    pub instruction: String,
    pub schema: Value,
}

/// The language clause of the tutor persona.
pub fn language_directive(language: Language) -> &'static str {
    match language {
        Language::English => "Answer in English.",
        Language::Hindi => "Answer primarily in Hindi.",
        Language::Hinglish => {
            "Answer in a mix of Hindi and English (Hinglish), commonly used by Indian students."
        }
    }
}

pub fn tone_clause(funny_mode: bool) -> &'static str {
    if funny_mode {
        FUNNY_TONE
    } else {
        TEACHER_TONE
    }
}

pub fn build_doubt_prompt(
    query: &str,
    image: Option<&str>,
    profile: &UserProfile,
    funny_mode: bool,
) -> DoubtPrompt {
    let system_instruction = format!(
        "You are EduGenie, an expert AI tutor for Indian students ({board} Board, Class {class}).\n\
         Tone: {tone}.\n\
         Language: {language}\n\
         Format: Use Markdown. Break down complex problems into steps. Use bold text for key terms.\n\
         If the question is academic, provide a solution, explanation, and a similar practice example.",
        board = profile.board,
        class = profile.class_level,
        tone = tone_clause(funny_mode),
        language = language_directive(profile.language),
    );

    let mut user_content = Vec::with_capacity(2);
    if let Some(image) = image {
        user_content.push(image_part(image));
    }
    user_content.push(ContentPart::text(query));

    DoubtPrompt {
        system_instruction,
        user_content,
    }
}

pub fn build_notes_prompt(topic: &str, style: NoteStyle, profile: &UserProfile) -> String {
    format!(
        "Generate comprehensive study notes for the topic: \"{topic}\".\n\
         Context: Class {class}, {board} Board.\n\
         Style: {style}.\n\
         Language preference: {language} (or Hinglish if appropriate for better understanding).\n\
         \n\
         Structure the notes as:\n\
         1. Introduction (Brief)\n\
         2. Key Concepts (Bullet points)\n\
         3. Detailed Explanation (Step-by-step)\n\
         4. Important Formulas/Dates/Facts (Boxed or highlighted)\n\
         5. Summary",
        class = profile.class_level,
        board = profile.board,
        language = profile.language,
    )
}

/// Schema for a batch of quiz questions.
pub fn quiz_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "question": { "type": "STRING" },
                "options": { "type": "ARRAY", "items": { "type": "STRING" } },
                "correctAnswer": {
                    "type": "INTEGER",
                    "description": "Index of the correct option (0-3)"
                },
                "explanation": { "type": "STRING" }
            },
            "required": ["question", "options", "correctAnswer", "explanation"]
        }
    })
}

pub fn build_quiz_prompt(topic: &str, count: usize, profile: &UserProfile) -> StructuredPrompt {
    StructuredPrompt {
        instruction: format!(
            "Create a {count} question quiz about \"{topic}\" for a Class {} student.",
            profile.class_level
        ),
        schema: quiz_schema(),
    }
}

/// Schema for a weekly plan of day entries.
pub fn plan_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "day": { "type": "STRING", "description": "Day of the week (e.g., Monday)" },
                "sessions": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "time": {
                                "type": "STRING",
                                "description": "Time slot (e.g., 4:00 PM - 5:00 PM)"
                            },
                            "subject": { "type": "STRING" },
                            "topic": { "type": "STRING", "description": "Specific focus topic" }
                        },
                        "required": ["time", "subject", "topic"]
                    }
                }
            },
            "required": ["day", "sessions"]
        }
    })
}

pub fn build_plan_prompt(hours: u8, subjects: &[String], profile: &UserProfile) -> StructuredPrompt {
    StructuredPrompt {
        instruction: format!(
            "Create a 1-week study timetable.\n\
             Student Profile: Class {class}, {board}, Subjects: {subjects}.\n\
             Available daily hours: {hours}.\n\
             Focus: Balanced mix of learning and revision.",
            class = profile.class_level,
            board = profile.board,
            subjects = subjects.join(", "),
        ),
        schema: plan_schema(),
    }
}
