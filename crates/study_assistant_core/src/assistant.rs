//! crates/study_assistant_core/src/assistant.rs
//!
//! The generation client. It turns prompt-builder output into calls against a
//! `GenerationService` and maps the replies back into domain types.
//!
//! Every failure (transport, service error, empty reply, malformed JSON) is
//! absorbed here: free-text features return a fixed fallback string and
//! structured features return an empty batch. Callers treat either as
//! "generation failed, allow retry".

use crate::domain::{DayPlan, NoteStyle, QuizQuestion, UserProfile};
use crate::generation::GenerationRequest;
use crate::ports::{GenerationService, PortError};
use crate::prompts::{build_doubt_prompt, build_notes_prompt, build_plan_prompt, build_quiz_prompt};
use crate::validation::{parse_plan, parse_quiz};
use std::sync::Arc;
use tracing::{error, info, warn};

pub const DOUBT_EMPTY_FALLBACK: &str = "Sorry, I couldn't generate an explanation.";
pub const DOUBT_ERROR_FALLBACK: &str = "Something went wrong while connecting to EduGenie.";
pub const NOTES_EMPTY_FALLBACK: &str = "No notes generated.";
pub const NOTES_ERROR_FALLBACK: &str = "Failed to generate notes.";

/// True if `text` is one of the fixed fallback strings rather than a real reply.
pub fn is_fallback_text(text: &str) -> bool {
    [
        DOUBT_EMPTY_FALLBACK,
        DOUBT_ERROR_FALLBACK,
        NOTES_EMPTY_FALLBACK,
        NOTES_ERROR_FALLBACK,
    ]
    .contains(&text)
}

#[derive(Clone)]
pub struct StudyAssistant {
    generator: Arc<dyn GenerationService>,
}

impl StudyAssistant {
    pub fn new(generator: Arc<dyn GenerationService>) -> Self {
        Self { generator }
    }

    /// Free-text generation with separate fallbacks for empty replies and errors.
    async fn generate_text(
        &self,
        request: GenerationRequest,
        feature: &str,
        empty_fallback: &str,
        error_fallback: &str,
    ) -> String {
        match self.generator.generate(&request).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) | Err(PortError::EmptyResponse) => {
                warn!(feature, "Generation service returned no text");
                empty_fallback.to_string()
            }
            Err(e) => {
                error!(feature, "Generation failed: {}", e);
                error_fallback.to_string()
            }
        }
    }

    pub async fn solve_doubt(
        &self,
        query: &str,
        image: Option<&str>,
        profile: &UserProfile,
        funny_mode: bool,
    ) -> String {
        let prompt = build_doubt_prompt(query, image, profile, funny_mode);
        let request = GenerationRequest {
            system_instruction: Some(prompt.system_instruction),
            parts: prompt.user_content,
            response_schema: None,
        };
        info!(has_image = image.is_some(), funny_mode, "Solving doubt");
        self.generate_text(request, "doubt", DOUBT_EMPTY_FALLBACK, DOUBT_ERROR_FALLBACK)
            .await
    }

    pub async fn generate_notes(&self, topic: &str, style: NoteStyle, profile: &UserProfile) -> String {
        let request = GenerationRequest::from_text(build_notes_prompt(topic, style, profile));
        info!(topic, %style, "Generating notes");
        self.generate_text(request, "notes", NOTES_EMPTY_FALLBACK, NOTES_ERROR_FALLBACK)
            .await
    }

    /// Returns an empty batch on any failure; an empty batch is never a valid quiz.
    pub async fn generate_quiz(&self, topic: &str, count: usize, profile: &UserProfile) -> Vec<QuizQuestion> {
        let prompt = build_quiz_prompt(topic, count, profile);
        let request = GenerationRequest::from_text(prompt.instruction).with_schema(prompt.schema);
        info!(topic, count, "Generating quiz");

        let text = match self.generator.generate(&request).await {
            Ok(text) => text,
            Err(e) => {
                error!("Quiz generation failed: {}", e);
                return Vec::new();
            }
        };
        parse_quiz(&text, count).unwrap_or_else(|e| {
            error!("Quiz reply rejected: {}", e);
            Vec::new()
        })
    }

    /// Returns an empty plan on any failure.
    pub async fn generate_study_plan(
        &self,
        hours: u8,
        subjects: &[String],
        profile: &UserProfile,
    ) -> Vec<DayPlan> {
        let prompt = build_plan_prompt(hours, subjects, profile);
        let request = GenerationRequest::from_text(prompt.instruction).with_schema(prompt.schema);
        info!(hours, subjects = subjects.len(), "Generating study plan");

        let text = match self.generator.generate(&request).await {
            Ok(text) => text,
            Err(e) => {
                error!("Study plan generation failed: {}", e);
                return Vec::new();
            }
        };
        parse_plan(&text).unwrap_or_else(|e| {
            error!("Study plan reply rejected: {}", e);
            Vec::new()
        })
    }
}
