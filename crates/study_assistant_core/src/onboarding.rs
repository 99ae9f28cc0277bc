//! crates/study_assistant_core/src/onboarding.rs
//!
//! The three-step onboarding wizard. It only collects and checks input; the
//! finished profile is handed back to the caller, which decides how to persist it.

use crate::domain::{is_valid_class_level, offers_stream, Board, Language, Stream, UserProfile};
use serde::Serialize;

pub const LAST_STEP: u8 = 3;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OnboardingError {
    #[error("Please enter your name")]
    MissingName,
    #[error("Please select your class")]
    MissingClassLevel,
    #[error("'{0}' is not a class we support")]
    InvalidClassLevel(String),
    #[error("Streams are only offered for classes 11 and 12")]
    StreamNotOffered,
}

/// What `next()` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardOutcome {
    Advanced(u8),
    Completed(UserProfile),
}

/// Partially filled profile. Board and language start at their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDraft {
    pub name: String,
    pub class_level: Option<String>,
    pub board: Board,
    pub stream: Option<Stream>,
    pub language: Language,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OnboardingWizard {
    step: u8,
    draft: ProfileDraft,
}

impl Default for OnboardingWizard {
    fn default() -> Self {
        Self {
            step: 1,
            draft: ProfileDraft::default(),
        }
    }
}

impl OnboardingWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn draft(&self) -> &ProfileDraft {
        &self.draft
    }

    pub fn set_name(&mut self, name: &str) {
        self.draft.name = name.to_string();
    }

    /// Picking a class without streams drops any stream chosen earlier.
    pub fn set_class_level(&mut self, class_level: &str) -> Result<(), OnboardingError> {
        if !is_valid_class_level(class_level) {
            return Err(OnboardingError::InvalidClassLevel(class_level.to_string()));
        }
        if !offers_stream(class_level) {
            self.draft.stream = None;
        }
        self.draft.class_level = Some(class_level.to_string());
        Ok(())
    }

    pub fn set_board(&mut self, board: Board) {
        self.draft.board = board;
    }

    pub fn set_stream(&mut self, stream: Option<Stream>) -> Result<(), OnboardingError> {
        let offered = self.draft.class_level.as_deref().is_some_and(offers_stream);
        if stream.is_some() && !offered {
            return Err(OnboardingError::StreamNotOffered);
        }
        self.draft.stream = stream;
        Ok(())
    }

    pub fn set_language(&mut self, language: Language) {
        self.draft.language = language;
    }

    /// Whether the stream question is shown on step 2.
    pub fn stream_offered(&self) -> bool {
        self.draft.class_level.as_deref().is_some_and(offers_stream)
    }

    fn check_step_one(&self) -> Result<(), OnboardingError> {
        if self.draft.name.trim().is_empty() {
            return Err(OnboardingError::MissingName);
        }
        if self.draft.class_level.is_none() {
            return Err(OnboardingError::MissingClassLevel);
        }
        Ok(())
    }

    pub fn can_advance(&self) -> bool {
        self.step != 1 || self.check_step_one().is_ok()
    }

    /// Advances one step, or finishes the wizard on the last step.
    pub fn next(&mut self) -> Result<WizardOutcome, OnboardingError> {
        if self.step == 1 {
            self.check_step_one()?;
        }
        if self.step < LAST_STEP {
            self.step += 1;
            return Ok(WizardOutcome::Advanced(self.step));
        }

        self.check_step_one()?;
        let draft = &self.draft;
        Ok(WizardOutcome::Completed(UserProfile {
            name: draft.name.trim().to_string(),
            class_level: draft.class_level.clone().unwrap_or_default(),
            board: draft.board,
            stream: draft.stream,
            language: draft.language,
            onboarded: true,
        }))
    }
}
