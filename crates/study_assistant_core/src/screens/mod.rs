//! crates/study_assistant_core/src/screens/mod.rs
//!
//! Interaction state of the four feature screens.
//!
//! Each screen runs a request in two halves: `begin_*` validates input, marks
//! the screen as loading and hands back a pending request carrying a ticket;
//! `complete_*` applies the reply only if that ticket is still current. The
//! generation call itself happens between the two, outside any lock.

pub mod doubt;
pub mod notes;
pub mod planner;
pub mod quiz;
pub mod request;

pub use doubt::{DoubtScreen, PendingDoubt};
pub use notes::{NotesScreen, PendingNotes};
pub use planner::{PendingPlan, PlannerScreen};
pub use quiz::{PendingQuiz, QuizScreen};
pub use request::{RequestSlot, RequestTicket};

use crate::quiz::QuizError;
use crate::shell::ScreenKind;
use crate::speech::SpeechError;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScreenError {
    #[error("Please enter {0} first")]
    EmptyInput(&'static str),
    #[error("A request is already in progress")]
    Busy,
    #[error("The attached image is not valid base64 data")]
    InvalidImage,
    #[error("Add at least one subject")]
    NoSubjects,
    #[error("'{0}' is already in the list")]
    DuplicateSubject(String),
    #[error("'{0}' is not in the list")]
    UnknownSubject(String),
    #[error("Study hours must be between {min} and {max}, got {got}")]
    InvalidHours { min: u8, max: u8, got: u8 },
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Speech(#[from] SpeechError),
}

/// How a reply was handled by `complete_*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Completion {
    Applied,
    /// The reply was a fallback; the screen is back in a retryable state.
    Failed,
    /// The ticket was superseded and the reply was dropped.
    Stale,
}

/// All feature screens of the running application.
#[derive(Debug, Default)]
pub struct Screens {
    pub doubt: DoubtScreen,
    pub notes: NotesScreen,
    pub quiz: QuizScreen,
    pub planner: PlannerScreen,
}

impl Screens {
    /// Discards one screen's state, abandoning its in-flight request.
    pub fn reset(&mut self, kind: ScreenKind) {
        match kind {
            ScreenKind::Doubt => self.doubt.reset(),
            ScreenKind::Notes => self.notes.reset(),
            ScreenKind::Quiz => self.quiz.reset(),
            ScreenKind::Planner => self.planner.reset(),
        }
    }

    pub fn reset_all(&mut self) {
        for kind in ScreenKind::ALL {
            self.reset(kind);
        }
    }

    /// Clears the loading flag left by a request that will never complete.
    pub fn cancel(&mut self, kind: ScreenKind, ticket: RequestTicket) -> bool {
        match kind {
            ScreenKind::Doubt => self.doubt.cancel(ticket),
            ScreenKind::Notes => self.notes.cancel(ticket),
            ScreenKind::Quiz => self.quiz.cancel(ticket),
            ScreenKind::Planner => self.planner.cancel(ticket),
        }
    }
}
