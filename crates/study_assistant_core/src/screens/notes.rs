//! crates/study_assistant_core/src/screens/notes.rs

use super::{Completion, RequestSlot, RequestTicket, ScreenError};
use crate::assistant::is_fallback_text;
use crate::domain::NoteStyle;
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct PendingNotes {
    pub ticket: RequestTicket,
    pub topic: String,
    pub style: NoteStyle,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NotesScreen {
    topic: String,
    style: NoteStyle,
    notes: Option<String>,
    #[serde(flatten)]
    request: RequestSlot,
}

impl NotesScreen {
    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn style(&self) -> NoteStyle {
        self.style
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.request.is_loading()
    }

    pub fn set_topic(&mut self, topic: &str) {
        self.topic = topic.to_string();
    }

    pub fn set_style(&mut self, style: NoteStyle) {
        self.style = style;
    }

    /// Clears the previous notes; the topic stays so the student can retry.
    pub fn begin_generate(&mut self) -> Result<PendingNotes, ScreenError> {
        let topic = self.topic.trim();
        if topic.is_empty() {
            return Err(ScreenError::EmptyInput("a topic"));
        }
        if self.request.is_loading() {
            return Err(ScreenError::Busy);
        }
        let topic = topic.to_string();
        self.notes = None;
        Ok(PendingNotes {
            ticket: self.request.begin(),
            topic,
            style: self.style,
        })
    }

    pub fn complete_generate(&mut self, ticket: RequestTicket, notes: String) -> Completion {
        if !self.request.finish(ticket) {
            return Completion::Stale;
        }
        let failed = is_fallback_text(&notes);
        self.notes = Some(notes);
        if failed {
            Completion::Failed
        } else {
            Completion::Applied
        }
    }

    /// Releases the loading flag of a request whose caller went away. A no-op
    /// once `ticket` has been superseded.
    pub fn cancel(&mut self, ticket: RequestTicket) -> bool {
        self.request.finish(ticket)
    }

    pub fn reset(&mut self) {
        self.topic.clear();
        self.style = NoteStyle::default();
        self.notes = None;
        self.request.abandon();
    }
}
