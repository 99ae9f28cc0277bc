//! crates/study_assistant_core/src/screens/doubt.rs
//!
//! The doubt-solving chat: a text input, an optional image, a tone toggle, and
//! the visible thread.

use super::{Completion, RequestSlot, RequestTicket, ScreenError};
use crate::assistant::is_fallback_text;
use crate::domain::{ChatMessage, ChatRole};
use crate::generation::is_valid_image_payload;
use crate::speech::{append_transcript, ListeningSlot};
use chrono::Utc;
use serde::Serialize;

/// A doubt captured by `begin_send`, ready for the generation client.
#[derive(Debug, Clone)]
pub struct PendingDoubt {
    pub ticket: RequestTicket,
    pub query: String,
    pub image: Option<String>,
    pub funny_mode: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoubtScreen {
    input: String,
    pending_image: Option<String>,
    funny_mode: bool,
    messages: Vec<ChatMessage>,
    #[serde(flatten)]
    request: RequestSlot,
    #[serde(flatten)]
    listening: ListeningSlot,
    #[serde(skip)]
    last_id: i64,
}

impl DoubtScreen {
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn funny_mode(&self) -> bool {
        self.funny_mode
    }

    pub fn is_loading(&self) -> bool {
        self.request.is_loading()
    }

    pub fn set_input(&mut self, input: &str) {
        self.input = input.to_string();
    }

    pub fn set_funny_mode(&mut self, on: bool) {
        self.funny_mode = on;
    }

    /// Attaches (or with `None`, removes) an image given as a data-URL or raw base64.
    pub fn set_image(&mut self, image: Option<String>) -> Result<(), ScreenError> {
        if let Some(image) = &image {
            if !is_valid_image_payload(image) {
                return Err(ScreenError::InvalidImage);
            }
        }
        self.pending_image = image;
        Ok(())
    }

    /// Creation-time ids, bumped so they stay unique within the thread.
    fn push_message(&mut self, role: ChatRole, text: String, image: Option<String>) {
        let timestamp = Utc::now().timestamp_millis();
        let id = timestamp.max(self.last_id + 1);
        self.last_id = id;
        self.messages.push(ChatMessage {
            id: id.to_string(),
            role,
            text,
            image,
            timestamp,
        });
    }

    /// Appends the user turn and clears the composer.
    pub fn begin_send(&mut self) -> Result<PendingDoubt, ScreenError> {
        if self.input.trim().is_empty() && self.pending_image.is_none() {
            return Err(ScreenError::EmptyInput("a question or an image"));
        }
        if self.request.is_loading() {
            return Err(ScreenError::Busy);
        }

        let query = std::mem::take(&mut self.input);
        let image = self.pending_image.take();
        self.push_message(ChatRole::User, query.clone(), image.clone());

        Ok(PendingDoubt {
            ticket: self.request.begin(),
            query,
            image,
            funny_mode: self.funny_mode,
        })
    }

    /// Replaces the composer contents, when given, and sends. Nothing is
    /// touched if the send would be rejected.
    pub fn submit(
        &mut self,
        text: Option<&str>,
        image: Option<String>,
    ) -> Result<PendingDoubt, ScreenError> {
        if image.as_deref().is_some_and(|i| !is_valid_image_payload(i)) {
            return Err(ScreenError::InvalidImage);
        }
        let input = text.unwrap_or(self.input.as_str());
        if input.trim().is_empty() && image.is_none() && self.pending_image.is_none() {
            return Err(ScreenError::EmptyInput("a question or an image"));
        }
        if self.request.is_loading() {
            return Err(ScreenError::Busy);
        }

        if let Some(text) = text {
            self.input = text.to_string();
        }
        if image.is_some() {
            self.pending_image = image;
        }
        self.begin_send()
    }

    /// Appends the model turn, fallback text included.
    pub fn complete_send(&mut self, ticket: RequestTicket, text: String) -> Completion {
        if !self.request.finish(ticket) {
            return Completion::Stale;
        }
        let failed = is_fallback_text(&text);
        self.push_message(ChatRole::Model, text, None);
        if failed {
            Completion::Failed
        } else {
            Completion::Applied
        }
    }

    pub fn begin_listening(&mut self) -> Result<(), ScreenError> {
        Ok(self.listening.try_begin()?)
    }

    /// Ends the voice session; a transcript is appended to the current input.
    pub fn finish_listening(&mut self, transcript: Option<&str>) {
        if let Some(transcript) = transcript {
            self.input = append_transcript(&self.input, transcript);
        }
        self.listening.finish();
    }

    pub fn cancel(&mut self, ticket: RequestTicket) -> bool {
        self.request.finish(ticket)
    }

    pub fn reset(&mut self) {
        self.input.clear();
        self.pending_image = None;
        self.funny_mode = false;
        self.messages.clear();
        self.request.abandon();
        self.listening.finish();
    }
}
