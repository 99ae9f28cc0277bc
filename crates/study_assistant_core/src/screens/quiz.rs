//! crates/study_assistant_core/src/screens/quiz.rs
//!
//! The quiz screen: a topic field in front of a `QuizSession`.

use super::{Completion, RequestSlot, RequestTicket, ScreenError};
use crate::domain::QuizQuestion;
use crate::quiz::{QuizError, QuizSession, QuizState, SelectionOutcome};
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct PendingQuiz {
    pub ticket: RequestTicket,
    pub topic: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct QuizScreen {
    topic: String,
    session: QuizSession,
    request: RequestSlot,
}

/// What the front end needs to draw the quiz. The correct answer and the
/// explanation are only revealed once the current question is answered.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizView<'a> {
    pub topic: &'a str,
    pub loading: bool,
    pub state: &'a QuizState,
    pub total: usize,
    pub question: Option<&'a str>,
    pub options: Option<&'a [String]>,
    pub correct_answer: Option<usize>,
    pub explanation: Option<&'a str>,
}

impl QuizScreen {
    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn is_loading(&self) -> bool {
        self.request.is_loading()
    }

    pub fn set_topic(&mut self, topic: &str) {
        self.topic = topic.to_string();
    }

    pub fn view(&self) -> QuizView<'_> {
        let current = self.session.current_question();
        let answered = matches!(
            self.session.state(),
            QuizState::Playing {
                selected: Some(_),
                ..
            }
        );
        QuizView {
            topic: &self.topic,
            loading: self.request.is_loading(),
            state: self.session.state(),
            total: self.session.questions().len(),
            question: current.map(|q| q.question.as_str()),
            options: current.map(|q| q.options.as_slice()),
            correct_answer: current.filter(|_| answered).map(|q| q.correct_answer),
            explanation: current
                .filter(|_| answered)
                .map(|q| q.explanation.as_str()),
        }
    }

    pub fn begin_start(&mut self, count: usize) -> Result<PendingQuiz, ScreenError> {
        let topic = self.topic.trim();
        if topic.is_empty() {
            return Err(ScreenError::EmptyInput("a topic"));
        }
        if self.session.state() != &QuizState::Setup {
            return Err(QuizError::InvalidTransition {
                action: "start",
                state: "not in setup",
            }
            .into());
        }
        if self.request.is_loading() {
            return Err(ScreenError::Busy);
        }
        let topic = topic.to_string();
        Ok(PendingQuiz {
            ticket: self.request.begin(),
            topic,
            count,
        })
    }

    /// Starts playback, or stays in `Setup` when generation produced nothing.
    pub fn complete_start(&mut self, ticket: RequestTicket, questions: Vec<QuizQuestion>) -> Completion {
        if !self.request.finish(ticket) {
            return Completion::Stale;
        }
        match self.session.start(questions) {
            Ok(()) => Completion::Applied,
            Err(_) => Completion::Failed,
        }
    }

    pub fn select_option(&mut self, option: usize) -> Result<SelectionOutcome, ScreenError> {
        Ok(self.session.select_option(option)?)
    }

    pub fn advance(&mut self) -> Result<QuizState, ScreenError> {
        Ok(self.session.advance()?.clone())
    }

    /// "Try another topic": back to setup with an empty topic.
    pub fn restart(&mut self) -> Result<(), ScreenError> {
        self.session.restart()?;
        self.topic.clear();
        Ok(())
    }

    pub fn cancel(&mut self, ticket: RequestTicket) -> bool {
        self.request.finish(ticket)
    }

    pub fn reset(&mut self) {
        self.topic.clear();
        self.session = QuizSession::new();
        self.request.abandon();
    }
}
