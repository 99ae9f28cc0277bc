//! crates/study_assistant_core/src/quiz.rs
//!
//! Quiz playback: `Setup -> Playing -> Completed -> Setup`.
//! Each question accepts exactly one answer, the score only grows, and
//! progression is strictly forward.

use crate::domain::QuizQuestion;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuizError {
    #[error("Cannot start a quiz without questions")]
    NoQuestions,
    #[error("Option {index} does not exist; the question has {available} options")]
    OptionOutOfRange { index: usize, available: usize },
    #[error("Answer the current question before moving on")]
    Unanswered,
    #[error("'{action}' is not allowed while the quiz is {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum QuizState {
    #[default]
    Setup,
    Playing {
        index: usize,
        selected: Option<usize>,
        score: usize,
    },
    Completed {
        score: usize,
        total: usize,
    },
}

impl QuizState {
    fn name(&self) -> &'static str {
        match self {
            QuizState::Setup => "in setup",
            QuizState::Playing { .. } => "playing",
            QuizState::Completed { .. } => "completed",
        }
    }
}

/// Result of selecting an option on the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectionOutcome {
    pub selected: usize,
    pub correct_answer: usize,
    pub is_correct: bool,
    /// False when the question was already locked and this call changed nothing.
    pub accepted: bool,
}

#[derive(Debug, Clone, Default)]
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    state: QuizState,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    /// The question being played, if any.
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        match self.state {
            QuizState::Playing { index, .. } => self.questions.get(index),
            _ => None,
        }
    }

    fn invalid(&self, action: &'static str) -> QuizError {
        QuizError::InvalidTransition {
            action,
            state: self.state.name(),
        }
    }

    /// `Setup -> Playing(0, none, 0)`. An empty batch leaves the session in `Setup`.
    pub fn start(&mut self, questions: Vec<QuizQuestion>) -> Result<(), QuizError> {
        if self.state != QuizState::Setup {
            return Err(self.invalid("start"));
        }
        if questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }
        self.questions = questions;
        self.state = QuizState::Playing {
            index: 0,
            selected: None,
            score: 0,
        };
        Ok(())
    }

    /// Locks in an answer for the current question.
    ///
    /// Only the first selection counts; repeated calls return the locked outcome
    /// with `accepted == false` and leave score and selection untouched.
    pub fn select_option(&mut self, option: usize) -> Result<SelectionOutcome, QuizError> {
        let not_playing = self.invalid("select");
        let QuizState::Playing {
            index,
            selected,
            score,
        } = &mut self.state
        else {
            return Err(not_playing);
        };
        let question = &self.questions[*index];
        let correct_answer = question.correct_answer;

        if let Some(locked) = *selected {
            return Ok(SelectionOutcome {
                selected: locked,
                correct_answer,
                is_correct: locked == correct_answer,
                accepted: false,
            });
        }
        if option >= question.options.len() {
            return Err(QuizError::OptionOutOfRange {
                index: option,
                available: question.options.len(),
            });
        }

        *selected = Some(option);
        let is_correct = option == correct_answer;
        if is_correct {
            *score += 1;
        }
        Ok(SelectionOutcome {
            selected: option,
            correct_answer,
            is_correct,
            accepted: true,
        })
    }

    /// Moves to the next question, or to `Completed` after the last one.
    pub fn advance(&mut self) -> Result<&QuizState, QuizError> {
        let QuizState::Playing {
            index,
            selected,
            score,
        } = self.state
        else {
            return Err(self.invalid("advance"));
        };
        if selected.is_none() {
            return Err(QuizError::Unanswered);
        }

        self.state = if index + 1 < self.questions.len() {
            QuizState::Playing {
                index: index + 1,
                selected: None,
                score,
            }
        } else {
            QuizState::Completed {
                score,
                total: self.questions.len(),
            }
        };
        Ok(&self.state)
    }

    /// Back to `Setup`, discarding the batch. Allowed from `Completed`, or from
    /// `Playing` to abandon a quiz.
    pub fn restart(&mut self) -> Result<(), QuizError> {
        if self.state == QuizState::Setup {
            return Err(self.invalid("restart"));
        }
        self.questions.clear();
        self.state = QuizState::Setup;
        Ok(())
    }
}
