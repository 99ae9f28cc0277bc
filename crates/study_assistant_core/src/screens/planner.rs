//! crates/study_assistant_core/src/screens/planner.rs

use super::{Completion, RequestSlot, RequestTicket, ScreenError};
use crate::domain::DayPlan;
use serde::Serialize;

pub const MIN_HOURS: u8 = 1;
pub const MAX_HOURS: u8 = 12;
pub const DEFAULT_HOURS: u8 = 4;

#[derive(Debug, Clone)]
pub struct PendingPlan {
    pub ticket: RequestTicket,
    pub hours: u8,
    pub subjects: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlannerScreen {
    subjects: Vec<String>,
    hours: u8,
    plan: Vec<DayPlan>,
    #[serde(flatten)]
    request: RequestSlot,
}

impl Default for PlannerScreen {
    fn default() -> Self {
        Self {
            subjects: Vec::new(),
            hours: DEFAULT_HOURS,
            plan: Vec::new(),
            request: RequestSlot::default(),
        }
    }
}

impl PlannerScreen {
    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    pub fn hours(&self) -> u8 {
        self.hours
    }

    pub fn plan(&self) -> &[DayPlan] {
        &self.plan
    }

    pub fn is_loading(&self) -> bool {
        self.request.is_loading()
    }

    /// Adds a subject in entry order. Blank and duplicate entries are rejected.
    pub fn add_subject(&mut self, subject: &str) -> Result<(), ScreenError> {
        let subject = subject.trim();
        if subject.is_empty() {
            return Err(ScreenError::EmptyInput("a subject"));
        }
        if self.subjects.iter().any(|s| s == subject) {
            return Err(ScreenError::DuplicateSubject(subject.to_string()));
        }
        self.subjects.push(subject.to_string());
        Ok(())
    }

    pub fn remove_subject(&mut self, subject: &str) -> Result<(), ScreenError> {
        let before = self.subjects.len();
        self.subjects.retain(|s| s != subject);
        if self.subjects.len() == before {
            return Err(ScreenError::UnknownSubject(subject.to_string()));
        }
        Ok(())
    }

    pub fn set_hours(&mut self, hours: u8) -> Result<(), ScreenError> {
        if !(MIN_HOURS..=MAX_HOURS).contains(&hours) {
            return Err(ScreenError::InvalidHours {
                min: MIN_HOURS,
                max: MAX_HOURS,
                got: hours,
            });
        }
        self.hours = hours;
        Ok(())
    }

    pub fn begin_generate(&mut self) -> Result<PendingPlan, ScreenError> {
        if self.subjects.is_empty() {
            return Err(ScreenError::NoSubjects);
        }
        if self.request.is_loading() {
            return Err(ScreenError::Busy);
        }
        Ok(PendingPlan {
            ticket: self.request.begin(),
            hours: self.hours,
            subjects: self.subjects.clone(),
        })
    }

    /// Replaces the displayed plan. An empty plan means generation failed.
    pub fn complete_generate(&mut self, ticket: RequestTicket, plan: Vec<DayPlan>) -> Completion {
        if !self.request.finish(ticket) {
            return Completion::Stale;
        }
        let failed = plan.is_empty();
        self.plan = plan;
        if failed {
            Completion::Failed
        } else {
            Completion::Applied
        }
    }

    pub fn cancel(&mut self, ticket: RequestTicket) -> bool {
        self.request.finish(ticket)
    }

    pub fn reset(&mut self) {
        self.subjects.clear();
        self.hours = DEFAULT_HOURS;
        self.plan.clear();
        self.request.abandon();
    }
}
