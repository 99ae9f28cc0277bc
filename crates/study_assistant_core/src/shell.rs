//! crates/study_assistant_core/src/shell.rs
//!
//! View switching. Views that have no screen of their own fall back to the
//! doubt solver.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Home,
    #[default]
    Doubt,
    Notes,
    Quiz,
    Planner,
    Settings,
}

/// The feature screen a view renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenKind {
    Doubt,
    Notes,
    Quiz,
    Planner,
}

impl ScreenKind {
    pub const ALL: [ScreenKind; 4] = [
        ScreenKind::Doubt,
        ScreenKind::Notes,
        ScreenKind::Quiz,
        ScreenKind::Planner,
    ];
}

impl View {
    pub fn screen(self) -> ScreenKind {
        match self {
            View::Notes => ScreenKind::Notes,
            View::Quiz => ScreenKind::Quiz,
            View::Planner => ScreenKind::Planner,
            View::Doubt | View::Home | View::Settings => ScreenKind::Doubt,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Shell {
    current: View,
}

impl Shell {
    pub fn current(&self) -> View {
        self.current
    }

    pub fn screen(&self) -> ScreenKind {
        self.current.screen()
    }

    /// Switches view. Returns the screen that was left behind, if the rendered
    /// screen changed, so the caller can discard its state.
    pub fn navigate(&mut self, view: View) -> Option<ScreenKind> {
        let previous = self.current.screen();
        self.current = view;
        (previous != view.screen()).then_some(previous)
    }
}
