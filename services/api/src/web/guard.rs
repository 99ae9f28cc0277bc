//! services/api/src/web/guard.rs
//!
//! Axum drops a handler's future when the client disconnects, so the
//! `complete_*` half of a screen request may never run. A `PendingGuard` is
//! held across the awaited call and releases the screen if it is dropped
//! before being disarmed.

use crate::web::state::AppState;
use std::sync::Arc;
use study_assistant_core::{
    screens::{RequestTicket, Screens},
    shell::ScreenKind,
};
use tracing::{debug, warn};

/// What a dropped handler left open.
#[derive(Debug, Clone, Copy)]
pub enum Pending {
    Request(ScreenKind, RequestTicket),
    Listening,
}

pub struct PendingGuard {
    app_state: Arc<AppState>,
    pending: Option<Pending>,
}

impl PendingGuard {
    pub fn new(app_state: Arc<AppState>, pending: Pending) -> Self {
        Self {
            app_state,
            pending: Some(pending),
        }
    }

    pub fn request(app_state: &Arc<AppState>, kind: ScreenKind, ticket: RequestTicket) -> Self {
        Self::new(app_state.clone(), Pending::Request(kind, ticket))
    }

    pub fn listening(app_state: &Arc<AppState>) -> Self {
        Self::new(app_state.clone(), Pending::Listening)
    }

    /// Called once the handler has applied the outcome itself.
    pub fn disarm(mut self) {
        self.pending = None;
    }
}

fn release(screens: &mut Screens, pending: Pending) {
    match pending {
        Pending::Request(kind, ticket) => {
            if screens.cancel(kind, ticket) {
                debug!(?kind, "Released screen after the request was dropped");
            }
        }
        Pending::Listening => screens.doubt.finish_listening(None),
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        warn!(?pending, "Request dropped before completing");

        // Uncontended in practice: no handler holds the lock across an await.
        if let Ok(mut screens) = self.app_state.screens.try_lock() {
            release(&mut screens, pending);
            return;
        }
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let app_state = self.app_state.clone();
                handle.spawn(async move {
                    let mut screens = app_state.screens.lock().await;
                    release(&mut screens, pending);
                });
            }
            Err(_) => warn!(?pending, "No runtime to release the screen on"),
        }
    }
}
