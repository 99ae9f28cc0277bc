//! services/api/src/web/notes.rs

use crate::web::{
    guard::PendingGuard,
    protocol::{reject, screen_update, HandlerError, NotesRequest},
    state::AppState,
};
use axum::{
    extract::{Extension, State},
    Json,
};
use serde_json::Value;
use std::sync::Arc;
use study_assistant_core::{domain::UserProfile, shell::ScreenKind};

/// Generates revision notes for a topic in the chosen style.
#[utoipa::path(
    post,
    path = "/notes",
    request_body = NotesRequest,
    responses(
        (status = 200, description = "Notes screen; `completion` is `failed` for a fallback reply"),
        (status = 403, description = "Onboarding not completed"),
        (status = 409, description = "A request is already in progress"),
        (status = 422, description = "Empty topic")
    )
)]
pub async fn generate_notes_handler(
    State(app_state): State<Arc<AppState>>,
    Extension(profile): Extension<UserProfile>,
    Json(req): Json<NotesRequest>,
) -> Result<Json<Value>, HandlerError> {
    let pending = {
        let mut screens = app_state.screens.lock().await;
        screens.notes.set_topic(&req.topic);
        if let Some(style) = req.style {
            screens.notes.set_style(style);
        }
        screens.notes.begin_generate().map_err(reject)?
    };
    let guard = PendingGuard::request(&app_state, ScreenKind::Notes, pending.ticket);

    let notes = app_state
        .assistant
        .generate_notes(&pending.topic, pending.style, &profile)
        .await;

    let mut screens = app_state.screens.lock().await;
    let completion = screens.notes.complete_generate(pending.ticket, notes);
    guard.disarm();
    screen_update(completion, &screens.notes)
}
