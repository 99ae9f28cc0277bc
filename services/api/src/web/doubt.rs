//! services/api/src/web/doubt.rs
//!
//! Handlers for the doubt solver: the chat thread, composer settings and
//! one-shot voice input.

use crate::web::{
    guard::PendingGuard,
    protocol::{reject, screen_update, snapshot, DoubtSettingsRequest, HandlerError, SendDoubtRequest},
    state::AppState,
};
use axum::{
    extract::{Extension, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde_json::Value;
use std::sync::Arc;
use study_assistant_core::{
    domain::UserProfile,
    shell::ScreenKind,
    speech::{locale_for, SpeechError},
};
use tracing::{error, info};

/// Returns the thread and composer.
#[utoipa::path(
    get,
    path = "/doubt",
    responses(
        (status = 200, description = "Doubt screen"),
        (status = 403, description = "Onboarding not completed")
    )
)]
pub async fn get_doubt_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Value>, HandlerError> {
    let screens = app_state.screens.lock().await;
    snapshot(&screens.doubt)
}

/// Updates the composer: text, attached image and the funny-mode toggle.
#[utoipa::path(
    put,
    path = "/doubt/settings",
    request_body = DoubtSettingsRequest,
    responses(
        (status = 200, description = "Updated doubt screen"),
        (status = 422, description = "The image is not valid base64")
    )
)]
pub async fn update_settings_handler(
    State(app_state): State<Arc<AppState>>,
    Json(req): Json<DoubtSettingsRequest>,
) -> Result<Json<Value>, HandlerError> {
    let mut screens = app_state.screens.lock().await;
    let doubt = &mut screens.doubt;
    if let Some(on) = req.funny_mode {
        doubt.set_funny_mode(on);
    }
    if let Some(input) = &req.input {
        doubt.set_input(input);
    }
    if req.clear_image {
        doubt.set_image(None).map_err(reject)?;
    }
    if let Some(image) = req.image {
        doubt.set_image(Some(image)).map_err(reject)?;
    }
    snapshot(doubt)
}

/// Sends the composer to the tutor and appends the reply to the thread.
#[utoipa::path(
    post,
    path = "/doubt/messages",
    request_body = SendDoubtRequest,
    responses(
        (status = 200, description = "Reply appended; `completion` is `failed` for a fallback reply"),
        (status = 409, description = "A request is already in progress"),
        (status = 422, description = "Nothing to send")
    )
)]
pub async fn send_message_handler(
    State(app_state): State<Arc<AppState>>,
    Extension(profile): Extension<UserProfile>,
    Json(req): Json<SendDoubtRequest>,
) -> Result<Json<Value>, HandlerError> {
    let pending = app_state
        .screens
        .lock()
        .await
        .doubt
        .submit(req.text.as_deref(), req.image)
        .map_err(reject)?;
    let guard = PendingGuard::request(&app_state, ScreenKind::Doubt, pending.ticket);

    let reply = app_state
        .assistant
        .solve_doubt(
            &pending.query,
            pending.image.as_deref(),
            &profile,
            pending.funny_mode,
        )
        .await;

    let mut screens = app_state.screens.lock().await;
    let completion = screens.doubt.complete_send(pending.ticket, reply);
    guard.disarm();
    screen_update(completion, &screens.doubt)
}

/// Transcribes a recording (raw PCM16 mono, 48 kHz) and appends it to the composer.
#[utoipa::path(
    post,
    path = "/doubt/voice",
    request_body(content_type = "application/octet-stream", description = "PCM16 little-endian mono audio."),
    responses(
        (status = 200, description = "Transcript appended to the input"),
        (status = 400, description = "Empty recording"),
        (status = 409, description = "A voice session is already in progress"),
        (status = 501, description = "Voice input is not available"),
        (status = 502, description = "Transcription failed")
    )
)]
pub async fn voice_input_handler(
    State(app_state): State<Arc<AppState>>,
    Extension(profile): Extension<UserProfile>,
    audio: Bytes,
) -> Result<Json<Value>, HandlerError> {
    let stt = app_state
        .stt_adapter
        .clone()
        .ok_or_else(|| reject(SpeechError::Unsupported.into()))?;
    if audio.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "The recording is empty".to_string()));
    }

    app_state
        .screens
        .lock()
        .await
        .doubt
        .begin_listening()
        .map_err(reject)?;
    let guard = PendingGuard::listening(&app_state);

    let locale = locale_for(profile.language);
    info!(bytes = audio.len(), locale, "Transcribing voice input");
    let result = stt.transcribe_audio(&audio, locale).await;

    let mut screens = app_state.screens.lock().await;
    guard.disarm();
    match result {
        Ok(transcript) => {
            screens.doubt.finish_listening(Some(&transcript));
            snapshot(&screens.doubt)
        }
        Err(e) => {
            screens.doubt.finish_listening(None);
            error!("Transcription failed: {}", e);
            Err((
                StatusCode::BAD_GATEWAY,
                "Could not transcribe the recording".to_string(),
            ))
        }
    }
}
