//! services/api/src/web/quiz.rs
//!
//! Handlers for the quiz screen. Only `start` calls the generation service;
//! the rest drive the local `QuizSession`.

use crate::web::{
    guard::PendingGuard,
    protocol::{reject, screen_update, snapshot, HandlerError, SelectOptionRequest, StartQuizRequest},
    state::AppState,
};
use axum::{
    extract::{Extension, State},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use study_assistant_core::{domain::UserProfile, shell::ScreenKind};
use tracing::info;

/// Returns the quiz as the front end should draw it.
#[utoipa::path(
    get,
    path = "/quiz",
    responses(
        (status = 200, description = "Quiz screen"),
        (status = 403, description = "Onboarding not completed")
    )
)]
pub async fn get_quiz_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Value>, HandlerError> {
    let screens = app_state.screens.lock().await;
    snapshot(&screens.quiz.view())
}

/// Generates a quiz for the topic and starts playback.
#[utoipa::path(
    post,
    path = "/quiz/start",
    request_body = StartQuizRequest,
    responses(
        (status = 200, description = "Quiz started; `completion` is `failed` when no questions came back"),
        (status = 409, description = "A quiz is already running or loading"),
        (status = 422, description = "Empty topic")
    )
)]
pub async fn start_quiz_handler(
    State(app_state): State<Arc<AppState>>,
    Extension(profile): Extension<UserProfile>,
    Json(req): Json<StartQuizRequest>,
) -> Result<Json<Value>, HandlerError> {
    let pending = {
        let mut screens = app_state.screens.lock().await;
        screens.quiz.set_topic(&req.topic);
        screens
            .quiz
            .begin_start(app_state.config.quiz_question_count)
            .map_err(reject)?
    };
    let guard = PendingGuard::request(&app_state, ScreenKind::Quiz, pending.ticket);

    let questions = app_state
        .assistant
        .generate_quiz(&pending.topic, pending.count, &profile)
        .await;

    let mut screens = app_state.screens.lock().await;
    let completion = screens.quiz.complete_start(pending.ticket, questions);
    guard.disarm();
    screen_update(completion, &screens.quiz.view())
}

/// Answers the current question. The first answer locks it.
#[utoipa::path(
    post,
    path = "/quiz/select",
    request_body = SelectOptionRequest,
    responses(
        (status = 200, description = "Selection outcome and updated quiz"),
        (status = 409, description = "No question is being played"),
        (status = 422, description = "Option out of range")
    )
)]
pub async fn select_option_handler(
    State(app_state): State<Arc<AppState>>,
    Json(req): Json<SelectOptionRequest>,
) -> Result<Json<Value>, HandlerError> {
    let mut screens = app_state.screens.lock().await;
    let outcome = screens.quiz.select_option(req.option).map_err(reject)?;
    Ok(Json(json!({ "outcome": outcome, "screen": screens.quiz.view() })))
}

/// Moves to the next question, or to the results after the last one.
#[utoipa::path(
    post,
    path = "/quiz/advance",
    responses(
        (status = 200, description = "Updated quiz"),
        (status = 409, description = "The current question is unanswered, or no quiz is running")
    )
)]
pub async fn advance_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Value>, HandlerError> {
    let mut screens = app_state.screens.lock().await;
    let state = screens.quiz.advance().map_err(reject)?;
    info!(?state, "Quiz advanced");
    snapshot(&screens.quiz.view())
}

/// Abandons the current quiz and returns to topic entry.
#[utoipa::path(
    post,
    path = "/quiz/restart",
    responses(
        (status = 200, description = "Back to setup"),
        (status = 409, description = "No quiz to restart")
    )
)]
pub async fn restart_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Value>, HandlerError> {
    let mut screens = app_state.screens.lock().await;
    screens.quiz.restart().map_err(reject)?;
    snapshot(&screens.quiz.view())
}
