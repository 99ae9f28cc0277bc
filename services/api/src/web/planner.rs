//! services/api/src/web/planner.rs
//!
//! Handlers for the weekly study planner.

use crate::web::{
    guard::PendingGuard,
    protocol::{reject, screen_update, snapshot, AddSubjectRequest, HandlerError, HoursRequest},
    state::AppState,
};
use axum::{
    extract::{Extension, Path, State},
    Json,
};
use serde_json::Value;
use std::sync::Arc;
use study_assistant_core::{domain::UserProfile, shell::ScreenKind};

#[utoipa::path(
    get,
    path = "/planner",
    responses(
        (status = 200, description = "Planner screen"),
        (status = 403, description = "Onboarding not completed")
    )
)]
pub async fn get_planner_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Value>, HandlerError> {
    let screens = app_state.screens.lock().await;
    snapshot(&screens.planner)
}

#[utoipa::path(
    post,
    path = "/planner/subjects",
    request_body = AddSubjectRequest,
    responses(
        (status = 200, description = "Subject added"),
        (status = 422, description = "Blank or duplicate subject")
    )
)]
pub async fn add_subject_handler(
    State(app_state): State<Arc<AppState>>,
    Json(req): Json<AddSubjectRequest>,
) -> Result<Json<Value>, HandlerError> {
    let mut screens = app_state.screens.lock().await;
    screens.planner.add_subject(&req.subject).map_err(reject)?;
    snapshot(&screens.planner)
}

#[utoipa::path(
    delete,
    path = "/planner/subjects/{name}",
    params(
        ("name" = String, Path, description = "The subject to remove.")
    ),
    responses(
        (status = 200, description = "Subject removed"),
        (status = 404, description = "Subject not in the list")
    )
)]
pub async fn remove_subject_handler(
    State(app_state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Value>, HandlerError> {
    let mut screens = app_state.screens.lock().await;
    screens.planner.remove_subject(&name).map_err(reject)?;
    snapshot(&screens.planner)
}

#[utoipa::path(
    put,
    path = "/planner/hours",
    request_body = HoursRequest,
    responses(
        (status = 200, description = "Daily hours updated"),
        (status = 422, description = "Hours outside 1..=12")
    )
)]
pub async fn set_hours_handler(
    State(app_state): State<Arc<AppState>>,
    Json(req): Json<HoursRequest>,
) -> Result<Json<Value>, HandlerError> {
    let mut screens = app_state.screens.lock().await;
    screens.planner.set_hours(req.hours).map_err(reject)?;
    snapshot(&screens.planner)
}

/// Generates a seven-day plan for the listed subjects.
#[utoipa::path(
    post,
    path = "/planner/generate",
    responses(
        (status = 200, description = "Planner screen; `completion` is `failed` when no plan came back"),
        (status = 409, description = "A request is already in progress"),
        (status = 422, description = "No subjects")
    )
)]
pub async fn generate_plan_handler(
    State(app_state): State<Arc<AppState>>,
    Extension(profile): Extension<UserProfile>,
) -> Result<Json<Value>, HandlerError> {
    let pending = app_state
        .screens
        .lock()
        .await
        .planner
        .begin_generate()
        .map_err(reject)?;
    let guard = PendingGuard::request(&app_state, ScreenKind::Planner, pending.ticket);

    let plan = app_state
        .assistant
        .generate_study_plan(pending.hours, &pending.subjects, &profile)
        .await;

    let mut screens = app_state.screens.lock().await;
    let completion = screens.planner.complete_generate(pending.ticket, plan);
    guard.disarm();
    screen_update(completion, &screens.planner)
}
