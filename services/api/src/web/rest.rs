//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the profile and view endpoints and the master
//! definition for the OpenAPI specification. The feature screens live in their
//! own modules next to this one.

use crate::web::{
    doubt, notes, onboarding, planner,
    protocol::{
        AddSubjectRequest, DoubtSettingsRequest, HandlerError, HoursRequest,
        NavigateRequest, NotesRequest, OnboardingUpdate, ProfileResponse, SelectOptionRequest,
        SendDoubtRequest, StartQuizRequest,
    },
    quiz,
    state::AppState,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::{json, Value};
use std::sync::Arc;
use study_assistant_core::{onboarding::OnboardingWizard, shell::Shell};
use tracing::{error, info};
use utoipa::OpenApi;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        get_profile_handler,
        logout_handler,
        get_view_handler,
        navigate_handler,
        onboarding::get_onboarding_handler,
        onboarding::update_onboarding_handler,
        onboarding::next_step_handler,
        doubt::get_doubt_handler,
        doubt::update_settings_handler,
        doubt::send_message_handler,
        doubt::voice_input_handler,
        notes::generate_notes_handler,
        quiz::get_quiz_handler,
        quiz::start_quiz_handler,
        quiz::select_option_handler,
        quiz::advance_handler,
        quiz::restart_handler,
        planner::get_planner_handler,
        planner::add_subject_handler,
        planner::remove_subject_handler,
        planner::set_hours_handler,
        planner::generate_plan_handler,
    ),
    components(
        schemas(
            ProfileResponse,
            OnboardingUpdate,
            NavigateRequest,
            DoubtSettingsRequest,
            SendDoubtRequest,
            NotesRequest,
            StartQuizRequest,
            SelectOptionRequest,
            AddSubjectRequest,
            HoursRequest,
        )
    ),
    tags(
        (name = "EduGenie API", description = "Study assistant: doubts, notes, quizzes and study plans.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Profile Handlers
//=========================================================================================

/// Returns the stored profile, if the student has onboarded.
#[utoipa::path(
    get,
    path = "/profile",
    responses(
        (status = 200, description = "Current profile slot", body = ProfileResponse)
    )
)]
pub async fn get_profile_handler(State(app_state): State<Arc<AppState>>) -> impl IntoResponse {
    let profile_state = app_state.profile.read().await;
    Json(ProfileResponse {
        onboarded: profile_state.is_onboarded(),
        profile: profile_state.current().cloned(),
    })
}

/// Logs out: removes the stored profile and discards all screen state.
#[utoipa::path(
    delete,
    path = "/profile",
    responses(
        (status = 204, description = "Profile cleared"),
        (status = 500, description = "The profile could not be removed")
    )
)]
pub async fn logout_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<StatusCode, HandlerError> {
    app_state
        .profile
        .write()
        .await
        .clear_on_logout()
        .await
        .map_err(|e| {
            error!("Failed to clear profile: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to clear profile".to_string(),
            )
        })?;

    *app_state.onboarding.lock().await = OnboardingWizard::new();
    *app_state.shell.lock().await = Shell::default();
    app_state.screens.lock().await.reset_all();

    info!("Logged out");
    Ok(StatusCode::NO_CONTENT)
}

//=========================================================================================
// View Handlers
//=========================================================================================

fn view_json(shell: &Shell) -> Value {
    json!({
        "view": shell.current(),
        "screen": shell.screen(),
    })
}

/// Returns the current view and the screen it renders.
#[utoipa::path(
    get,
    path = "/view",
    responses(
        (status = 200, description = "Current view"),
        (status = 403, description = "Onboarding not completed")
    )
)]
pub async fn get_view_handler(State(app_state): State<Arc<AppState>>) -> Json<Value> {
    let shell = app_state.shell.lock().await;
    Json(view_json(&shell))
}

/// Switches view. The screen left behind is reset.
#[utoipa::path(
    put,
    path = "/view",
    request_body = NavigateRequest,
    responses(
        (status = 200, description = "View switched"),
        (status = 403, description = "Onboarding not completed")
    )
)]
pub async fn navigate_handler(
    State(app_state): State<Arc<AppState>>,
    Json(req): Json<NavigateRequest>,
) -> Json<Value> {
    let mut shell = app_state.shell.lock().await;
    if let Some(left) = shell.navigate(req.view) {
        app_state.screens.lock().await.reset(left);
        info!(?left, view = ?req.view, "Left screen reset");
    }
    Json(view_json(&shell))
}
