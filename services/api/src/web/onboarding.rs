//! services/api/src/web/onboarding.rs
//!
//! Handlers for the three-step onboarding wizard. These routes are reachable
//! before a profile exists; finishing the wizard persists the profile.

use crate::web::{
    protocol::{HandlerError, OnboardingUpdate},
    state::AppState,
};
use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use std::sync::Arc;
use study_assistant_core::onboarding::{OnboardingError, OnboardingWizard, WizardOutcome};
use tracing::{error, info};

fn wizard_json(wizard: &OnboardingWizard) -> Value {
    json!({
        "step": wizard.step(),
        "draft": wizard.draft(),
        "streamOffered": wizard.stream_offered(),
        "canAdvance": wizard.can_advance(),
    })
}

fn reject_input(err: OnboardingError) -> HandlerError {
    (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
}

async fn ensure_not_onboarded(app_state: &AppState) -> Result<(), HandlerError> {
    if app_state.profile.read().await.is_onboarded() {
        return Err((
            StatusCode::CONFLICT,
            "Onboarding is already complete".to_string(),
        ));
    }
    Ok(())
}

/// Returns the wizard's current step and draft.
#[utoipa::path(
    get,
    path = "/onboarding",
    responses(
        (status = 200, description = "Wizard state")
    )
)]
pub async fn get_onboarding_handler(State(app_state): State<Arc<AppState>>) -> Json<Value> {
    let wizard = app_state.onboarding.lock().await;
    Json(wizard_json(&wizard))
}

/// Updates fields of the draft profile.
#[utoipa::path(
    post,
    path = "/onboarding",
    request_body = OnboardingUpdate,
    responses(
        (status = 200, description = "Updated wizard state"),
        (status = 409, description = "Onboarding already complete"),
        (status = 422, description = "Invalid field value")
    )
)]
pub async fn update_onboarding_handler(
    State(app_state): State<Arc<AppState>>,
    Json(req): Json<OnboardingUpdate>,
) -> Result<Json<Value>, HandlerError> {
    ensure_not_onboarded(&app_state).await?;

    let mut wizard = app_state.onboarding.lock().await;
    if let Some(name) = &req.name {
        wizard.set_name(name);
    }
    if let Some(class_level) = &req.class_level {
        wizard.set_class_level(class_level).map_err(reject_input)?;
    }
    if let Some(board) = req.board {
        wizard.set_board(board);
    }
    if req.clear_stream {
        wizard.set_stream(None).map_err(reject_input)?;
    }
    if let Some(stream) = req.stream {
        wizard.set_stream(Some(stream)).map_err(reject_input)?;
    }
    if let Some(language) = req.language {
        wizard.set_language(language);
    }
    Ok(Json(wizard_json(&wizard)))
}

/// Moves to the next step. On the last step the profile is saved and the
/// student lands on the doubt solver.
#[utoipa::path(
    post,
    path = "/onboarding/next",
    responses(
        (status = 200, description = "Advanced, or onboarding completed"),
        (status = 409, description = "Onboarding already complete"),
        (status = 422, description = "The current step is incomplete"),
        (status = 500, description = "The profile could not be saved")
    )
)]
pub async fn next_step_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Value>, HandlerError> {
    ensure_not_onboarded(&app_state).await?;

    let mut wizard = app_state.onboarding.lock().await;
    match wizard.next().map_err(reject_input)? {
        WizardOutcome::Advanced(step) => {
            info!(step, "Onboarding advanced");
            Ok(Json(wizard_json(&wizard)))
        }
        WizardOutcome::Completed(profile) => {
            app_state
                .profile
                .write()
                .await
                .set_on_onboard(profile.clone())
                .await
                .map_err(|e| {
                    error!("Failed to save profile: {}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Failed to save profile".to_string(),
                    )
                })?;
            *wizard = OnboardingWizard::new();
            Ok(Json(json!({ "onboarded": true, "profile": profile })))
        }
    }
}
