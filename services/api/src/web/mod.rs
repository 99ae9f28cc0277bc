pub mod doubt;
pub mod guard;
pub mod middleware;
pub mod notes;
pub mod onboarding;
pub mod planner;
pub mod protocol;
pub mod quiz;
pub mod rest;
pub mod state;

pub use middleware::require_profile;
pub use state::AppState;

use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

/// Builds the API router. CORS and the Swagger UI are layered on by the binary.
pub fn app_router(app_state: Arc<AppState>) -> Router {
    // Public routes (no profile required)
    let public_routes = Router::new()
        .route(
            "/profile",
            get(rest::get_profile_handler).delete(rest::logout_handler),
        )
        .route(
            "/onboarding",
            get(onboarding::get_onboarding_handler).post(onboarding::update_onboarding_handler),
        )
        .route("/onboarding/next", post(onboarding::next_step_handler));

    // Feature routes (onboarding required)
    let protected_routes = Router::new()
        .route(
            "/view",
            get(rest::get_view_handler).put(rest::navigate_handler),
        )
        .route("/doubt", get(doubt::get_doubt_handler))
        .route("/doubt/settings", put(doubt::update_settings_handler))
        .route("/doubt/messages", post(doubt::send_message_handler))
        .route("/doubt/voice", post(doubt::voice_input_handler))
        .route("/notes", post(notes::generate_notes_handler))
        .route("/quiz", get(quiz::get_quiz_handler))
        .route("/quiz/start", post(quiz::start_quiz_handler))
        .route("/quiz/select", post(quiz::select_option_handler))
        .route("/quiz/advance", post(quiz::advance_handler))
        .route("/quiz/restart", post(quiz::restart_handler))
        .route("/planner", get(planner::get_planner_handler))
        .route("/planner/subjects", post(planner::add_subject_handler))
        .route(
            "/planner/subjects/{name}",
            delete(planner::remove_subject_handler),
        )
        .route("/planner/hours", put(planner::set_hours_handler))
        .route("/planner/generate", post(planner::generate_plan_handler))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            require_profile,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        // Attached images and voice recordings travel in the request body.
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
        .with_state(app_state)
}
