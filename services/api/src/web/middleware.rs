//! services/api/src/web/middleware.rs
//!
//! Onboarding gate for the feature routes.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

use crate::web::state::AppState;

/// Middleware that only lets requests through once the student has onboarded.
///
/// If a profile exists, a clone of it is inserted into request extensions for
/// handlers to use. Otherwise returns 403 Forbidden.
pub async fn require_profile(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let profile = {
        let profile_state = state.profile.read().await;
        profile_state
            .current()
            .filter(|p| p.onboarded)
            .cloned()
    };

    let Some(profile) = profile else {
        debug!(path = %req.uri().path(), "Rejected request before onboarding");
        return Err(StatusCode::FORBIDDEN);
    };

    req.extensions_mut().insert(profile);
    Ok(next.run(req).await)
}
