mod common;

use axum::http::StatusCode;
use common::{create_test_app, create_test_app_with, onboard, send, TestOptions};
use serde_json::{json, Value};

#[tokio::test]
async fn test_feature_routes_require_onboarding() {
    let app = create_test_app().await;

    let (status, body) = send(&app, "GET", "/profile", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["onboarded"], false);
    assert!(body["profile"].is_null());

    for uri in ["/doubt", "/quiz", "/planner", "/view"] {
        let (status, _) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{uri} should be gated");
    }
    let (status, _) = send(&app, "POST", "/notes", Some(json!({ "topic": "Cells" }))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_step_one_needs_name_and_class() {
    let app = create_test_app().await;

    let (status, body) = send(&app, "POST", "/onboarding/next", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, "Please enter your name");

    send(&app, "POST", "/onboarding", Some(json!({ "name": "Ravi" }))).await;
    let (status, body) = send(&app, "POST", "/onboarding/next", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, "Please select your class");

    let (status, body) = send(&app, "GET", "/onboarding", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["step"], 1);
    assert_eq!(body["canAdvance"], false);
}

#[tokio::test]
async fn test_stream_only_for_senior_classes() {
    let app = create_test_app().await;

    let (status, _) = send(
        &app,
        "POST",
        "/onboarding",
        Some(json!({ "name": "Ravi", "classLevel": "9", "stream": "Commerce" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = send(
        &app,
        "POST",
        "/onboarding",
        Some(json!({ "classLevel": "11", "stream": "Commerce" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["streamOffered"], true);
    assert_eq!(body["draft"]["stream"], "Commerce");

    // Switching to a class without streams drops the stream.
    let (_, body) = send(&app, "POST", "/onboarding", Some(json!({ "classLevel": "8" }))).await;
    assert_eq!(body["streamOffered"], false);
    assert!(body["draft"]["stream"].is_null());

    let (status, _) = send(&app, "POST", "/onboarding", Some(json!({ "classLevel": "13" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_completing_onboarding_persists_profile() {
    let app = create_test_app().await;
    onboard(&app).await;

    let (status, body) = send(&app, "GET", "/profile", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["onboarded"], true);
    assert_eq!(body["profile"]["name"], "Asha");
    assert_eq!(body["profile"]["classLevel"], "10");
    assert_eq!(body["profile"]["board"], "CBSE");
    assert_eq!(body["profile"]["language"], "Hinglish");

    let stored: Value = serde_json::from_slice(&std::fs::read(&app.profile_path).unwrap()).unwrap();
    assert_eq!(stored["edugenie_profile"]["name"], "Asha");
    assert_eq!(stored["edugenie_profile"]["onboarded"], true);

    // Lands on the doubt solver.
    let (status, body) = send(&app, "GET", "/view", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"], "doubt");

    let (status, _) = send(&app, "POST", "/onboarding/next", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_logout_clears_profile_and_screens() {
    let app = create_test_app().await;
    onboard(&app).await;

    send(&app, "POST", "/planner/subjects", Some(json!({ "subject": "Physics" }))).await;
    send(&app, "PUT", "/view", Some(json!({ "view": "planner" }))).await;

    let (status, _) = send(&app, "DELETE", "/profile", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", "/planner", None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let stored: Value = serde_json::from_slice(&std::fs::read(&app.profile_path).unwrap()).unwrap();
    assert!(stored.get("edugenie_profile").is_none());

    // Onboarding again starts from a clean slate.
    let (_, wizard) = send(&app, "GET", "/onboarding", None).await;
    assert_eq!(wizard["step"], 1);
    assert_eq!(wizard["draft"]["name"], "");

    onboard(&app).await;
    let (_, planner) = send(&app, "GET", "/planner", None).await;
    assert_eq!(planner["subjects"], json!([]));
    let (_, view) = send(&app, "GET", "/view", None).await;
    assert_eq!(view["view"], "doubt");
}

#[tokio::test]
async fn test_unreadable_profile_starts_onboarding() {
    let app = create_test_app_with(TestOptions {
        stored_profile: Some("{ not json".to_string()),
        ..Default::default()
    })
    .await;

    let (status, body) = send(&app, "GET", "/profile", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["onboarded"], false);

    let (status, _) = send(&app, "GET", "/doubt", None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    onboard(&app).await;
    let stored: Value =
        serde_json::from_str(&std::fs::read_to_string(&app.profile_path).unwrap()).unwrap();
    assert_eq!(stored["edugenie_profile"]["name"], "Asha");
}
