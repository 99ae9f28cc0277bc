mod common;

use axum::http::StatusCode;
use common::{
    audio_request, create_test_app_with, json_request, onboard, read_response, send, send_and_abandon,
    send_bytes, TestOptions, DOUBT_REPLY, NOTES_REPLY, TRANSCRIPT,
};
use serde_json::json;
use std::time::Duration;
use tower::ServiceExt;

const DROP_AFTER: Duration = Duration::from_millis(100);

fn slow_app_options(voice: bool) -> TestOptions {
    TestOptions {
        voice,
        slow_first: Some(Duration::from_secs(30)),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_dropped_notes_request_frees_the_screen() {
    let app = create_test_app_with(slow_app_options(false)).await;
    onboard(&app).await;

    let request = json_request("POST", "/notes", Some(json!({ "topic": "Cells" })));
    send_and_abandon(&app, request, DROP_AFTER).await;

    let (status, body) = send(&app, "POST", "/notes", Some(json!({ "topic": "Cells" }))).await;
    assert_eq!(status, StatusCode::OK, "retry was refused: {body}");
    assert_eq!(body["completion"], "applied");
    assert_eq!(body["screen"]["notes"], NOTES_REPLY);
    assert_eq!(body["screen"]["loading"], false);
}

#[tokio::test]
async fn test_dropped_doubt_request_frees_the_composer() {
    let app = create_test_app_with(slow_app_options(false)).await;
    onboard(&app).await;

    let request = json_request("POST", "/doubt/messages", Some(json!({ "text": "What is osmosis?" })));
    send_and_abandon(&app, request, DROP_AFTER).await;

    let (_, doubt) = send(&app, "GET", "/doubt", None).await;
    assert_eq!(doubt["loading"], false);

    let (status, body) = send(
        &app,
        "POST",
        "/doubt/messages",
        Some(json!({ "text": "What is osmosis?" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "retry was refused: {body}");
    assert_eq!(body["completion"], "applied");
    let messages = body["screen"]["messages"].as_array().unwrap();
    assert_eq!(messages.last().unwrap()["text"], DOUBT_REPLY);
}

#[tokio::test]
async fn test_dropped_quiz_and_plan_requests_free_their_screens() {
    let app = create_test_app_with(slow_app_options(false)).await;
    onboard(&app).await;

    let request = json_request("POST", "/quiz/start", Some(json!({ "topic": "Motion" })));
    send_and_abandon(&app, request, DROP_AFTER).await;
    let (status, body) = send(&app, "POST", "/quiz/start", Some(json!({ "topic": "Motion" }))).await;
    assert_eq!(status, StatusCode::OK, "retry was refused: {body}");
    assert_eq!(body["completion"], "applied");

    // Only the first generation call is slow, so the planner needs its own app.
    let app = create_test_app_with(slow_app_options(false)).await;
    onboard(&app).await;
    send(&app, "POST", "/planner/subjects", Some(json!({ "subject": "Physics" }))).await;

    send_and_abandon(&app, json_request("POST", "/planner/generate", None), DROP_AFTER).await;
    let (status, body) = send(&app, "POST", "/planner/generate", None).await;
    assert_eq!(status, StatusCode::OK, "retry was refused: {body}");
    assert_eq!(body["completion"], "applied");
}

#[tokio::test]
async fn test_dropped_voice_request_ends_the_session() {
    let app = create_test_app_with(slow_app_options(true)).await;
    onboard(&app).await;

    send_and_abandon(&app, audio_request("/doubt/voice", vec![0, 0, 1, 0]), DROP_AFTER).await;

    let (_, doubt) = send(&app, "GET", "/doubt", None).await;
    assert_eq!(doubt["listening"], false);

    let (status, body) = send_bytes(&app, "/doubt/voice", vec![0, 0, 1, 0]).await;
    assert_eq!(status, StatusCode::OK, "retry was refused: {body}");
    assert_eq!(body["input"], TRANSCRIPT);
    assert_eq!(body["listening"], false);
}

#[tokio::test]
async fn test_reply_to_superseded_request_is_ignored() {
    let app = create_test_app_with(TestOptions {
        slow_first: Some(Duration::from_millis(300)),
        ..Default::default()
    })
    .await;
    onboard(&app).await;
    send(&app, "PUT", "/view", Some(json!({ "view": "notes" }))).await;

    let router = app.router.clone();
    let late = tokio::spawn(async move {
        let request = json_request("POST", "/notes", Some(json!({ "topic": "Cells" })));
        read_response(router.oneshot(request).await.unwrap()).await
    });
    tokio::time::sleep(Duration::from_millis(50)).await;

    // Leaving the screen resets it, which abandons the request in flight.
    send(&app, "PUT", "/view", Some(json!({ "view": "planner" }))).await;
    send(&app, "PUT", "/view", Some(json!({ "view": "notes" }))).await;

    let (status, body) = send(&app, "POST", "/notes", Some(json!({ "topic": "Atoms" }))).await;
    assert_eq!(status, StatusCode::OK, "new request was refused: {body}");
    assert_eq!(body["completion"], "applied");

    let (status, body) = late.await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["completion"], "stale");
    assert_eq!(body["screen"]["topic"], "Atoms");
    assert_eq!(body["screen"]["notes"], NOTES_REPLY);
    assert_eq!(body["screen"]["loading"], false);
}
