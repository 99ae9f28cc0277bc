#![allow(dead_code)]

use api_lib::{
    config::Config,
    web::{app_router, state::AppState},
};
use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use study_assistant_core::{
    generation::ContentPart,
    ports::{GenerationService, PortError, PortResult, ProfileStore, SpeechToTextService},
    GenerationRequest, ProfileState, StudyAssistant,
};
use tempfile::TempDir;
use tower::ServiceExt;

pub const DOUBT_REPLY: &str = "Osmosis is the movement of water across a membrane.";
pub const NOTES_REPLY: &str = "## Introduction\nPhotosynthesis turns light into sugar.";
pub const TRANSCRIPT: &str = "what is osmosis";

/// Holds back only the first call, so a retry after a dropped request is fast.
#[derive(Default)]
pub struct FirstCallDelay {
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl FirstCallDelay {
    pub fn new(delay: Option<Duration>) -> Self {
        Self {
            delay,
            calls: AtomicUsize::new(0),
        }
    }

    pub async fn wait(&self) {
        let first = self.calls.fetch_add(1, Ordering::SeqCst) == 0;
        if let (true, Some(delay)) = (first, self.delay) {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Answers like the real service would, keyed on what the request asks for.
pub struct FakeGenerator {
    pub fail: bool,
    pub delay: FirstCallDelay,
}

fn first_text(request: &GenerationRequest) -> &str {
    request
        .parts
        .iter()
        .find_map(|part| match part {
            ContentPart::Text { text } => Some(text.as_str()),
            ContentPart::InlineData { .. } => None,
        })
        .unwrap_or_default()
}

pub fn quiz_reply(count: usize) -> String {
    let questions: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "question": format!("Question {}?", i + 1),
                "options": ["A", "B", "C", "D"],
                "correctAnswer": 1,
                "explanation": "B is right."
            })
        })
        .collect();
    Value::Array(questions).to_string()
}

pub fn plan_reply() -> String {
    json!([
        {
            "day": "Monday",
            "sessions": [
                { "time": "4:00 PM - 5:00 PM", "subject": "Physics", "topic": "Motion" }
            ]
        },
        {
            "day": "Tuesday",
            "sessions": [
                { "time": "4:00 PM - 5:00 PM", "subject": "Math", "topic": "Algebra" }
            ]
        }
    ])
    .to_string()
}

#[async_trait]
impl GenerationService for FakeGenerator {
    async fn generate(&self, request: &GenerationRequest) -> PortResult<String> {
        self.delay.wait().await;
        if self.fail {
            return Err(PortError::Unexpected("connection refused".to_string()));
        }
        let text = first_text(request);
        if request.response_schema.is_some() {
            if text.contains("study timetable") {
                return Ok(plan_reply());
            }
            return Ok(quiz_reply(5));
        }
        if request.system_instruction.is_some() {
            return Ok(DOUBT_REPLY.to_string());
        }
        Ok(NOTES_REPLY.to_string())
    }
}

pub struct FakeStt {
    pub delay: FirstCallDelay,
}

#[async_trait]
impl SpeechToTextService for FakeStt {
    async fn transcribe_audio(&self, _audio_data: &[u8], _locale: &str) -> PortResult<String> {
        self.delay.wait().await;
        Ok(TRANSCRIPT.to_string())
    }
}

pub struct TestApp {
    pub router: Router,
    pub profile_path: PathBuf,
    _dir: TempDir,
}

#[derive(Default)]
pub struct TestOptions {
    pub fail: bool,
    pub voice: bool,
    /// Delays the first generation or transcription call.
    pub slow_first: Option<Duration>,
    /// Written to the profile file before startup.
    pub stored_profile: Option<String>,
}

pub async fn create_test_app() -> TestApp {
    create_test_app_with(TestOptions::default()).await
}

pub async fn create_test_app_with(options: TestOptions) -> TestApp {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    let dir = tempfile::tempdir().unwrap();
    let profile_path = dir.path().join("profile.json");
    let path_str = profile_path.to_string_lossy().to_string();
    let config = Config::from_lookup(|key| match key {
        "GEMINI_API_KEY" => Some("test-key".to_string()),
        "PROFILE_PATH" => Some(path_str.clone()),
        _ => None,
    })
    .unwrap();

    if let Some(contents) = &options.stored_profile {
        std::fs::write(&profile_path, contents).unwrap();
    }
    let store: Arc<dyn ProfileStore> =
        Arc::new(api_lib::adapters::JsonFileProfileStore::new(&profile_path));
    let profile = ProfileState::init(store).await.unwrap();
    let generator: Arc<dyn GenerationService> = Arc::new(FakeGenerator {
        fail: options.fail,
        delay: FirstCallDelay::new(options.slow_first),
    });
    let stt: Option<Arc<dyn SpeechToTextService>> = if options.voice {
        Some(Arc::new(FakeStt {
            delay: FirstCallDelay::new(options.slow_first),
        }))
    } else {
        None
    };

    let app_state = Arc::new(AppState::new(
        Arc::new(config),
        StudyAssistant::new(generator),
        stt,
        profile,
    ));

    TestApp {
        router: app_router(app_state),
        profile_path,
        _dir: dir,
    }
}

pub fn json_request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    builder.body(body).unwrap()
}

pub fn audio_request(uri: &str, bytes: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/octet-stream")
        .body(Body::from(bytes))
        .unwrap()
}

/// Returns the status with the body as JSON, or as a JSON string when the
/// body is plain text.
pub async fn read_response(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).to_string()));
    (status, value)
}

pub async fn send(app: &TestApp, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = json_request(method, uri, body);
    let response = app.router.clone().oneshot(request).await.unwrap();
    read_response(response).await
}

pub async fn send_bytes(app: &TestApp, uri: &str, bytes: Vec<u8>) -> (StatusCode, Value) {
    let response = app
        .router
        .clone()
        .oneshot(audio_request(uri, bytes))
        .await
        .unwrap();
    read_response(response).await
}

/// Starts a request and drops it once `after` has passed, the way a client
/// disconnect drops the handler's future.
pub async fn send_and_abandon(app: &TestApp, request: Request<Body>, after: Duration) {
    let result = tokio::time::timeout(after, app.router.clone().oneshot(request)).await;
    assert!(result.is_err(), "request finished before it could be dropped");
}

/// Completes onboarding as Asha, Class 10, CBSE, Hinglish.
pub async fn onboard(app: &TestApp) {
    let (status, _) = send(
        app,
        "POST",
        "/onboarding",
        Some(json!({
            "name": "Asha",
            "classLevel": "10",
            "board": "CBSE",
            "language": "Hinglish"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    for _ in 0..3 {
        let (status, body) = send(app, "POST", "/onboarding/next", None).await;
        assert_eq!(status, StatusCode::OK, "onboarding step failed: {body}");
    }
}
