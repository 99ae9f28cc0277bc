//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{GeminiAdapter, JsonFileProfileStore, OpenAiSstAdapter},
    config::Config,
    error::ApiError,
    web::{app_router, rest::ApiDoc, state::AppState},
};
use async_openai::{config::OpenAIConfig, Client};
use axum::http::{header::{ACCEPT, CONTENT_TYPE}, HeaderValue, Method};
use axum::Router;
use std::sync::Arc;
use study_assistant_core::{
    ports::{GenerationService, ProfileStore, SpeechToTextService},
    ProfileState, StudyAssistant,
};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Load the Stored Profile ---
    info!(path = %config.profile_path.display(), "Loading profile store...");
    let profile_store: Arc<dyn ProfileStore> =
        Arc::new(JsonFileProfileStore::new(config.profile_path.clone()));
    let profile = ProfileState::init(profile_store).await?;

    // --- 3. Initialize Service Adapters ---
    let http_client = reqwest::Client::builder().build()?;
    let generator: Arc<dyn GenerationService> = Arc::new(GeminiAdapter::new(
        http_client,
        config.gemini_base_url.clone(),
        config.gemini_model.clone(),
        config.gemini_api_key.clone(),
    ));
    info!(model = %config.gemini_model, "Generation service ready");

    let stt_adapter: Option<Arc<dyn SpeechToTextService>> = match &config.openai_api_key {
        Some(key) => {
            let openai_client = Client::with_config(OpenAIConfig::new().with_api_key(key));
            Some(Arc::new(OpenAiSstAdapter::new(
                openai_client,
                config.stt_model.clone(),
            )))
        }
        None => {
            warn!("OPENAI_API_KEY is not set; voice input is disabled");
            None
        }
    };

    // --- 4. Build the Shared AppState ---
    let app_state = Arc::new(AppState::new(
        config.clone(),
        StudyAssistant::new(generator),
        stt_adapter,
        profile,
    ));

    // --- 5. Create the Web Router ---
    let cors_origin = config.cors_origin.parse::<HeaderValue>().map_err(|e| {
        ApiError::Internal(format!(
            "Invalid CORS origin '{}': {}",
            config.cors_origin, e
        ))
    })?;
    let cors = CorsLayer::new()
        .allow_origin(cors_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, ACCEPT]);

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(app_router(app_state).layer(cors))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
