//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::path::PathBuf;
use study_assistant_core::prompts::DEFAULT_QUIZ_COUNT;
use tracing::Level;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    pub profile_path: PathBuf,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub openai_api_key: Option<String>,
    pub stt_model: String,
    pub quiz_question_count: usize,
    pub cors_origin: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- Server Settings ---
        let bind_address_str =
            lookup("BIND_ADDRESS").unwrap_or_else(|| "127.0.0.1:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let profile_path = lookup("PROFILE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./edugenie_profile.json"));

        let cors_origin =
            lookup("CORS_ORIGIN").unwrap_or_else(|| "http://localhost:5173".to_string());

        // --- Generation Service ---
        let gemini_api_key = lookup("GEMINI_API_KEY")
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ConfigError::MissingVar("GEMINI_API_KEY".to_string()))?;
        let gemini_model =
            lookup("GEMINI_MODEL").unwrap_or_else(|| "gemini-2.5-flash".to_string());
        let gemini_base_url = lookup("GEMINI_BASE_URL")
            .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let quiz_question_count = match lookup("QUIZ_QUESTION_COUNT") {
            Some(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    ConfigError::InvalidValue(
                        "QUIZ_QUESTION_COUNT".to_string(),
                        format!("'{}' is not a positive number", raw),
                    )
                })?,
            None => DEFAULT_QUIZ_COUNT,
        };

        // --- Voice Input (optional) ---
        let openai_api_key = lookup("OPENAI_API_KEY").filter(|key| !key.is_empty());
        let stt_model = lookup("STT_MODEL").unwrap_or_else(|| "whisper-1".to_string());

        Ok(Self {
            bind_address,
            log_level,
            profile_path,
            gemini_api_key,
            gemini_model,
            gemini_base_url,
            openai_api_key,
            stt_model,
            quiz_question_count,
            cors_origin,
        })
    }
}
