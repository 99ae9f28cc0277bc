//! crates/study_assistant_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of the generation API, the speech backend, and profile storage.

use crate::domain::UserProfile;
use crate::generation::GenerationRequest;
use async_trait::async_trait;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., network, filesystem).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
    #[error("The service returned an empty response")]
    EmptyResponse,
    #[error("Malformed data: {0}")]
    Malformed(String),
    #[error("Capability not supported: {0}")]
    Unsupported(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Sends one request and returns the text of the reply.
    ///
    /// When the request declares a response schema the returned text is the JSON
    /// document. Implementations must report a missing or blank reply as
    /// `PortError::EmptyResponse`.
    async fn generate(&self, request: &GenerationRequest) -> PortResult<String>;
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Returns the persisted profile, or `None` if the student never onboarded.
    async fn load(&self) -> PortResult<Option<UserProfile>>;

    async fn save(&self, profile: &UserProfile) -> PortResult<()>;

    /// Removes the persisted profile. Clearing an absent profile is not an error.
    async fn clear(&self) -> PortResult<()>;
}

#[async_trait]
pub trait SpeechToTextService: Send + Sync {
    /// Transcribes a slice of audio data into text, using `locale` (e.g. `hi-IN`) as a hint.
    async fn transcribe_audio(&self, audio_data: &[u8], locale: &str) -> PortResult<String>;
}
