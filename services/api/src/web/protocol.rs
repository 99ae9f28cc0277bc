//! services/api/src/web/protocol.rs
//!
//! Defines the JSON payloads exchanged between the browser front end and the
//! service, and how core errors map onto HTTP status codes.

use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use study_assistant_core::{
    domain::{Board, Language, NoteStyle, Stream, UserProfile},
    quiz::QuizError,
    screens::{Completion, ScreenError},
    shell::View,
    speech::SpeechError,
};
use tracing::error;
use utoipa::ToSchema;

/// The error shape every handler returns.
pub type HandlerError = (StatusCode, String);

//=========================================================================================
// Payloads Sent FROM the Client (Browser) TO the Server
//=========================================================================================

/// Field updates for the onboarding wizard. Omitted fields are left unchanged.
#[derive(Deserialize, Debug, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingUpdate {
    pub name: Option<String>,
    pub class_level: Option<String>,
    #[schema(value_type = Option<String>, example = "CBSE")]
    pub board: Option<Board>,
    #[schema(value_type = Option<String>, example = "Science (PCM)")]
    pub stream: Option<Stream>,
    /// Removes a previously chosen stream.
    #[serde(default)]
    pub clear_stream: bool,
    #[schema(value_type = Option<String>, example = "Hinglish")]
    pub language: Option<Language>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct NavigateRequest {
    #[schema(value_type = String, example = "quiz")]
    pub view: View,
}

/// Composer updates for the doubt solver.
#[derive(Deserialize, Debug, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DoubtSettingsRequest {
    pub funny_mode: Option<bool>,
    pub input: Option<String>,
    /// A data-URL or raw base64 image to attach.
    pub image: Option<String>,
    #[serde(default)]
    pub clear_image: bool,
}

/// Sends the composer. `text` and `image` replace the composer contents when given.
#[derive(Deserialize, Debug, Default, ToSchema)]
pub struct SendDoubtRequest {
    pub text: Option<String>,
    pub image: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct NotesRequest {
    pub topic: String,
    #[schema(value_type = Option<String>, example = "Exam")]
    pub style: Option<NoteStyle>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct StartQuizRequest {
    pub topic: String,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct SelectOptionRequest {
    pub option: usize,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct AddSubjectRequest {
    pub subject: String,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct HoursRequest {
    pub hours: u8,
}

//=========================================================================================
// Payloads Sent FROM the Server TO the Client (Browser)
//=========================================================================================

/// Result of a generation-backed action together with the updated screen.
#[derive(Serialize, Debug)]
pub struct ScreenUpdate<'a, T: Serialize> {
    pub completion: Completion,
    pub screen: &'a T,
}

/// Status of the profile slot, as returned by `GET /profile`.
#[derive(Serialize, Debug, ToSchema)]
pub struct ProfileResponse {
    pub onboarded: bool,
    #[schema(value_type = Option<Object>)]
    pub profile: Option<UserProfile>,
}

//=========================================================================================
// Helpers
//=========================================================================================

/// Serializes a snapshot of state while the caller still holds its lock.
pub fn snapshot<T: Serialize>(value: &T) -> Result<Json<Value>, HandlerError> {
    serde_json::to_value(value).map(Json).map_err(|e| {
        error!("Failed to serialize response: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to build response".to_string(),
        )
    })
}

/// Serializes the outcome of a generation-backed action with the screen it updated.
pub fn screen_update<T: Serialize>(
    completion: Completion,
    screen: &T,
) -> Result<Json<Value>, HandlerError> {
    snapshot(&ScreenUpdate { completion, screen })
}

/// Maps a rejected screen action onto a status code and a user-facing message.
pub fn reject(err: ScreenError) -> HandlerError {
    let status = match &err {
        ScreenError::EmptyInput(_)
        | ScreenError::InvalidImage
        | ScreenError::NoSubjects
        | ScreenError::DuplicateSubject(_)
        | ScreenError::InvalidHours { .. }
        | ScreenError::Quiz(QuizError::OptionOutOfRange { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
        ScreenError::UnknownSubject(_) => StatusCode::NOT_FOUND,
        ScreenError::Busy
        | ScreenError::Quiz(_)
        | ScreenError::Speech(SpeechError::AlreadyListening) => StatusCode::CONFLICT,
        ScreenError::Speech(SpeechError::Unsupported) => StatusCode::NOT_IMPLEMENTED,
    };
    (status, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_statuses() {
        assert_eq!(reject(ScreenError::Busy).0, StatusCode::CONFLICT);
        assert_eq!(
            reject(ScreenError::EmptyInput("a topic")),
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Please enter a topic first".to_string()
            )
        );
        assert_eq!(
            reject(QuizError::Unanswered.into()).0,
            StatusCode::CONFLICT
        );
        assert_eq!(
            reject(SpeechError::Unsupported.into()).0,
            StatusCode::NOT_IMPLEMENTED
        );
    }

    #[test]
    fn onboarding_update_parses_enum_names() {
        let update: OnboardingUpdate = serde_json::from_str(
            r#"{"classLevel":"11","board":"State Board","stream":"Commerce","language":"Hindi"}"#,
        )
        .unwrap();
        assert_eq!(update.board, Some(Board::StateBoard));
        assert_eq!(update.stream, Some(Stream::Commerce));
        assert_eq!(update.language, Some(Language::Hindi));
        assert!(!update.clear_stream);
    }
}
