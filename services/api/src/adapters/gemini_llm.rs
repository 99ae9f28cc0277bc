//! services/api/src/adapters/gemini_llm.rs
//!
//! This module contains the adapter for the Gemini `generateContent` REST API.
//! It implements the `GenerationService` port from the `core` crate.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use study_assistant_core::{
    generation::{ContentPart, GenerationRequest},
    ports::{GenerationService, PortError, PortResult},
};
use tracing::debug;

//=========================================================================================
// Wire Types
//=========================================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text {
        text: &'a str,
    },
    #[serde(rename_all = "camelCase")]
    InlineData { inline_data: InlineData<'a> },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a Value,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl<'a> From<&'a ContentPart> for Part<'a> {
    fn from(part: &'a ContentPart) -> Self {
        match part {
            ContentPart::Text { text } => Part::Text { text: text.as_str() },
            ContentPart::InlineData { mime_type, data } => Part::InlineData {
                inline_data: InlineData {
                    mime_type: mime_type.as_str(),
                    data: data.as_str(),
                },
            },
        }
    }
}

impl<'a> From<&'a GenerationRequest> for GeminiRequest<'a> {
    fn from(request: &'a GenerationRequest) -> Self {
        Self {
            system_instruction: request.system_instruction.as_deref().map(|text| Content {
                role: None,
                parts: vec![Part::Text { text }],
            }),
            contents: vec![Content {
                role: Some("user"),
                parts: request.parts.iter().map(Part::from).collect(),
            }],
            generation_config: request.response_schema.as_ref().map(|schema| GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
            }),
        }
    }
}

impl GeminiResponse {
    /// Joins the text parts of the first candidate.
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `GenerationService` against the Gemini REST API.
#[derive(Clone)]
pub struct GeminiAdapter {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiAdapter {
    /// Creates a new `GeminiAdapter`. `base_url` is the API root, e.g. `.../v1beta`.
    pub fn new(client: reqwest::Client, base_url: String, model: String, api_key: String) -> Self {
        Self {
            client,
            base_url,
            model,
            api_key,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

//=========================================================================================
// `GenerationService` Trait Implementation
//=========================================================================================

#[async_trait]
impl GenerationService for GeminiAdapter {
    async fn generate(&self, request: &GenerationRequest) -> PortResult<String> {
        let body = GeminiRequest::from(request);
        debug!(
            model = %self.model,
            parts = request.parts.len(),
            json = request.expects_json(),
            "Calling Gemini"
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(PortError::Unexpected(format!(
                "Gemini API error ({}): {}",
                status, error_text
            )));
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| PortError::Malformed(e.to_string()))?;

        gemini_response.into_text().ok_or(PortError::EmptyResponse)
    }
}
