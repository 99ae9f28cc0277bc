//! services/api/src/adapters/sst.rs
//!
//! This module contains the adapter for OpenAI's Speech-to-Text (Whisper) service.
//! It implements the `SpeechToTextService` port from the `core` crate and backs
//! the voice button of the doubt solver.

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::audio::{AudioInput, CreateTranscriptionRequest},
    Client,
};
use async_trait::async_trait;
use hound::{WavSpec, WavWriter};
use study_assistant_core::ports::{PortError, PortResult, SpeechToTextService};
use tracing::info;

/// Sample rate of the PCM16 mono audio the front end records.
pub const SAMPLE_RATE: u32 = 48_000;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `SpeechToTextService` port using the OpenAI Whisper API.
#[derive(Clone)]
pub struct OpenAiSstAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiSstAdapter {
    /// Creates a new `OpenAiSstAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }

    pub(crate) fn pcm16_to_wav(pcm_data: &[u8], sample_rate: u32) -> Result<Vec<u8>, hound::Error> {
        let mut cursor = std::io::Cursor::new(Vec::new());

        let spec = WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut writer = WavWriter::new(&mut cursor, spec)?;

        // Little-endian byte pairs -> i16 samples; a trailing odd byte is dropped.
        for chunk in pcm_data.chunks_exact(2) {
            let sample = i16::from_le_bytes([chunk[0], chunk[1]]);
            writer.write_sample(sample)?;
        }

        writer.finalize()?;
        Ok(cursor.into_inner())
    }

    /// Whisper takes an ISO-639-1 code, so `hi-IN` becomes `hi`.
    pub(crate) fn language_hint(locale: &str) -> String {
        locale
            .split(|c: char| c == '-' || c == '_')
            .next()
            .unwrap_or(locale)
            .to_lowercase()
    }
}

//=========================================================================================
// `SpeechToTextService` Trait Implementation
//=========================================================================================

#[async_trait]
impl SpeechToTextService for OpenAiSstAdapter {
    /// Transcribes raw PCM16 audio using the configured Whisper model.
    async fn transcribe_audio(&self, audio_data: &[u8], locale: &str) -> PortResult<String> {
        if audio_data.len() < 2 {
            return Err(PortError::Malformed("No audio was recorded".to_string()));
        }
        let wav_data = Self::pcm16_to_wav(audio_data, SAMPLE_RATE)
            .map_err(|e| PortError::Unexpected(format!("Failed to encode WAV: {}", e)))?;

        let input = AudioInput::from_vec_u8("voice_doubt.wav".into(), wav_data);

        let request = CreateTranscriptionRequest {
            file: input,
            model: self.model.clone(),
            language: Some(Self::language_hint(locale)),
            ..Default::default()
        };

        // Call the API and manually map the error, which respects the orphan rule.
        let response = self
            .client
            .audio()
            .transcription()
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Unexpected(e.to_string()))?;

        info!(locale, chars = response.text.len(), "Voice input transcribed");
        Ok(response.text)
    }
}
