use std::time::Duration;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::Serialize;

use crate::errors::ProviderError;
use crate::providers::SpeechSynthesis;

// Popular preset voices and their ElevenLabs voice ids
pub const PRESET_VOICES: &[(&str, &str)] = &[
    ("rachel", "21m00Tcm4TlvDq8ikWAM"),
    ("drew", "29vD33N1CtxCmqQRPOHJ"),
    ("clyde", "2EiwWnXFnvU5JabPnv8n"),
    ("bella", "EXAVITQu4vr4xnSDxMaL"),
    ("antoni", "ErXwobaYiN019PkySvjV"),
    ("elli", "MF3mGyEYCl7XYWbV9V6O"),
    ("josh", "TxGEqnHWrfWFTfGW9XjX"),
    ("arnold", "VR6AewLTigWG4xSOukaG"),
    ("adam", "pNInz6obpgDQGcFmaJgB"),
    ("sam", "yoZ06aMxZJJ28mfd3POQ"),
];

/// Resolve a preset voice name to its voice id. Unknown names are passed
/// through unchanged so raw voice ids keep working.
pub fn resolve_voice_id(voice: &str) -> String {
    let lowered = voice.to_lowercase();
    PRESET_VOICES
        .iter()
        .find(|(name, _)| *name == lowered)
        .map(|(_, id)| (*id).to_string())
        .unwrap_or_else(|| voice.to_string())
}

/// ElevenLabs client for text-to-speech narration
#[derive(Debug)]
pub struct ElevenLabs {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (optional, defaults to public API)
    endpoint: String,
    /// Voice id used for synthesis
    voice_id: String,
    /// Model id used for synthesis
    model_id: String,
}

/// ElevenLabs text-to-speech request body
#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    /// Narration text
    text: &'a str,

    /// Model id (e.g. "eleven_multilingual_v2")
    model_id: &'a str,

    /// Voice tuning parameters
    voice_settings: VoiceSettings,
}

/// Voice tuning parameters
#[derive(Debug, Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
}

impl ElevenLabs {
    /// Create a new ElevenLabs client. `voice` may be a preset name or a
    /// raw voice id.
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        voice: &str,
        model_id: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(180))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            voice_id: resolve_voice_id(voice),
            model_id: model_id.into(),
        }
    }

    fn base_url(&self) -> String {
        if self.endpoint.is_empty() {
            "https://api.elevenlabs.io".to_string()
        } else {
            self.endpoint.trim_end_matches('/').to_string()
        }
    }

    /// Synthesize narration audio (mp3 bytes) for the given text
    pub async fn text_to_speech(&self, text: &str) -> Result<Vec<u8>> {
        let api_url = format!("{}/v1/text-to-speech/{}", self.base_url(), self.voice_id);

        let request = SpeechRequest {
            text,
            model_id: &self.model_id,
            voice_settings: VoiceSettings {
                stability: 0.5,
                similarity_boost: 0.75,
            },
        };

        debug!(
            "Requesting speech synthesis: {} chars, voice {}",
            text.len(),
            self.voice_id
        );

        let response = self
            .client
            .post(&api_url)
            .header("xi-api-key", &self.api_key)
            .header("Accept", "audio/mpeg")
            .json(&request)
            .send()
            .await
            .map_err(|e| anyhow!("Failed to send request to ElevenLabs API: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("ElevenLabs API error ({}): {}", status, error_text);
            return Err(anyhow!("ElevenLabs API error ({}): {}", status, error_text));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| anyhow!("Failed to read ElevenLabs audio response: {}", e))?;

        Ok(bytes.to_vec())
    }

    /// Test the connection to the ElevenLabs API
    pub async fn test_connection(&self) -> Result<()> {
        let api_url = format!("{}/v1/voices", self.base_url());

        let response = self
            .client
            .get(&api_url)
            .header("xi-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| anyhow!("Failed to connect to ElevenLabs API: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("ElevenLabs API error: {}", status));
        }
        Ok(())
    }
}

#[async_trait]
impl SpeechSynthesis for ElevenLabs {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, ProviderError> {
        self.text_to_speech(text)
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))
    }
}
