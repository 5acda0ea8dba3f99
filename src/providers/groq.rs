use std::path::Path;
use std::time::Duration;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use log::{debug, error, warn};
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::assembly::WordTiming;
use crate::errors::ProviderError;
use crate::providers::TimedTranscription;
use crate::voice_timing::{SpeechSegment, TimingData};

/// Groq client for Whisper audio transcription with word-level timestamps
#[derive(Debug)]
pub struct GroqWhisper {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (optional, defaults to public API)
    endpoint: String,
    /// Whisper model used for transcription
    model: String,
    /// Spoken language hint for the transcription
    language: String,
}

/// Groq verbose_json transcription response
#[derive(Debug, Deserialize)]
pub struct GroqTranscription {
    /// Full transcribed text
    pub text: String,

    /// Word-level timestamps (requires word granularity)
    #[serde(default)]
    pub words: Vec<GroqWord>,

    /// Segment-level timestamps
    #[serde(default)]
    pub segments: Vec<GroqSegment>,
}

/// One transcribed word with timing
#[derive(Debug, Deserialize)]
pub struct GroqWord {
    pub word: String,
    pub start: f64,
    pub end: f64,
}

/// One transcription segment with confidence scores
#[derive(Debug, Deserialize)]
pub struct GroqSegment {
    pub text: String,
    pub start: f64,
    pub end: f64,
    #[serde(default)]
    pub avg_logprob: f64,
    #[serde(default)]
    pub no_speech_prob: f64,
}

impl GroqWhisper {
    /// Create a new Groq Whisper client
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(300))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            model: model.into(),
            language: language.into(),
        }
    }

    fn base_url(&self) -> String {
        if self.endpoint.is_empty() {
            "https://api.groq.com".to_string()
        } else {
            self.endpoint.trim_end_matches('/').to_string()
        }
    }

    /// Transcribe an audio file with word and segment timestamps
    pub async fn transcribe_file(&self, audio_path: &Path) -> Result<GroqTranscription> {
        if !audio_path.exists() {
            return Err(anyhow!("Audio file not found: {:?}", audio_path));
        }

        let file_name = audio_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "audio".to_string());

        let bytes = tokio::fs::read(audio_path)
            .await
            .map_err(|e| anyhow!("Failed to read audio file {:?}: {}", audio_path, e))?;

        debug!(
            "Transcribing {:?} ({} bytes) with model {}",
            audio_path,
            bytes.len(),
            self.model
        );

        let file_part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("application/octet-stream")
            .map_err(|e| anyhow!("Failed to build multipart file: {}", e))?;

        let form = Form::new()
            .part("file", file_part)
            .text("model", self.model.clone())
            .text("response_format", "verbose_json")
            .text("timestamp_granularities[]", "word")
            .text("timestamp_granularities[]", "segment")
            .text("language", self.language.clone())
            .text("temperature", "0");

        let api_url = format!("{}/openai/v1/audio/transcriptions", self.base_url());

        let response = self
            .client
            .post(&api_url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| anyhow!("Failed to send request to Groq API: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Groq API error ({}): {}", status, error_text);
            return Err(anyhow!("Groq API error ({}): {}", status, error_text));
        }

        let transcription = response
            .json::<GroqTranscription>()
            .await
            .map_err(|e| anyhow!("Failed to parse Groq transcription response: {}", e))?;

        Ok(transcription)
    }

    /// Test the connection to the Groq API
    pub async fn test_connection(&self) -> Result<()> {
        let api_url = format!("{}/openai/v1/models", self.base_url());

        let response = self
            .client
            .get(&api_url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| anyhow!("Failed to connect to Groq API: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("Groq API error: {}", status));
        }
        Ok(())
    }
}

/// Reshape the raw transcription into the timing artifact the assembly
/// core consumes
pub fn into_timing_data(transcription: GroqTranscription) -> TimingData {
    let word_timings: Vec<WordTiming> = transcription
        .words
        .into_iter()
        .map(|w| WordTiming::new(w.word.trim(), w.start, w.end))
        .collect();

    if word_timings.is_empty() {
        warn!("Transcription returned no word timestamps");
    }

    let segments: Vec<SpeechSegment> = transcription
        .segments
        .into_iter()
        .map(|s| SpeechSegment {
            text: s.text.trim().to_string(),
            start: s.start,
            end: s.end,
            avg_logprob: s.avg_logprob,
            no_speech_prob: s.no_speech_prob,
        })
        .collect();

    let duration = word_timings.last().map(|w| w.end).unwrap_or(0.0);

    TimingData {
        text: transcription.text,
        word_timings,
        segments,
        duration,
    }
}

#[async_trait]
impl TimedTranscription for GroqWhisper {
    async fn transcribe(&self, audio_path: &Path) -> Result<TimingData, ProviderError> {
        let transcription = self
            .transcribe_file(audio_path)
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;
        Ok(into_timing_data(transcription))
    }
}
