/*!
 * Provider clients for the external services the pipeline calls.
 *
 * This module contains thin client implementations for each provider:
 * - Mistral: chat completions for key-point extraction and script writing
 * - ElevenLabs: text-to-speech narration
 * - Groq: Whisper transcription with word-level timestamps
 * - FAL: Flux image generation
 *
 * Each external call is isolated behind a narrow capability trait ("given X
 * produce Y") so pipeline stages can be exercised against mocks in tests.
 */

use async_trait::async_trait;
use std::fmt::Debug;
use std::path::Path;

use crate::errors::ProviderError;
use crate::voice_timing::TimingData;

/// Capability: given a prompt, produce a text completion
#[async_trait]
pub trait ChatCompletion: Send + Sync + Debug {
    /// Complete a chat prompt, returning the assistant text
    async fn complete_chat(
        &self,
        system: Option<&str>,
        prompt: &str,
    ) -> Result<String, ProviderError>;
}

/// Capability: given narration text, produce encoded audio bytes
#[async_trait]
pub trait SpeechSynthesis: Send + Sync + Debug {
    /// Synthesize speech for the given text
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, ProviderError>;
}

/// Capability: given an audio file, produce word-level timing data
#[async_trait]
pub trait TimedTranscription: Send + Sync + Debug {
    /// Transcribe the audio file with word and segment timestamps
    async fn transcribe(&self, audio_path: &Path) -> Result<TimingData, ProviderError>;
}

/// Capability: given an image prompt, produce encoded image bytes
#[async_trait]
pub trait ImageSynthesis: Send + Sync + Debug {
    /// Generate one image for the prompt
    async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>, ProviderError>;
}

pub mod elevenlabs;
pub mod fal;
pub mod groq;
pub mod mistral;
