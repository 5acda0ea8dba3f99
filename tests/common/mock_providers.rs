/*!
 * Mock provider implementations for testing
 *
 * This module provides mock implementations of all capability traits to
 * avoid external API calls in tests. Each mock records the requests it
 * receives and returns predetermined responses.
 */

#![allow(dead_code)]

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use papertok::errors::ProviderError;
use papertok::providers::{ChatCompletion, ImageSynthesis, SpeechSynthesis, TimedTranscription};
use papertok::voice_timing::TimingData;

/// Tracks API calls to ensure no actual external requests are made
#[derive(Debug, Default)]
pub struct ApiCallTracker {
    /// Count of mock API calls made
    pub call_count: usize,
    /// Last request received
    pub last_request: Option<String>,
    /// Should the next call fail
    pub should_fail: bool,
}

impl ApiCallTracker {
    fn record(&mut self, request: impl Into<String>) -> Result<(), ProviderError> {
        self.call_count += 1;
        self.last_request = Some(request.into());
        if self.should_fail {
            self.should_fail = false;
            return Err(ProviderError::RequestFailed("mock failure".to_string()));
        }
        Ok(())
    }
}

/// Mock chat provider returning a fixed response
#[derive(Debug)]
pub struct MockChat {
    tracker: Arc<Mutex<ApiCallTracker>>,
    response: String,
}

impl MockChat {
    pub fn new(response: impl Into<String>) -> Self {
        MockChat {
            tracker: Arc::new(Mutex::new(ApiCallTracker::default())),
            response: response.into(),
        }
    }

    pub fn tracker(&self) -> Arc<Mutex<ApiCallTracker>> {
        self.tracker.clone()
    }

    pub fn fail_next_call(&self) {
        self.tracker.lock().unwrap().should_fail = true;
    }
}

#[async_trait]
impl ChatCompletion for MockChat {
    async fn complete_chat(
        &self,
        _system: Option<&str>,
        prompt: &str,
    ) -> Result<String, ProviderError> {
        self.tracker.lock().unwrap().record(prompt)?;
        Ok(self.response.clone())
    }
}

/// Mock speech provider returning fixed audio bytes
#[derive(Debug)]
pub struct MockSpeech {
    tracker: Arc<Mutex<ApiCallTracker>>,
    audio: Vec<u8>,
}

impl MockSpeech {
    pub fn new(audio: Vec<u8>) -> Self {
        MockSpeech {
            tracker: Arc::new(Mutex::new(ApiCallTracker::default())),
            audio,
        }
    }

    pub fn tracker(&self) -> Arc<Mutex<ApiCallTracker>> {
        self.tracker.clone()
    }
}

#[async_trait]
impl SpeechSynthesis for MockSpeech {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, ProviderError> {
        self.tracker.lock().unwrap().record(text)?;
        Ok(self.audio.clone())
    }
}

/// Mock transcription provider returning preset timing data
#[derive(Debug)]
pub struct MockTranscription {
    tracker: Arc<Mutex<ApiCallTracker>>,
    timing: TimingData,
}

impl MockTranscription {
    pub fn new(timing: TimingData) -> Self {
        MockTranscription {
            tracker: Arc::new(Mutex::new(ApiCallTracker::default())),
            timing,
        }
    }

    pub fn tracker(&self) -> Arc<Mutex<ApiCallTracker>> {
        self.tracker.clone()
    }
}

#[async_trait]
impl TimedTranscription for MockTranscription {
    async fn transcribe(&self, audio_path: &Path) -> Result<TimingData, ProviderError> {
        self.tracker
            .lock()
            .unwrap()
            .record(audio_path.to_string_lossy())?;
        Ok(self.timing.clone())
    }
}

/// Mock image provider returning fixed image bytes
#[derive(Debug)]
pub struct MockImage {
    tracker: Arc<Mutex<ApiCallTracker>>,
    image: Vec<u8>,
}

impl MockImage {
    pub fn new(image: Vec<u8>) -> Self {
        MockImage {
            tracker: Arc::new(Mutex::new(ApiCallTracker::default())),
            image,
        }
    }

    pub fn tracker(&self) -> Arc<Mutex<ApiCallTracker>> {
        self.tracker.clone()
    }
}

#[async_trait]
impl ImageSynthesis for MockImage {
    async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>, ProviderError> {
        self.tracker.lock().unwrap().record(prompt)?;
        Ok(self.image.clone())
    }
}
