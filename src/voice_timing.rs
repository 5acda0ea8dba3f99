use std::path::Path;

use anyhow::{Context, Result, anyhow};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::assembly::WordTiming;
use crate::providers::TimedTranscription;

// @module: Word-level timing extraction from narration audio

/// One transcription segment with confidence scores, as returned by the
/// transcription provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechSegment {
    /// Segment text
    pub text: String,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    /// Average log probability reported by the model
    #[serde(default)]
    pub avg_logprob: f64,
    /// Probability the segment contains no speech
    #[serde(default)]
    pub no_speech_prob: f64,
}

/// Timing artifact produced from the narration audio: the full transcript,
/// per-word timestamps and segment-level confidence data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TimingData {
    /// Full transcribed text
    pub text: String,

    /// Ordered word-level timestamps
    pub word_timings: Vec<WordTiming>,

    /// Segment-level information
    pub segments: Vec<SpeechSegment>,

    /// Narration duration in seconds (end of the last word)
    pub duration: f64,
}

impl TimingData {
    /// Save timing data to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create timing file: {}", path.display()))?;
        serde_json::to_writer_pretty(file, self)
            .with_context(|| format!("Failed to write timing JSON: {}", path.display()))?;
        Ok(())
    }

    /// Load timing data from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read timing file: {}", path.display()))?;
        let data: TimingData = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse timing JSON: {}", path.display()))?;
        Ok(data)
    }
}

/// Extracts word-level timing for captions from narration audio
#[derive(Debug)]
pub struct VoiceTiming<T: TimedTranscription> {
    transcriber: T,
}

impl<T: TimedTranscription> VoiceTiming<T> {
    pub fn new(transcriber: T) -> Self {
        VoiceTiming { transcriber }
    }

    /// Run transcription on the audio file and return the timing artifact
    pub async fn extract_timing(&self, audio_path: &Path) -> Result<TimingData> {
        if !audio_path.exists() {
            return Err(anyhow!("Audio file not found: {:?}", audio_path));
        }

        let timing = self
            .transcriber
            .transcribe(audio_path)
            .await
            .with_context(|| format!("Transcription failed for {:?}", audio_path))?;

        log_summary(&timing);
        Ok(timing)
    }
}

/// Log a short summary of extracted timing data
pub fn log_summary(timing: &TimingData) {
    info!(
        "Transcription: {} words, {} segment(s), {:.2}s",
        timing.word_timings.len(),
        timing.segments.len(),
        timing.duration
    );
    for (i, word) in timing.word_timings.iter().take(10).enumerate() {
        debug!(
            "  {:2}. '{}' at {:.2}-{:.2}s",
            i + 1,
            word.word,
            word.start,
            word.end
        );
    }
    if timing.word_timings.len() > 10 {
        debug!("  ... and {} more words", timing.word_timings.len() - 10);
    }
}
