/*!
 * Common test utilities for the papertok test suite
 */

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use tempfile::TempDir;

use papertok::assembly::WordTiming;
use papertok::voice_timing::{SpeechSegment, TimingData};

// Re-export the mock providers module
pub mod mock_providers;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Word timings for a short two-sentence narration
pub fn sample_word_timings() -> Vec<WordTiming> {
    vec![
        WordTiming::new("Scientists", 0.0, 0.5),
        WordTiming::new("just", 0.5, 0.7),
        WordTiming::new("found", 0.7, 1.0),
        WordTiming::new("something", 1.0, 1.5),
        WordTiming::new("wild.", 1.5, 2.0),
        WordTiming::new("It", 2.2, 2.4),
        WordTiming::new("changes", 2.4, 2.8),
        WordTiming::new("everything.", 2.8, 3.5),
    ]
}

/// Timing data matching [`sample_word_timings`]
pub fn sample_timing_data() -> TimingData {
    let word_timings = sample_word_timings();
    let duration = word_timings.last().map(|w| w.end).unwrap_or(0.0);
    TimingData {
        text: "Scientists just found something wild. It changes everything.".to_string(),
        word_timings,
        segments: vec![
            SpeechSegment {
                text: "Scientists just found something wild.".to_string(),
                start: 0.0,
                end: 2.0,
                avg_logprob: -0.2,
                no_speech_prob: 0.01,
            },
            SpeechSegment {
                text: "It changes everything.".to_string(),
                start: 2.2,
                end: 3.5,
                avg_logprob: -0.3,
                no_speech_prob: 0.02,
            },
        ],
        duration,
    }
}
