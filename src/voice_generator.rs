use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use log::info;

use crate::providers::SpeechSynthesis;

// @module: Narration synthesis

/// Generates the narration audio file for a script
#[derive(Debug)]
pub struct VoiceGenerator<S: SpeechSynthesis> {
    synthesizer: S,
}

impl<S: SpeechSynthesis> VoiceGenerator<S> {
    pub fn new(synthesizer: S) -> Self {
        VoiceGenerator { synthesizer }
    }

    /// Synthesize narration for the script and write it to `output_path`
    pub async fn generate_narration(&self, script: &str, output_path: &Path) -> Result<PathBuf> {
        if script.trim().is_empty() {
            return Err(anyhow!("Cannot synthesize an empty script"));
        }

        let audio = self
            .synthesizer
            .synthesize(script)
            .await
            .context("Speech synthesis failed")?;

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        std::fs::write(output_path, &audio)
            .with_context(|| format!("Failed to write audio file: {}", output_path.display()))?;

        info!(
            "Narration written: {} ({} bytes)",
            output_path.display(),
            audio.len()
        );

        Ok(output_path.to_path_buf())
    }
}
