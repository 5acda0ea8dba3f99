use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;

use crate::providers::ImageSynthesis;

// @module: Scene illustration generation

/// Style directive appended to every image prompt so the scenes look like one set
const STYLE_SUFFIX: &str =
    "vibrant cartoon illustration, bold outlines, flat colors, vertical composition";

/// Longest slice of a script segment carried into an image prompt
const MAX_PROMPT_CHARS: usize = 300;

/// Generates one illustration per script segment
#[derive(Debug)]
pub struct ImageGenerator<I: ImageSynthesis> {
    synthesizer: I,
    style_suffix: String,
}

impl<I: ImageSynthesis> ImageGenerator<I> {
    pub fn new(synthesizer: I) -> Self {
        ImageGenerator {
            synthesizer,
            style_suffix: STYLE_SUFFIX.to_string(),
        }
    }

    /// Override the style directive appended to each prompt
    pub fn with_style(mut self, style_suffix: impl Into<String>) -> Self {
        self.style_suffix = style_suffix.into();
        self
    }

    /// Build the image prompt for a script segment
    pub fn create_prompt(&self, segment: &str) -> String {
        let mut scene = segment.trim().to_string();
        if scene.len() > MAX_PROMPT_CHARS {
            // Cut on a char boundary, not mid-codepoint
            let mut cut = MAX_PROMPT_CHARS;
            while !scene.is_char_boundary(cut) {
                cut -= 1;
            }
            scene.truncate(cut);
        }
        format!("{}, {}", scene, self.style_suffix)
    }

    /// Generate one image per segment, written as ordered files under
    /// `output_dir` (scene_01.png, scene_02.png, ...)
    pub async fn generate_images(
        &self,
        segments: &[String],
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

        let mut paths = Vec::with_capacity(segments.len());
        for (i, segment) in segments.iter().enumerate() {
            let prompt = self.create_prompt(segment);
            let bytes = self
                .synthesizer
                .generate_image(&prompt)
                .await
                .with_context(|| format!("Image generation failed for segment {}", i + 1))?;

            let path = output_dir.join(format!("scene_{:02}.png", i + 1));
            std::fs::write(&path, &bytes)
                .with_context(|| format!("Failed to write image: {}", path.display()))?;

            info!("Image {}/{} written: {}", i + 1, segments.len(), path.display());
            paths.push(path);
        }

        Ok(paths)
    }
}
