use anyhow::{Context, Result};
use log::{debug, info};

use crate::providers::ChatCompletion;

// @module: Script generation from paper text

/// Default prompt for distilling a paper abstract into key points
const KEY_POINTS_PROMPT: &str = "You are a research communicator. Read the following paper text \
and extract the 3-5 most surprising or important findings as short bullet points, in plain \
language a general audience understands.\n\nPaper text:\n{paper}";

/// Default prompt for turning key points into a short-form video script
const SCRIPT_PROMPT: &str = "You're an AI scriptwriter for short vertical videos. You take \
research findings and turn them into short, dramatic, or funny monologues that sound like \
something a curious and slightly unhinged narrator would say.\n\nHere are the findings:\n\
{key_points}\n\nNow turn that into a 30-60 second video script with:\n\
- A dramatic or funny hook (first line)\n- A surprising twist\n- A weird fact\n\
- A closing line with flair\n\nReturn only the spoken script, no stage directions.";

/// Generates the narration script from paper text via the chat provider
#[derive(Debug)]
pub struct ScriptWriter<C: ChatCompletion> {
    chat: C,
    key_points_prompt: String,
    script_prompt: String,
}

impl<C: ChatCompletion> ScriptWriter<C> {
    pub fn new(chat: C) -> Self {
        ScriptWriter {
            chat,
            key_points_prompt: KEY_POINTS_PROMPT.to_string(),
            script_prompt: SCRIPT_PROMPT.to_string(),
        }
    }

    /// Replace the default prompt templates. Templates use `{paper}` and
    /// `{key_points}` placeholders respectively.
    pub fn with_prompts(
        mut self,
        key_points_prompt: impl Into<String>,
        script_prompt: impl Into<String>,
    ) -> Self {
        self.key_points_prompt = key_points_prompt.into();
        self.script_prompt = script_prompt.into();
        self
    }

    /// Extract key points from paper text
    pub async fn extract_key_points(&self, paper_text: &str) -> Result<String> {
        let prompt = self.key_points_prompt.replace("{paper}", paper_text);
        let key_points = self
            .chat
            .complete_chat(None, &prompt)
            .await
            .context("Key point extraction failed")?;
        debug!("Extracted key points ({} chars)", key_points.len());
        Ok(key_points)
    }

    /// Generate the narration script from key points
    pub async fn generate_script(&self, key_points: &str) -> Result<String> {
        let prompt = self.script_prompt.replace("{key_points}", key_points);
        let script = self
            .chat
            .complete_chat(None, &prompt)
            .await
            .context("Script generation failed")?;
        info!("Generated script ({} chars)", script.len());
        Ok(script)
    }
}

/// Split a script into `target_segments` roughly equal parts on sentence
/// boundaries, one part per generated image.
///
/// Sentences are never split; with fewer sentences than requested segments,
/// fewer segments come back. An empty script yields no segments.
pub fn segment_script(script: &str, target_segments: usize) -> Vec<String> {
    let sentences = split_sentences(script);
    if sentences.is_empty() || target_segments == 0 {
        return Vec::new();
    }

    let segment_count = target_segments.min(sentences.len());
    let total_chars: usize = sentences.iter().map(|s| s.len()).sum();
    let target_chars = total_chars / segment_count;

    let mut segments: Vec<String> = Vec::with_capacity(segment_count);
    let mut current = String::new();

    for sentence in &sentences {
        if !current.is_empty()
            && current.len() + sentence.len() > target_chars
            && segments.len() + 1 < segment_count
        {
            segments.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(sentence);
    }
    if !current.is_empty() {
        segments.push(current);
    }

    segments
}

/// Split text into trimmed sentences on terminal punctuation
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        current.push(ch);
        if matches!(ch, '.' | '!' | '?') {
            let trimmed = current.trim();
            if !trimmed.is_empty() {
                sentences.push(trimmed.to_string());
            }
            current.clear();
        }
    }
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }

    sentences
}
