use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::assembly::CaptionLimits;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Root directory for per-run assets
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,

    /// Directory for finished videos
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Script generation (Mistral) config
    #[serde(default)]
    pub script: ScriptConfig,

    /// Narration synthesis (ElevenLabs) config
    #[serde(default)]
    pub voice: VoiceConfig,

    /// Word timing extraction (Groq Whisper) config
    #[serde(default)]
    pub timing: TimingProviderConfig,

    /// Image generation (FAL Flux) config
    #[serde(default)]
    pub image: ImageProviderConfig,

    /// Timeline assembly config
    #[serde(default)]
    pub assembly: AssemblyConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Script generation provider settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ScriptConfig {
    /// Model name
    #[serde(default = "default_script_model")]
    pub model: String,

    /// API key (falls back to MISTRAL_API_KEY)
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service URL (empty uses the public API)
    #[serde(default = "String::new")]
    pub endpoint: String,

    /// Sampling temperature
    #[serde(default = "default_script_temperature")]
    pub temperature: f32,

    /// How many script segments (and images) to aim for
    #[serde(default = "default_segment_count")]
    pub segment_count: usize,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            model: default_script_model(),
            api_key: String::new(),
            endpoint: String::new(),
            temperature: default_script_temperature(),
            segment_count: default_segment_count(),
        }
    }
}

impl ScriptConfig {
    /// API key from config or environment
    pub fn resolved_api_key(&self) -> String {
        resolve_api_key(&self.api_key, "MISTRAL_API_KEY")
    }
}

/// Narration synthesis provider settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VoiceConfig {
    /// Preset voice name or raw voice id
    #[serde(default = "default_voice")]
    pub voice: String,

    /// Model name
    #[serde(default = "default_voice_model")]
    pub model: String,

    /// API key (falls back to ELEVENLABS_API_KEY)
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service URL (empty uses the public API)
    #[serde(default = "String::new")]
    pub endpoint: String,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            voice: default_voice(),
            model: default_voice_model(),
            api_key: String::new(),
            endpoint: String::new(),
        }
    }
}

impl VoiceConfig {
    /// API key from config or environment
    pub fn resolved_api_key(&self) -> String {
        resolve_api_key(&self.api_key, "ELEVENLABS_API_KEY")
    }
}

/// Word timing extraction provider settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TimingProviderConfig {
    /// Whisper model name
    #[serde(default = "default_timing_model")]
    pub model: String,

    /// API key (falls back to GROQ_API_KEY)
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service URL (empty uses the public API)
    #[serde(default = "String::new")]
    pub endpoint: String,

    /// Spoken language hint
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for TimingProviderConfig {
    fn default() -> Self {
        Self {
            model: default_timing_model(),
            api_key: String::new(),
            endpoint: String::new(),
            language: default_language(),
        }
    }
}

impl TimingProviderConfig {
    /// API key from config or environment
    pub fn resolved_api_key(&self) -> String {
        resolve_api_key(&self.api_key, "GROQ_API_KEY")
    }
}

/// Image generation provider settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ImageProviderConfig {
    /// Model route
    #[serde(default = "default_image_model")]
    pub model: String,

    /// API key (falls back to FAL_KEY)
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service URL (empty uses the public API)
    #[serde(default = "String::new")]
    pub endpoint: String,

    /// Image size preset
    #[serde(default = "default_image_size")]
    pub image_size: String,
}

impl Default for ImageProviderConfig {
    fn default() -> Self {
        Self {
            model: default_image_model(),
            api_key: String::new(),
            endpoint: String::new(),
            image_size: default_image_size(),
        }
    }
}

impl ImageProviderConfig {
    /// API key from config or environment
    pub fn resolved_api_key(&self) -> String {
        resolve_api_key(&self.api_key, "FAL_KEY")
    }
}

/// Timeline assembly settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AssemblyConfig {
    /// Maximum duration of one caption line in seconds
    #[serde(default = "default_max_caption_duration_secs")]
    pub max_caption_duration_secs: f64,

    /// Maximum characters on one caption line
    #[serde(default = "default_max_caption_chars")]
    pub max_caption_chars: usize,

    /// Minimum seconds an image stays on screen (None disables tail dropping)
    #[serde(default = "default_min_image_display_secs")]
    pub min_image_display_secs: Option<f64>,

    /// Allowed difference between caption and scene track durations
    #[serde(default = "default_timing_tolerance_secs")]
    pub timing_tolerance_secs: f64,

    /// Output width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Output height in pixels
    #[serde(default = "default_height")]
    pub height: u32,

    /// Output frame rate
    #[serde(default = "default_fps")]
    pub fps: u32,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            max_caption_duration_secs: default_max_caption_duration_secs(),
            max_caption_chars: default_max_caption_chars(),
            min_image_display_secs: default_min_image_display_secs(),
            timing_tolerance_secs: default_timing_tolerance_secs(),
            width: default_width(),
            height: default_height(),
            fps: default_fps(),
        }
    }
}

impl AssemblyConfig {
    /// Caption limits for the segmenter
    pub fn caption_limits(&self) -> CaptionLimits {
        CaptionLimits {
            max_duration_secs: self.max_caption_duration_secs,
            max_chars: self.max_caption_chars,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_assets_dir() -> String {
    "assets".to_string()
}

fn default_output_dir() -> String {
    "output".to_string()
}

fn default_script_model() -> String {
    "mistral-large-latest".to_string()
}

fn default_script_temperature() -> f32 {
    0.7
}

fn default_segment_count() -> usize {
    3
}

fn default_voice() -> String {
    "rachel".to_string()
}

fn default_voice_model() -> String {
    "eleven_multilingual_v2".to_string()
}

fn default_timing_model() -> String {
    "whisper-large-v3-turbo".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_image_model() -> String {
    "fal-ai/flux/schnell".to_string()
}

fn default_image_size() -> String {
    "portrait_16_9".to_string()
}

fn default_max_caption_duration_secs() -> f64 {
    5.0
}

fn default_max_caption_chars() -> usize {
    42
}

fn default_min_image_display_secs() -> Option<f64> {
    Some(1.5)
}

fn default_timing_tolerance_secs() -> f64 {
    0.5
}

fn default_width() -> u32 {
    1080
}

fn default_height() -> u32 {
    1920
}

fn default_fps() -> u32 {
    30
}

// Empty configured keys fall back to the conventional environment variable,
// so keys never need to live in the config file
fn resolve_api_key(configured: &str, env_var: &str) -> String {
    if !configured.is_empty() {
        return configured.to_string();
    }
    std::env::var(env_var).unwrap_or_default()
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Write this configuration as pretty-printed JSON
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content =
            serde_json::to_string_pretty(self).context("Failed to serialize configuration")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if !(self.assembly.max_caption_duration_secs > 0.0) {
            return Err(anyhow!("max_caption_duration_secs must be positive"));
        }
        if self.assembly.max_caption_chars == 0 {
            return Err(anyhow!("max_caption_chars must be positive"));
        }
        if let Some(min) = self.assembly.min_image_display_secs {
            if !(min > 0.0) {
                return Err(anyhow!("min_image_display_secs must be positive when set"));
            }
        }
        if self.assembly.timing_tolerance_secs < 0.0 {
            return Err(anyhow!("timing_tolerance_secs must not be negative"));
        }
        if self.assembly.width == 0 || self.assembly.height == 0 || self.assembly.fps == 0 {
            return Err(anyhow!("output resolution and frame rate must be positive"));
        }
        if self.script.segment_count == 0 {
            return Err(anyhow!("segment_count must be positive"));
        }
        Ok(())
    }

    /// Validate that every provider has an API key available (config or
    /// environment). Only needed for the full generation pipeline; assembly
    /// from existing artifacts works without keys.
    pub fn validate_api_keys(&self) -> Result<()> {
        if self.script.resolved_api_key().is_empty() {
            return Err(anyhow!(
                "Script API key is required (script.api_key or MISTRAL_API_KEY)"
            ));
        }
        if self.voice.resolved_api_key().is_empty() {
            return Err(anyhow!(
                "Voice API key is required (voice.api_key or ELEVENLABS_API_KEY)"
            ));
        }
        if self.timing.resolved_api_key().is_empty() {
            return Err(anyhow!(
                "Timing API key is required (timing.api_key or GROQ_API_KEY)"
            ));
        }
        if self.image.resolved_api_key().is_empty() {
            return Err(anyhow!(
                "Image API key is required (image.api_key or FAL_KEY)"
            ));
        }
        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            assets_dir: default_assets_dir(),
            output_dir: default_output_dir(),
            script: ScriptConfig::default(),
            voice: VoiceConfig::default(),
            timing: TimingProviderConfig::default(),
            image: ImageProviderConfig::default(),
            assembly: AssemblyConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
