/*!
 * # papertok - research papers into short vertical videos
 *
 * A Rust library that turns a research-paper abstract into a short
 * narrated vertical video.
 *
 * ## Features
 *
 * - Key-point extraction and script writing via Mistral
 * - Narration synthesis via ElevenLabs
 * - Word-level timing extraction via Groq Whisper
 * - Scene illustration via FAL Flux
 * - Deterministic caption/scene timeline assembly
 * - ffmpeg-based rendering of the final video
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `assembly`: The assembly core - caption segmentation, scene planning
 *   and composition timeline construction:
 *   - `assembly::captions`: Word timings into subtitle lines
 *   - `assembly::scenes`: Images onto display windows
 *   - `assembly::timeline`: Merged composition descriptor
 * - `providers`: Clients for the external services, behind narrow
 *   capability traits:
 *   - `providers::mistral`: Mistral chat client
 *   - `providers::elevenlabs`: ElevenLabs TTS client
 *   - `providers::groq`: Groq Whisper transcription client
 *   - `providers::fal`: FAL Flux image client
 * - `script_writer`: Script generation and segmentation
 * - `voice_generator`: Narration synthesis stage
 * - `voice_timing`: Word-timing extraction stage
 * - `image_generator`: Scene illustration stage
 * - `render`: ffmpeg/ffprobe renderer invocation
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod assembly;
pub mod errors;
pub mod file_utils;
pub mod image_generator;
pub mod providers;
pub mod render;
pub mod script_writer;
pub mod voice_generator;
pub mod voice_timing;

// Re-export main types for easier usage
pub use app_config::Config;
pub use assembly::{
    CaptionLimits, CaptionSegment, CompositionTimeline, SceneWindow, TimelineEvent, WordTiming,
};
pub use errors::{AppError, AssemblyError, ProviderError, RenderError};
pub use voice_timing::TimingData;
