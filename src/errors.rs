/*!
 * Error types for the papertok application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors that can occur while assembling the composition timeline.
///
/// Empty inputs are deliberately not represented here: an empty word or image
/// list produces an empty output, it is not a failure.
#[derive(Error, Debug)]
pub enum AssemblyError {
    /// The caption track and the scene track disagree about the narration
    /// duration by more than the configured tolerance. Surfaced to the
    /// caller, never auto-corrected.
    #[error(
        "timing mismatch: caption track spans {caption_duration:.3}s, scene track spans {scene_duration:.3}s (tolerance {tolerance:.3}s)"
    )]
    TimingMismatch {
        /// Duration covered by the caption track in seconds
        caption_duration: f64,
        /// Duration covered by the scene track in seconds
        scene_duration: f64,
        /// Tolerance that was exceeded, in seconds
        tolerance: f64,
    },

    /// A zero or negative limit was supplied (duration, character count,
    /// display minimum or tolerance). Rejected at entry.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Errors that can occur while invoking the external renderer
#[derive(Error, Debug)]
pub enum RenderError {
    /// ffmpeg/ffprobe could not be executed or exited with an error
    #[error("Renderer invocation failed: {0}")]
    CommandFailed(String),

    /// The render did not finish within the allotted time
    #[error("Renderer timed out: {0}")]
    Timeout(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from timeline assembly
    #[error("Assembly error: {0}")]
    Assembly(#[from] AssemblyError),

    /// Error from the renderer
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
