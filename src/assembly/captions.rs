use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::errors::AssemblyError;

// @module: Caption segmentation from word-level timings

/// A single word with its start/end timestamp from transcription alignment.
///
/// Sequences of word timings are expected to be ordered, non-overlapping,
/// with monotonically non-decreasing start times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordTiming {
    /// The spoken word, as transcribed
    pub word: String,

    /// Start time in seconds
    pub start: f64,

    /// End time in seconds
    pub end: f64,
}

impl WordTiming {
    pub fn new(word: impl Into<String>, start: f64, end: f64) -> Self {
        WordTiming {
            word: word.into(),
            start,
            end,
        }
    }

    /// Duration of the word in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// A group of words rendered as one on-screen subtitle line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionSegment {
    /// Caption text shown on screen
    pub text: String,

    /// Start time in seconds
    pub start: f64,

    /// End time in seconds
    pub end: f64,
}

impl CaptionSegment {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Limits applied while grouping words into caption segments
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaptionLimits {
    /// Maximum duration of one caption line in seconds
    pub max_duration_secs: f64,

    /// Maximum characters on one caption line
    pub max_chars: usize,
}

impl Default for CaptionLimits {
    fn default() -> Self {
        CaptionLimits {
            max_duration_secs: 5.0,
            max_chars: 42,
        }
    }
}

impl CaptionLimits {
    fn validate(&self) -> Result<(), AssemblyError> {
        if !(self.max_duration_secs > 0.0) {
            return Err(AssemblyError::InvalidConfiguration(format!(
                "max caption duration must be positive, got {}",
                self.max_duration_secs
            )));
        }
        if self.max_chars == 0 {
            return Err(AssemblyError::InvalidConfiguration(
                "max caption characters must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Group word timings into caption segments.
///
/// Words are accumulated greedily into the current segment; the segment is
/// closed when adding the next word would exceed either limit, or right after
/// a sentence-ending word. A single word longer than the character limit
/// still forms its own segment - words are never dropped.
///
/// Segment boundaries are then stitched so silence between words belongs to
/// the preceding caption, up to the duration limit. Silence that would
/// stretch a caption past the limit stays an uncaptioned gap.
///
/// An empty word sequence yields an empty segment sequence, not an error.
pub fn segment_words(
    words: &[WordTiming],
    limits: &CaptionLimits,
) -> Result<Vec<CaptionSegment>, AssemblyError> {
    limits.validate()?;

    let mut segments: Vec<CaptionSegment> = Vec::new();
    let mut text = String::new();
    let mut seg_start = 0.0;
    let mut seg_end = 0.0;

    for timing in words {
        let word = timing.word.trim();
        if word.is_empty() {
            warn!(
                "Skipping empty word timing at {:.2}-{:.2}s",
                timing.start, timing.end
            );
            continue;
        }

        // Would appending this word break a limit? Only applies when the
        // segment already holds at least one word, so oversized single words
        // still get their own segment.
        if !text.is_empty() {
            // Character count, not byte length - transcripts are not ASCII
            let candidate_chars = text.chars().count() + 1 + word.chars().count();
            let candidate_duration = timing.end - seg_start;
            if candidate_chars > limits.max_chars || candidate_duration > limits.max_duration_secs {
                segments.push(CaptionSegment {
                    text: std::mem::take(&mut text),
                    start: seg_start,
                    end: seg_end,
                });
            }
        }

        if text.is_empty() {
            seg_start = timing.start;
            text.push_str(word);
        } else {
            text.push(' ');
            text.push_str(word);
        }
        seg_end = timing.end;

        if ends_sentence(word) {
            segments.push(CaptionSegment {
                text: std::mem::take(&mut text),
                start: seg_start,
                end: seg_end,
            });
        }
    }

    if !text.is_empty() {
        segments.push(CaptionSegment {
            text,
            start: seg_start,
            end: seg_end,
        });
    }

    // Stitch boundaries: each segment stays on screen until the next one
    // starts, capped at the duration limit so silence cannot stretch a
    // caption past it.
    for i in 0..segments.len().saturating_sub(1) {
        let next_start = segments[i + 1].start;
        let capped_end = (segments[i].start + limits.max_duration_secs).max(segments[i].end);
        segments[i].end = next_start.min(capped_end);
    }

    debug!("Segmented {} words into {} captions", words.len(), segments.len());

    Ok(segments)
}

/// Whether a word closes a sentence (terminal punctuation, ignoring any
/// trailing quotes or brackets)
fn ends_sentence(word: &str) -> bool {
    let trimmed = word.trim_end_matches(['"', '\'', ')', ']']);
    trimmed.ends_with('.') || trimmed.ends_with('!') || trimmed.ends_with('?') || trimmed.ends_with('…')
}

/// Format a timestamp in seconds to SRT format (HH:MM:SS,mmm)
pub fn format_srt_timestamp(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let secs = (total_ms % 60_000) / 1_000;
    let millis = total_ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}

/// SRT block for one caption, numbered from 1
struct SrtEntry<'a> {
    seq_num: usize,
    segment: &'a CaptionSegment,
}

impl fmt::Display for SrtEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.seq_num)?;
        writeln!(
            f,
            "{} --> {}",
            format_srt_timestamp(self.segment.start),
            format_srt_timestamp(self.segment.end)
        )?;
        writeln!(f, "{}", self.segment.text)?;
        writeln!(f)
    }
}

/// Write caption segments to an SRT file
pub fn write_srt<P: AsRef<Path>>(segments: &[CaptionSegment], path: P) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let mut file = File::create(path)
        .with_context(|| format!("Failed to create subtitle file: {}", path.display()))?;

    for (i, segment) in segments.iter().enumerate() {
        let entry = SrtEntry {
            seq_num: i + 1,
            segment,
        };
        write!(file, "{}", entry)?;
    }

    Ok(())
}
