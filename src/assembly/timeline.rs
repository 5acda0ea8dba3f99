use std::path::Path;

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::assembly::captions::CaptionSegment;
use crate::assembly::scenes::SceneWindow;
use crate::errors::AssemblyError;

// @module: Composition descriptor - merged caption/scene timeline

/// Default tolerance for the caption/scene duration consistency check
pub const DEFAULT_TIMING_TOLERANCE_SECS: f64 = 0.5;

/// One event on the composition timeline: a subtitle overlay or an image cut
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimelineEvent {
    /// Subtitle overlay
    Caption(CaptionSegment),

    /// Switch to a new image
    SceneCut(SceneWindow),
}

impl TimelineEvent {
    /// Start time of the event in seconds
    pub fn start(&self) -> f64 {
        match self {
            TimelineEvent::Caption(segment) => segment.start,
            TimelineEvent::SceneCut(window) => window.start,
        }
    }

    /// End time of the event in seconds
    pub fn end(&self) -> f64 {
        match self {
            TimelineEvent::Caption(segment) => segment.end,
            TimelineEvent::SceneCut(window) => window.end,
        }
    }

    // Captions sort before scene cuts on equal start times
    fn track_rank(&self) -> u8 {
        match self {
            TimelineEvent::Caption(_) => 0,
            TimelineEvent::SceneCut(_) => 1,
        }
    }
}

/// Final merged event sequence handed to the video renderer.
///
/// Events are ordered by start time; the caption and scene tracks keep their
/// own timestamps untouched and only interleave for output ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionTimeline {
    /// Ordered overlay/visual events
    pub events: Vec<TimelineEvent>,

    /// Total duration covered by the timeline in seconds
    pub total_duration: f64,
}

impl CompositionTimeline {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// The caption events, in timeline order
    pub fn captions(&self) -> impl Iterator<Item = &CaptionSegment> {
        self.events.iter().filter_map(|event| match event {
            TimelineEvent::Caption(segment) => Some(segment),
            TimelineEvent::SceneCut(_) => None,
        })
    }

    /// The scene-cut events, in timeline order
    pub fn scene_cuts(&self) -> impl Iterator<Item = &SceneWindow> {
        self.events.iter().filter_map(|event| match event {
            TimelineEvent::SceneCut(window) => Some(window),
            TimelineEvent::Caption(_) => None,
        })
    }

    /// Write the timeline descriptor as pretty-printed JSON
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create timeline file: {}", path.display()))?;
        serde_json::to_writer_pretty(file, self)
            .with_context(|| format!("Failed to write timeline JSON: {}", path.display()))?;
        Ok(())
    }
}

/// Merge the caption and scene tracks into one composition timeline.
///
/// The two tracks are independent: their timestamps pass through unchanged
/// and only the output ordering interleaves them (sorted by start time,
/// captions before scene cuts on exact ties).
///
/// When both tracks are non-empty and their total durations differ by more
/// than `tolerance_secs`, this is a [`AssemblyError::TimingMismatch`] - the
/// condition is reported, never silently truncated.
pub fn build_timeline(
    captions: &[CaptionSegment],
    scenes: &[SceneWindow],
    tolerance_secs: f64,
) -> Result<CompositionTimeline, AssemblyError> {
    if tolerance_secs < 0.0 {
        return Err(AssemblyError::InvalidConfiguration(format!(
            "timing tolerance must not be negative, got {}",
            tolerance_secs
        )));
    }

    if let (Some(first_caption), Some(last_caption), Some(first_scene), Some(last_scene)) = (
        captions.first(),
        captions.last(),
        scenes.first(),
        scenes.last(),
    ) {
        let caption_duration = last_caption.end - first_caption.start;
        let scene_duration = last_scene.end - first_scene.start;
        if (caption_duration - scene_duration).abs() > tolerance_secs {
            return Err(AssemblyError::TimingMismatch {
                caption_duration,
                scene_duration,
                tolerance: tolerance_secs,
            });
        }
    }

    let mut events: Vec<TimelineEvent> = Vec::with_capacity(captions.len() + scenes.len());
    events.extend(captions.iter().cloned().map(TimelineEvent::Caption));
    events.extend(scenes.iter().cloned().map(TimelineEvent::SceneCut));
    events.sort_by(|a, b| {
        a.start()
            .total_cmp(&b.start())
            .then(a.track_rank().cmp(&b.track_rank()))
    });

    let total_duration = events
        .iter()
        .map(|event| event.end())
        .fold(0.0_f64, f64::max);

    debug!(
        "Built timeline: {} caption(s), {} scene cut(s), {:.2}s total",
        captions.len(),
        scenes.len(),
        total_duration
    );

    Ok(CompositionTimeline {
        events,
        total_duration,
    })
}
