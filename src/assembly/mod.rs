/*!
 * Caption-timing-to-video-assembly core.
 *
 * Pure, synchronous logic that turns timed artifacts (word timings from
 * transcription, an ordered image set, the narration duration) into a single
 * deterministic composition descriptor for the renderer:
 * - `captions`: groups word timings into on-screen subtitle lines
 * - `scenes`: maps images onto contiguous display windows
 * - `timeline`: merges both tracks into one ordered event sequence
 *
 * No I/O happens here apart from the optional SRT export helper; all entities
 * are built once per run from immutable upstream artifacts.
 */

pub mod captions;
pub mod scenes;
pub mod timeline;

pub use captions::{CaptionLimits, CaptionSegment, WordTiming, segment_words};
pub use scenes::{SceneWindow, plan_scenes};
pub use timeline::{
    CompositionTimeline, DEFAULT_TIMING_TOLERANCE_SECS, TimelineEvent, build_timeline,
};
