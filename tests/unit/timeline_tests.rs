/*!
 * Tests for composition timeline construction
 */

use papertok::assembly::{
    CaptionSegment, SceneWindow, TimelineEvent, build_timeline, DEFAULT_TIMING_TOLERANCE_SECS,
};
use papertok::errors::AssemblyError;

use crate::common;

fn caption(text: &str, start: f64, end: f64) -> CaptionSegment {
    CaptionSegment {
        text: text.to_string(),
        start,
        end,
    }
}

fn scene(image_ref: &str, start: f64, end: f64) -> SceneWindow {
    SceneWindow {
        image_ref: image_ref.to_string(),
        start,
        end,
    }
}

/// Events come out sorted by start time across both tracks
#[test]
fn test_build_timeline_withBothTracks_shouldSortByStartTime() {
    let captions = vec![caption("one", 0.5, 2.0), caption("two", 2.0, 4.0)];
    let scenes = vec![scene("a", 0.0, 2.5), scene("b", 2.5, 4.2)];

    let timeline = build_timeline(&captions, &scenes, DEFAULT_TIMING_TOLERANCE_SECS).unwrap();

    assert_eq!(timeline.len(), 4);
    let starts: Vec<f64> = timeline.events.iter().map(|e| e.start()).collect();
    let mut sorted = starts.clone();
    sorted.sort_by(f64::total_cmp);
    assert_eq!(starts, sorted);
    assert_eq!(timeline.total_duration, 4.2);
}

/// On exact start-time ties, the caption comes before the scene cut
#[test]
fn test_build_timeline_withTiedStarts_shouldPlaceCaptionFirst() {
    let captions = vec![caption("hello", 0.0, 2.0)];
    let scenes = vec![scene("a", 0.0, 2.0)];

    let timeline = build_timeline(&captions, &scenes, 0.5).unwrap();

    assert!(matches!(timeline.events[0], TimelineEvent::Caption(_)));
    assert!(matches!(timeline.events[1], TimelineEvent::SceneCut(_)));
}

/// Track timestamps pass through unchanged - no time-shifting
#[test]
fn test_build_timeline_withBothTracks_shouldNotShiftTimestamps() {
    let captions = vec![caption("one", 0.3, 1.7)];
    let scenes = vec![scene("a", 0.0, 1.5)];

    let timeline = build_timeline(&captions, &scenes, 0.5).unwrap();

    let restored: Vec<&CaptionSegment> = timeline.captions().collect();
    assert_eq!(restored[0].start, 0.3);
    assert_eq!(restored[0].end, 1.7);
    let windows: Vec<&SceneWindow> = timeline.scene_cuts().collect();
    assert_eq!(windows[0].start, 0.0);
    assert_eq!(windows[0].end, 1.5);
}

/// A duration disagreement beyond the tolerance is a reported error,
/// not a silent truncation
#[test]
fn test_build_timeline_withDurationMismatch_shouldReportTimingMismatch() {
    let captions = vec![caption("short", 0.0, 2.0)];
    let scenes = vec![scene("a", 0.0, 4.0)];

    let result = build_timeline(&captions, &scenes, 0.5);

    match result {
        Err(AssemblyError::TimingMismatch {
            caption_duration,
            scene_duration,
            tolerance,
        }) => {
            assert_eq!(caption_duration, 2.0);
            assert_eq!(scene_duration, 4.0);
            assert_eq!(tolerance, 0.5);
        }
        other => panic!("Expected TimingMismatch, got {:?}", other),
    }
}

/// Differences within the tolerance pass
#[test]
fn test_build_timeline_withMismatchWithinTolerance_shouldSucceed() {
    let captions = vec![caption("short", 0.0, 3.8)];
    let scenes = vec![scene("a", 0.0, 4.0)];

    let timeline = build_timeline(&captions, &scenes, 0.5).unwrap();
    assert_eq!(timeline.len(), 2);
}

/// An empty caption track is degenerate output, not an error, and skips
/// the mismatch check
#[test]
fn test_build_timeline_withEmptyCaptions_shouldPassScenesThrough() {
    let scenes = vec![scene("a", 0.0, 3.0), scene("b", 3.0, 6.0)];

    let timeline = build_timeline(&[], &scenes, 0.5).unwrap();

    assert_eq!(timeline.len(), 2);
    assert!(timeline.captions().next().is_none());
    assert_eq!(timeline.total_duration, 6.0);
}

#[test]
fn test_build_timeline_withBothTracksEmpty_shouldBeEmpty() {
    let timeline = build_timeline(&[], &[], 0.5).unwrap();
    assert!(timeline.is_empty());
    assert_eq!(timeline.total_duration, 0.0);
}

#[test]
fn test_build_timeline_withNegativeTolerance_shouldRejectConfiguration() {
    let result = build_timeline(&[], &[], -0.1);
    assert!(matches!(
        result,
        Err(AssemblyError::InvalidConfiguration(_))
    ));
}

/// The descriptor serializes as a list of typed events
#[test]
fn test_timeline_serialization_withEvents_shouldTagEventTypes() {
    let captions = vec![caption("hi", 0.0, 1.0)];
    let scenes = vec![scene("a", 0.0, 1.0)];
    let timeline = build_timeline(&captions, &scenes, 0.5).unwrap();

    let json = serde_json::to_string(&timeline).unwrap();
    assert!(json.contains("\"type\":\"caption\""));
    assert!(json.contains("\"type\":\"scene_cut\""));
    assert!(json.contains("\"image_ref\":\"a\""));
}

/// JSON descriptor file round-trips
#[test]
fn test_timeline_write_json_withEvents_shouldRoundTrip() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("timeline.json");

    let captions = vec![caption("hi", 0.0, 1.0)];
    let scenes = vec![scene("a", 0.0, 1.0)];
    let timeline = build_timeline(&captions, &scenes, 0.5).unwrap();
    timeline.write_json(&path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let restored: papertok::assembly::CompositionTimeline =
        serde_json::from_str(&content).unwrap();
    assert_eq!(restored, timeline);
}
