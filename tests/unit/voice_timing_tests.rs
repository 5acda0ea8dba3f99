/*!
 * Tests for timing data handling
 */

use papertok::voice_timing::TimingData;

use crate::common;

/// Timing JSON round-trips through save and load
#[test]
fn test_timing_data_saveLoad_shouldRoundTrip() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("audio").join("timing.json");

    let timing = common::sample_timing_data();
    timing.save(&path).unwrap();

    let restored = TimingData::load(&path).unwrap();
    assert_eq!(restored, timing);
}

#[test]
fn test_timing_data_load_withMissingFile_shouldFail() {
    let temp_dir = common::create_temp_dir().unwrap();
    let result = TimingData::load(temp_dir.path().join("nope.json"));
    assert!(result.is_err());
}

#[test]
fn test_timing_data_load_withInvalidJson_shouldFail() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "timing.json",
        "not json at all",
    )
    .unwrap();

    assert!(TimingData::load(&path).is_err());
}

/// Duration matches the end of the last word
#[test]
fn test_timing_data_duration_shouldMatchLastWordEnd() {
    let timing = common::sample_timing_data();
    assert_eq!(timing.duration, timing.word_timings.last().unwrap().end);
}

/// Missing confidence fields default to zero when parsing provider JSON
#[test]
fn test_timing_data_parse_withMissingConfidences_shouldDefault() {
    let json = r#"{
        "text": "hi there",
        "word_timings": [
            {"word": "hi", "start": 0.0, "end": 0.4},
            {"word": "there", "start": 0.4, "end": 0.9}
        ],
        "segments": [
            {"text": "hi there", "start": 0.0, "end": 0.9}
        ],
        "duration": 0.9
    }"#;

    let timing: TimingData = serde_json::from_str(json).unwrap();
    assert_eq!(timing.word_timings.len(), 2);
    assert_eq!(timing.segments[0].avg_logprob, 0.0);
    assert_eq!(timing.segments[0].no_speech_prob, 0.0);
}
