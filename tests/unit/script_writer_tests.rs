/*!
 * Tests for script segmentation
 */

use papertok::script_writer::segment_script;

const SCRIPT: &str = "Hook line that grabs you! Here comes the twist nobody saw. \
A weird fact about octopuses. And a closing line with flair.";

/// A four-sentence script splits into the requested three segments
#[test]
fn test_segment_script_withFourSentences_shouldProduceThreeSegments() {
    let segments = segment_script(SCRIPT, 3);

    assert_eq!(segments.len(), 3);
    assert!(segments[0].contains("Hook line"));
    assert!(segments.last().unwrap().contains("closing line"));
}

/// Sentences are never split across segments
#[test]
fn test_segment_script_withAnyTarget_shouldKeepSentencesIntact() {
    for target in 1..=5 {
        let segments = segment_script(SCRIPT, target);
        let rejoined = segments.join(" ");
        assert_eq!(rejoined, SCRIPT, "target {}", target);
    }
}

/// Fewer sentences than requested segments come back as fewer segments
#[test]
fn test_segment_script_withFewSentences_shouldNotPadSegments() {
    let segments = segment_script("Only one sentence here.", 4);
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0], "Only one sentence here.");
}

#[test]
fn test_segment_script_withEmptyScript_shouldReturnEmpty() {
    assert!(segment_script("", 3).is_empty());
    assert!(segment_script("   \n ", 3).is_empty());
}

#[test]
fn test_segment_script_withZeroTarget_shouldReturnEmpty() {
    assert!(segment_script(SCRIPT, 0).is_empty());
}

/// Text without terminal punctuation still forms one segment
#[test]
fn test_segment_script_withNoPunctuation_shouldKeepTrailingText() {
    let segments = segment_script("no punctuation at all", 3);
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0], "no punctuation at all");
}
