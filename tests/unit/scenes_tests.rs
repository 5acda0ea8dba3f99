/*!
 * Tests for scene planning
 */

use papertok::assembly::plan_scenes;
use papertok::errors::AssemblyError;

fn image_refs(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

/// Three images over nine seconds split into three-second windows
#[test]
fn test_plan_scenes_withEvenSplit_shouldPartitionEqually() {
    let windows = plan_scenes(9.0, &image_refs(&["a", "b", "c"]), None).unwrap();

    assert_eq!(windows.len(), 3);
    assert_eq!(windows[0].image_ref, "a");
    assert_eq!(windows[0].start, 0.0);
    assert_eq!(windows[0].end, 3.0);
    assert_eq!(windows[1].image_ref, "b");
    assert_eq!(windows[1].start, 3.0);
    assert_eq!(windows[1].end, 6.0);
    assert_eq!(windows[2].image_ref, "c");
    assert_eq!(windows[2].start, 6.0);
    assert_eq!(windows[2].end, 9.0);
}

#[test]
fn test_plan_scenes_withEmptyImages_shouldReturnEmpty() {
    let windows = plan_scenes(10.0, &[], Some(1.0)).unwrap();
    assert!(windows.is_empty());
}

/// Windows partition [0, D] exactly: contiguous, last boundary at D
#[test]
fn test_plan_scenes_withAnyCount_shouldPartitionExactly() {
    for count in 1..=7 {
        let names: Vec<String> = (0..count).map(|i| format!("img{}", i)).collect();
        let total = 12.34;
        let windows = plan_scenes(total, &names, None).unwrap();

        assert_eq!(windows.len(), count);
        assert_eq!(windows.first().unwrap().start, 0.0);
        assert_eq!(windows.last().unwrap().end, total);
        for pair in windows.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }

        let duration_sum: f64 = windows.iter().map(|w| w.duration()).sum();
        assert!((duration_sum - total).abs() < 1e-9);
    }
}

/// When the even split undercuts the minimum, trailing images are dropped
/// rather than windows shrunk
#[test]
fn test_plan_scenes_withTooManyImages_shouldDropFromTail() {
    // 4 images over 5s with a 2s minimum: only 2 fit
    let windows = plan_scenes(5.0, &image_refs(&["a", "b", "c", "d"]), Some(2.0)).unwrap();

    assert_eq!(windows.len(), 2);
    assert_eq!(windows[0].image_ref, "a");
    assert_eq!(windows[1].image_ref, "b");
    for window in &windows {
        assert!(window.duration() >= 2.0);
    }
    assert_eq!(windows.last().unwrap().end, 5.0);
}

/// The minimum never reduces the plan below one window
#[test]
fn test_plan_scenes_withDurationBelowMinimum_shouldKeepOneWindow() {
    let windows = plan_scenes(1.0, &image_refs(&["a", "b"]), Some(2.0)).unwrap();

    assert_eq!(windows.len(), 1);
    assert_eq!(windows[0].image_ref, "a");
    assert_eq!(windows[0].start, 0.0);
    assert_eq!(windows[0].end, 1.0);
}

#[test]
fn test_plan_scenes_withZeroDuration_shouldRejectConfiguration() {
    let result = plan_scenes(0.0, &image_refs(&["a"]), None);
    assert!(matches!(
        result,
        Err(AssemblyError::InvalidConfiguration(_))
    ));
}

#[test]
fn test_plan_scenes_withNegativeMinimum_shouldRejectConfiguration() {
    let result = plan_scenes(10.0, &image_refs(&["a"]), Some(-1.0));
    assert!(matches!(
        result,
        Err(AssemblyError::InvalidConfiguration(_))
    ));
}
