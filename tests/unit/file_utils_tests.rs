/*!
 * Tests for file and directory utilities
 */

use papertok::file_utils::FileManager;

use crate::common;

#[test]
fn test_ensure_dir_withNestedPath_shouldCreateAll() {
    let temp_dir = common::create_temp_dir().unwrap();
    let nested = temp_dir.path().join("a").join("b").join("c");

    FileManager::ensure_dir(&nested).unwrap();
    assert!(FileManager::dir_exists(&nested));

    // Idempotent
    FileManager::ensure_dir(&nested).unwrap();
}

#[test]
fn test_create_run_dirs_shouldCreateIsolatedLayout() {
    let temp_dir = common::create_temp_dir().unwrap();

    let first = FileManager::create_run_dirs(temp_dir.path()).unwrap();
    let second = FileManager::create_run_dirs(temp_dir.path()).unwrap();

    assert!(FileManager::dir_exists(&first.images));
    assert!(FileManager::dir_exists(&first.audio));
    assert!(FileManager::dir_exists(&first.subtitles));
    // Runs never share a directory
    assert_ne!(first.root, second.root);
}

#[test]
fn test_find_files_withMixedExtensions_shouldFilterAndSort() {
    let temp_dir = common::create_temp_dir().unwrap();
    let dir = temp_dir.path().to_path_buf();

    common::create_test_file(&dir, "scene_02.png", "b").unwrap();
    common::create_test_file(&dir, "scene_01.png", "a").unwrap();
    common::create_test_file(&dir, "notes.txt", "x").unwrap();
    common::create_test_file(&dir, "scene_03.PNG", "c").unwrap();

    let found = FileManager::find_files(&dir, "png").unwrap();

    assert_eq!(found.len(), 3);
    let names: Vec<String> = found
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["scene_01.png", "scene_02.png", "scene_03.PNG"]);
}

#[test]
fn test_generate_output_path_shouldJoinStemAndExtension() {
    let path = FileManager::generate_output_path("output", "video_001", "mp4");
    assert_eq!(path.to_string_lossy(), "output/video_001.mp4");
}

#[test]
fn test_read_text_file_withMissingFile_shouldFail() {
    let temp_dir = common::create_temp_dir().unwrap();
    let result = FileManager::read_text_file(temp_dir.path().join("missing.txt"));
    assert!(result.is_err());
}
