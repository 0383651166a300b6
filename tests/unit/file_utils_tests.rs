/*!
 * Tests for file and directory utilities
 */

use summarize_pro::document::ExportArtifact;
use summarize_pro::file_utils::FileManager;

use crate::common::create_temp_dir;

#[test]
fn test_ensure_dir_withNestedPath_shouldCreateAllLevels() {
    let temp_dir = create_temp_dir().unwrap();
    let nested = temp_dir.path().join("a").join("b").join("c");

    FileManager::ensure_dir(&nested).unwrap();
    assert!(nested.is_dir());
    // Existing directories are fine
    FileManager::ensure_dir(&nested).unwrap();
}

#[test]
fn test_write_bytes_withMissingParent_shouldCreateIt() {
    let temp_dir = create_temp_dir().unwrap();
    let path = temp_dir.path().join("out").join("data.bin");

    FileManager::write_bytes(&path, &[1, 2, 3]).unwrap();
    assert!(FileManager::file_exists(&path));
    assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3]);
}

#[test]
fn test_save_artifact_withExistingTarget_shouldSkipUnlessForced() {
    let temp_dir = create_temp_dir().unwrap();
    let artifact = ExportArtifact::text("fresh");

    let first = FileManager::save_artifact(temp_dir.path(), &artifact, false).unwrap();
    assert_eq!(first, Some(temp_dir.path().join("summary.txt")));

    let skipped = FileManager::save_artifact(temp_dir.path(), &ExportArtifact::text("other"), false).unwrap();
    assert_eq!(skipped, None);
    assert_eq!(std::fs::read_to_string(temp_dir.path().join("summary.txt")).unwrap(), "fresh");

    let forced = FileManager::save_artifact(temp_dir.path(), &ExportArtifact::text("other"), true).unwrap();
    assert!(forced.is_some());
    assert_eq!(std::fs::read_to_string(temp_dir.path().join("summary.txt")).unwrap(), "other");
}
