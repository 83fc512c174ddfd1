use std::fs;

use stevedore_engine::{ensure_state_dir, AtomicFileWriter};
use tempfile::TempDir;

#[test]
fn creates_missing_state_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("state");
    assert!(!new_dir.exists());
    ensure_state_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn atomic_write_replaces_existing_snapshot() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("state.ron", "(committed: {})").unwrap();
    assert_eq!(first.file_name().unwrap(), "state.ron");
    assert_eq!(fs::read_to_string(&first).unwrap(), "(committed: {})");

    // Replace existing
    let second = writer.write("state.ron", "(committed: {\"Reader\": ()})").unwrap();
    assert_eq!(first, second);
    assert_eq!(
        fs::read_to_string(&second).unwrap(),
        "(committed: {\"Reader\": ()})"
    );
}

#[test]
fn no_partial_file_on_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    let result = writer.write("state.ron", "data");
    assert!(result.is_err());
    assert!(!file_path.with_file_name("state.ron").exists());
}
