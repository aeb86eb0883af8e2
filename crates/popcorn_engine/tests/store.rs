use std::fs;

use popcorn_engine::{ensure_data_dir, AtomicFileWriter, FileStore, KeyValueStore, MemoryStore};
use tempfile::TempDir;

#[test]
fn creates_missing_data_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("data");
    assert!(!new_dir.exists());
    ensure_data_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn atomic_write_replaces_existing() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("watched.json", "[]").unwrap();
    assert_eq!(fs::read_to_string(&first).unwrap(), "[]");

    let second = writer.write("watched.json", "[{}]").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "[{}]");
}

#[test]
fn repeated_saves_leave_only_the_target_file() {
    let temp = TempDir::new().unwrap();
    let store = FileStore::new(temp.path().join("data"));
    store.set("watched", "[]").unwrap();
    store.set("watched", r#"[{"imdbID":"tt1"}]"#).unwrap();

    let names: Vec<String> = fs::read_dir(temp.path().join("data"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["watched.json".to_string()]);
}

#[test]
fn writer_fails_when_dir_is_a_file() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    assert!(writer.write("watched.json", "[]").is_err());
    assert!(!file_path.with_file_name("watched.json").exists());
}

#[test]
fn file_store_round_trips_and_reports_absent_keys() {
    let temp = TempDir::new().unwrap();
    let store = FileStore::new(temp.path().join("popcorn"));

    assert_eq!(store.get("watched").unwrap(), None);
    store.set("watched", r#"[{"imdbID":"tt1"}]"#).unwrap();
    assert_eq!(
        store.get("watched").unwrap().as_deref(),
        Some(r#"[{"imdbID":"tt1"}]"#)
    );
    assert!(temp.path().join("popcorn").join("watched.json").is_file());
}

#[test]
fn file_store_rejects_path_like_keys() {
    let temp = TempDir::new().unwrap();
    let store = FileStore::new(temp.path().to_path_buf());

    assert!(store.set("../escape", "x").is_err());
    assert!(store.get("").is_err());
}

#[test]
fn memory_store_overwrites_values() {
    let store = MemoryStore::new();
    store.set("watched", "[]").unwrap();
    store.set("watched", "[1]").unwrap();
    assert_eq!(store.get("watched").unwrap().as_deref(), Some("[1]"));
    assert_eq!(store.get("other").unwrap(), None);
}
