//! Integration tests for the JSON file repository.

#![allow(clippy::unwrap_used)] // Tests can unwrap
#![allow(clippy::expect_used)] // Tests can expect

use tasklist_core::TaskRepository;
use tasklist_core::repository::RepositoryError;
use tasklist_storage::JsonFileTaskRepository;
use tasklist_testing::{done_task, pending_task};
use tempfile::tempdir;

#[tokio::test]
async fn save_then_load_round_trips_the_collection() {
    let dir = tempdir().unwrap();
    let repo = JsonFileTaskRepository::new(dir.path().join("tasks.json"));

    let tasks = vec![pending_task("A", "work"), done_task("B", "home")];
    repo.save(tasks.clone()).await.unwrap();

    let loaded = repo.load().await.unwrap();
    assert_eq!(loaded, tasks);
}

#[tokio::test]
async fn missing_file_loads_as_empty() {
    let dir = tempdir().unwrap();
    let repo = JsonFileTaskRepository::new(dir.path().join("absent.json"));

    let loaded = repo.load().await.unwrap();
    assert!(loaded.is_empty());
}

#[tokio::test]
async fn corrupt_blob_is_a_serialization_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tasks.json");
    std::fs::write(&path, b"{ not json").unwrap();

    let repo = JsonFileTaskRepository::new(&path);
    let result = repo.load().await;

    assert!(matches!(result, Err(RepositoryError::Serialization(_))));
    // The corrupt blob is left in place for inspection.
    assert_eq!(std::fs::read(&path).unwrap(), b"{ not json");
}

#[tokio::test]
async fn save_fully_replaces_prior_state() {
    let dir = tempdir().unwrap();
    let repo = JsonFileTaskRepository::new(dir.path().join("tasks.json"));

    repo.save(vec![pending_task("old", "work")]).await.unwrap();
    let replacement = vec![pending_task("new", "home")];
    repo.save(replacement.clone()).await.unwrap();

    let loaded = repo.load().await.unwrap();
    assert_eq!(loaded, replacement);
}

#[tokio::test]
async fn save_and_load_publish_to_observers() {
    let dir = tempdir().unwrap();
    let repo = JsonFileTaskRepository::new(dir.path().join("tasks.json"));
    let mut rx = repo.observe();
    rx.mark_unchanged();

    repo.save(vec![pending_task("A", "work")]).await.unwrap();
    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().len(), 1);

    let other = JsonFileTaskRepository::new(repo.path());
    let mut other_rx = other.observe();
    other_rx.mark_unchanged();

    other.load().await.unwrap();
    assert!(other_rx.has_changed().unwrap());
    assert_eq!(other_rx.borrow_and_update().len(), 1);
}

#[tokio::test]
async fn save_creates_missing_parent_directories() {
    let dir = tempdir().unwrap();
    let repo = JsonFileTaskRepository::new(dir.path().join("nested/deep/tasks.json"));

    repo.save(vec![pending_task("A", "work")]).await.unwrap();

    assert_eq!(repo.load().await.unwrap().len(), 1);
}

#[tokio::test]
async fn unwritable_path_is_a_storage_error() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"file, not a directory").unwrap();

    // Parent of the target path is a regular file.
    let repo = JsonFileTaskRepository::new(blocker.join("tasks.json"));
    let result = repo.save(vec![pending_task("A", "work")]).await;

    assert!(matches!(result, Err(RepositoryError::Storage(_))));
}
