mod common;

use common::CyclingGenerator;
use serde_json::Value;
use snaplink::domain::repositories::UrlRepository;
use snaplink::error::{AppError, StorageError};
use snaplink::infrastructure::persistence::FileUrlRepository;
use std::sync::Arc;
use tempfile::tempdir;

fn read_document(path: &std::path::Path) -> Value {
    let bytes = std::fs::read(path).unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_open_creates_missing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("urls.json");

    let repo = FileUrlRepository::open(&path).await.unwrap();

    assert!(path.exists());
    assert_eq!(repo.count().await.unwrap(), 0);
    assert_eq!(read_document(&path), serde_json::json!({ "urls": [] }));
}

#[tokio::test]
async fn test_open_accepts_blank_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("urls.json");
    std::fs::write(&path, "  \n").unwrap();

    let repo = FileUrlRepository::open(&path).await.unwrap();

    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_open_rejects_malformed_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("urls.json");
    std::fs::write(&path, "{ not json").unwrap();

    let result = FileUrlRepository::open(&path).await;

    assert!(matches!(result, Err(StorageError::Serialization(_))));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
}

#[tokio::test]
async fn test_document_shape() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("urls.json");
    let repo = FileUrlRepository::open(&path).await.unwrap();

    let created = repo.create("https://example.com/page").await.unwrap();
    repo.increment_clicks(&created.short_code).await.unwrap();

    let document = read_document(&path);
    let urls = document["urls"].as_array().unwrap();
    assert_eq!(urls.len(), 1);

    let entry = &urls[0];
    assert_eq!(entry["id"], created.id);
    assert_eq!(entry["original_url"], "https://example.com/page");
    assert_eq!(entry["short_code"], created.short_code);
    assert_eq!(entry["clicks"], 1);
    assert!(entry["created_at"].is_string());
}

#[tokio::test]
async fn test_records_survive_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("urls.json");

    let (kept, removed) = {
        let repo = FileUrlRepository::open(&path).await.unwrap();
        let first = repo.create("https://example.com/1").await.unwrap();
        let second = repo.create("https://example.com/2").await.unwrap();
        let third = repo.create("https://example.com/3").await.unwrap();

        repo.increment_clicks(&first.short_code).await.unwrap();
        repo.increment_clicks(&first.short_code).await.unwrap();
        repo.delete(&second.short_code).await.unwrap();

        (vec![third, first], second)
    };

    let reopened = FileUrlRepository::open(&path).await.unwrap();

    assert_eq!(reopened.count().await.unwrap(), 2);
    assert!(reopened.lookup(&removed.short_code).await.unwrap().is_none());

    let listed = reopened.list_all().await.unwrap();
    let codes: Vec<&str> = listed.iter().map(|r| r.short_code.as_str()).collect();
    let expected: Vec<&str> = kept.iter().map(|r| r.short_code.as_str()).collect();
    assert_eq!(codes, expected);

    let first = reopened.lookup(&kept[1].short_code).await.unwrap().unwrap();
    assert_eq!(first.clicks, 2);
    assert_eq!(first.created_at, kept[1].created_at);
    assert_eq!(
        reopened.lookup_by_id(&first.id).await.unwrap(),
        Some(first.clone())
    );
}

#[tokio::test]
async fn test_loads_hand_written_snapshot() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("urls.json");
    std::fs::write(
        &path,
        r#"{
  "urls": [
    {
      "id": "Nq7sXbT1x0kP2mGm5rAa9w",
      "original_url": "https://example.com",
      "short_code": "abcd1234",
      "created_at": "2025-01-15T10:30:00.000Z",
      "clicks": 7
    }
  ]
}"#,
    )
    .unwrap();

    let repo = FileUrlRepository::open(&path).await.unwrap();
    let record = repo.increment_clicks("abcd1234").await.unwrap().unwrap();

    assert_eq!(record.clicks, 8);
    assert_eq!(record.original_url, "https://example.com");
}

#[tokio::test]
async fn test_absent_code_operations_do_not_write() {
    let dir = tempdir().unwrap();
    let data_dir = dir.path().join("data");
    let path = data_dir.join("urls.json");
    let repo = FileUrlRepository::open(&path).await.unwrap();

    // Any write attempt would now fail.
    std::fs::remove_dir_all(&data_dir).unwrap();

    assert!(!repo.delete("missing0").await.unwrap());
    assert!(repo.increment_clicks("missing0").await.unwrap().is_none());
}

#[tokio::test]
async fn test_failed_write_leaves_store_unchanged() {
    let dir = tempdir().unwrap();
    let data_dir = dir.path().join("data");
    let path = data_dir.join("urls.json");
    let repo = FileUrlRepository::open(&path).await.unwrap();
    let existing = repo.create("https://example.com/kept").await.unwrap();

    std::fs::remove_dir_all(&data_dir).unwrap();

    let create = repo.create("https://example.com/lost").await;
    assert!(matches!(create, Err(AppError::Storage(_))));

    let click = repo.increment_clicks(&existing.short_code).await;
    assert!(matches!(click, Err(AppError::Storage(_))));

    let delete = repo.delete(&existing.short_code).await;
    assert!(matches!(delete, Err(AppError::Storage(_))));

    assert_eq!(repo.count().await.unwrap(), 1);
    let stored = repo.lookup(&existing.short_code).await.unwrap().unwrap();
    assert_eq!(stored.clicks, 0);
}

#[tokio::test]
async fn test_no_temporary_files_left_behind() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("urls.json");
    let repo = FileUrlRepository::open(&path).await.unwrap();

    for i in 0..5 {
        let record = repo.create(&format!("https://example.com/{i}")).await.unwrap();
        repo.increment_clicks(&record.short_code).await.unwrap();
    }

    let entries: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("urls.json")]);
}

#[tokio::test]
async fn test_generation_exhausted_does_not_write() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("urls.json");
    let generator = Arc::new(CyclingGenerator::new(vec!["samecode"]));
    let repo = FileUrlRepository::open_with_generator(&path, generator)
        .await
        .unwrap();

    repo.create("https://example.com/1").await.unwrap();
    let before = std::fs::read(&path).unwrap();

    let result = repo.create("https://example.com/2").await;

    assert!(matches!(result, Err(AppError::GenerationExhausted { .. })));
    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_increments_are_persisted() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("urls.json");
    let repo = Arc::new(FileUrlRepository::open(&path).await.unwrap());
    let created = repo.create("https://example.com").await.unwrap();

    let tasks: Vec<_> = (0..25)
        .map(|_| {
            let repo = repo.clone();
            let code = created.short_code.clone();
            tokio::spawn(async move { repo.increment_clicks(&code).await })
        })
        .collect();

    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let document = read_document(&path);
    assert_eq!(document["urls"][0]["clicks"], 25);
}

/// Polls until memory and disk report the same clicks for the only record.
async fn settled_clicks(repo: &FileUrlRepository, code: &str) -> (u64, u64) {
    let mut observed = (0, 0);

    for _ in 0..200 {
        let memory = repo.lookup(code).await.unwrap().unwrap().clicks;
        let disk = read_document(repo.path())["urls"][0]["clicks"]
            .as_u64()
            .unwrap();
        observed = (memory, disk);
        if memory == disk {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    observed
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_aborted_increment_keeps_disk_and_memory_in_sync() {
    let dir = tempdir().unwrap();
    let repo = Arc::new(
        FileUrlRepository::open(dir.path().join("urls.json"))
            .await
            .unwrap(),
    );
    let code = repo.create("https://example.com").await.unwrap().short_code;

    for _ in 0..50 {
        let task = tokio::spawn({
            let repo = repo.clone();
            let code = code.clone();
            async move { repo.increment_clicks(&code).await }
        });
        tokio::task::yield_now().await;
        task.abort();
        let _ = task.await;

        let (memory, disk) = settled_clicks(&repo, &code).await;
        assert_eq!(memory, disk);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_aborted_delete_keeps_disk_and_memory_in_sync() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("urls.json");
    let repo = Arc::new(FileUrlRepository::open(&path).await.unwrap());

    for i in 0..20 {
        let code = repo
            .create(&format!("https://example.com/{i}"))
            .await
            .unwrap()
            .short_code;

        let task = tokio::spawn({
            let repo = repo.clone();
            let code = code.clone();
            async move { repo.delete(&code).await }
        });
        tokio::task::yield_now().await;
        task.abort();
        let _ = task.await;

        let mut agreed = false;
        for _ in 0..200 {
            let in_memory = repo.lookup(&code).await.unwrap().is_some();
            let on_disk = read_document(&path)["urls"]
                .as_array()
                .unwrap()
                .iter()
                .any(|entry| entry["short_code"] == code);
            if in_memory == on_disk {
                agreed = true;
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
        assert!(agreed, "store and snapshot disagree about {code}");

        repo.delete(&code).await.unwrap();
    }
}
