// ABOUTME: Integration tests for the SQLite document store
// ABOUTME: Tests create-if-absent, merge and update semantics against a real database file

use jobtrack_storage::{
    server_timestamp, Document, DocumentPath, DocumentStore, SetOptions, SqliteDocumentStore,
    StoreError,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tempfile::TempDir;

/// Helper to create a store backed by a temporary database file
async fn setup_test_store() -> (SqliteDocumentStore, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let store = SqliteDocumentStore::open(&db_path, 1).await.unwrap();
    (store, temp_dir)
}

fn doc(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected a JSON object"),
    }
}

#[tokio::test]
async fn test_set_and_get_document() {
    let (store, _temp_dir) = setup_test_store().await;
    let path = DocumentPath::user("user-1").unwrap();

    let result = store
        .set(
            &path,
            doc(json!({
                "email": "jane@example.com",
                "displayName": "Jane Doe",
                "createdAt": server_timestamp(),
                "lastLogin": server_timestamp()
            })),
            SetOptions::overwrite(),
        )
        .await
        .unwrap();

    let stored = store.get(&path).await.unwrap().unwrap();
    let stamp = json!(result.write_time.to_rfc3339());
    assert_eq!(stored["email"], json!("jane@example.com"));
    assert_eq!(stored["createdAt"], stamp);
    assert_eq!(stored["lastLogin"], stamp);
}

#[tokio::test]
async fn test_get_missing_document() {
    let (store, _temp_dir) = setup_test_store().await;
    let path = DocumentPath::user_settings("user-1").unwrap();

    assert!(store.get(&path).await.unwrap().is_none());
    assert!(!store.exists(&path).await.unwrap());
}

#[tokio::test]
async fn test_set_twice_never_duplicates() {
    let (store, _temp_dir) = setup_test_store().await;
    let path = DocumentPath::user("user-1").unwrap();

    store
        .set(&path, doc(json!({ "a": 1 })), SetOptions::overwrite())
        .await
        .unwrap();
    store
        .set(&path, doc(json!({ "a": 2 })), SetOptions::overwrite())
        .await
        .unwrap();

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documents")
        .fetch_one(store.pool())
        .await
        .unwrap();
    assert_eq!(count, 1);
    assert_eq!(store.get(&path).await.unwrap().unwrap()["a"], json!(2));
}

#[tokio::test]
async fn test_merge_set_preserves_sibling_fields() {
    let (store, _temp_dir) = setup_test_store().await;
    let path = DocumentPath::user_settings("user-1").unwrap();

    store
        .set(
            &path,
            doc(json!({
                "notifications": { "weeklyReport": true, "emailNotifications": true },
                "privacy": { "dataCollection": true }
            })),
            SetOptions::overwrite(),
        )
        .await
        .unwrap();

    store
        .set(
            &path,
            doc(json!({ "notifications": { "weeklyReport": false } })),
            SetOptions::merge(),
        )
        .await
        .unwrap();

    let stored = store.get(&path).await.unwrap().unwrap();
    assert_eq!(
        stored["notifications"],
        json!({ "weeklyReport": false, "emailNotifications": true })
    );
    assert_eq!(stored["privacy"], json!({ "dataCollection": true }));
}

#[tokio::test]
async fn test_update_replaces_supplied_fields_only() {
    let (store, _temp_dir) = setup_test_store().await;
    let path = DocumentPath::user_settings("user-1").unwrap();

    store
        .set(
            &path,
            doc(json!({ "profile": { "firstName": "Jane" }, "createdAt": "2024-01-01T00:00:00+00:00" })),
            SetOptions::overwrite(),
        )
        .await
        .unwrap();

    let result = store
        .update(
            &path,
            doc(json!({ "profile": { "firstName": "J" }, "updatedAt": server_timestamp() })),
        )
        .await
        .unwrap();

    let stored = store.get(&path).await.unwrap().unwrap();
    assert_eq!(stored["profile"], json!({ "firstName": "J" }));
    assert_eq!(stored["createdAt"], json!("2024-01-01T00:00:00+00:00"));
    assert_eq!(stored["updatedAt"], json!(result.write_time.to_rfc3339()));
}

#[tokio::test]
async fn test_update_missing_document_is_not_found() {
    let (store, _temp_dir) = setup_test_store().await;
    let path = DocumentPath::user_settings("user-1").unwrap();

    let err = store
        .update(&path, doc(json!({ "a": 1 })))
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::NotFound(_)));
    assert_eq!(err.code(), "not-found");
}

#[tokio::test]
async fn test_data_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("persist.db");
    let path = DocumentPath::user("user-1").unwrap();

    {
        let store = SqliteDocumentStore::open(&db_path, 1).await.unwrap();
        store
            .set(&path, doc(json!({ "email": "a@b.c" })), SetOptions::overwrite())
            .await
            .unwrap();
        store.pool().close().await;
    }

    let reopened = SqliteDocumentStore::open(&db_path, 1).await.unwrap();
    let stored = reopened.get(&path).await.unwrap().unwrap();
    assert_eq!(stored["email"], json!("a@b.c"));
}

#[tokio::test]
async fn test_in_memory_store() {
    let store = SqliteDocumentStore::in_memory().await.unwrap();
    let path = DocumentPath::user("user-1").unwrap();

    store
        .set(&path, doc(json!({ "x": true })), SetOptions::overwrite())
        .await
        .unwrap();

    assert!(store.exists(&path).await.unwrap());
}
