use cab_database::*;
use serde_json::{Value, json};

fn fields(value: Value) -> Fields {
    let (_, data) = Document::from_value(value).expect("object");
    data
}

async fn exercise_engine(db: &Database) {
    db.insert("services", Document::new("b-tax", fields(json!({ "title": "Fiscalité" }))))
        .await
        .unwrap();
    db.insert("services", Document::new("a-family", fields(json!({ "title": "Famille", "order": 1 }))))
        .await
        .unwrap();

    let docs = db.list("services").await.unwrap();
    let ids: Vec<_> = docs.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, ["a-family", "b-tax"]);

    let updated = db
        .update("services", "a-family", fields(json!({ "title": { "fr": "Famille", "en": "Famille" } })))
        .await
        .unwrap();
    assert_eq!(updated.get("order"), Some(&json!(1)));

    let stored = db.get("services", "a-family").await.unwrap().expect("document exists");
    assert_eq!(stored.get("title"), Some(&json!({ "fr": "Famille", "en": "Famille" })));
    assert_eq!(stored.get("order"), Some(&json!(1)));

    let missing = db.update("services", "ghost", Fields::new()).await.unwrap_err();
    assert!(matches!(missing, DatabaseError::NotFound { .. }));

    db.delete("services", "b-tax").await.unwrap();
    assert!(db.get("services", "b-tax").await.unwrap().is_none());
    assert!(matches!(
        db.delete("services", "b-tax").await,
        Err(DatabaseError::NotFound { .. })
    ));

    assert!(db.list("testimonials").await.unwrap().is_empty());
}

#[tokio::test]
async fn memory_engine_round_trip() {
    let db = Database::builder().url("mem://").init().await.unwrap();
    assert!(matches!(*db, Engine::Memory(_)));
    exercise_engine(&db).await;
}

#[tokio::test]
async fn file_engine_round_trip() {
    let tmp = tempfile::tempdir().unwrap();
    let url = format!("file://{}", tmp.path().join("store").display());
    let db = Database::builder().url(url).init().await.unwrap();
    assert!(matches!(*db, Engine::File(_)));
    exercise_engine(&db).await;

    let on_disk = tmp.path().join("store").join("services").join("a-family.json");
    let raw: Value = serde_json::from_slice(&std::fs::read(on_disk).unwrap()).unwrap();
    assert_eq!(raw["order"], json!(1));
}

#[tokio::test]
async fn compressed_file_engine_round_trip() {
    let tmp = tempfile::tempdir().unwrap();
    let url = format!("file://{}", tmp.path().display());
    let db = Database::builder().url(url).compression(true).init().await.unwrap();
    exercise_engine(&db).await;

    let on_disk = tmp.path().join("services").join("a-family.json");
    assert!(serde_json::from_slice::<Value>(&std::fs::read(on_disk).unwrap()).is_err());
}

#[tokio::test]
async fn file_engine_persists_across_handles() {
    let tmp = tempfile::tempdir().unwrap();
    let url = format!("file://{}", tmp.path().display());

    {
        let db = Database::builder().url(url.clone()).init().await.unwrap();
        db.insert("team", Document::new("m1", fields(json!({ "name": "Claire" })))).await.unwrap();
    }

    let db = Database::builder().url(url).init().await.unwrap();
    let doc = db.get("team", "m1").await.unwrap().expect("persisted");
    assert_eq!(doc.get("name"), Some(&json!("Claire")));
}

#[tokio::test]
async fn names_are_validated_before_the_engine() {
    let db = Database::builder().url("mem://").init().await.unwrap();
    let bad_id = db.insert("services", Document::new("../escape", Fields::new())).await;
    assert!(matches!(bad_id, Err(DatabaseError::Validation { .. })));

    let bad_collection = db.list("legal.categories").await;
    assert!(matches!(bad_collection, Err(DatabaseError::Validation { .. })));
}

#[tokio::test]
async fn missing_parameters_fail_validation() {
    let err = Database::builder().init().await.unwrap_err();
    assert!(matches!(err, DatabaseError::Validation { .. }));

    let err = Database::builder().url("file://").init().await.unwrap_err();
    assert!(matches!(err, DatabaseError::Validation { .. }));
}

#[tokio::test]
async fn unsupported_scheme_is_rejected() {
    let err = Database::builder().url("postgres://localhost").init().await.unwrap_err();
    assert_eq!(err.kind(), "Connection");
}

#[tokio::test]
async fn memory_handles_share_state() {
    let store = MemoryStore::new();
    let clone = store.clone();
    clone.insert("announcements", Document::new("a1", Fields::new())).await.unwrap();
    assert_eq!(store.len(), 1);
}
