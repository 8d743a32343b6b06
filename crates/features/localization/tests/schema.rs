use cab_localization::{FieldKind, LocalizationError, LocalizationSchema, MigrateOptions, Migrator};
use cab_database::{Database, Document, DocumentStore};
use serde_json::json;

const CUSTOM: &str = r#"
[[collections]]
name = "faq"
aliases = ["questions"]
fields = [
  { path = "question", kind = "text" },
  { path = "answer", kind = "text" },
  { path = "tags", kind = "text_list" },
]

[[collections]]
name = "legalCategories"
fields = [
  { path = "title", kind = "text" },
  { path = "steps", kind = "nested", fields = ["title"] },
]
"#;

#[test]
fn toml_schema_is_parsed() {
    let schema = LocalizationSchema::from_toml_str(CUSTOM).unwrap();
    assert_eq!(schema.collections.len(), 2);

    let faq = schema.collection("questions").unwrap();
    assert_eq!(faq.name, "faq");
    assert_eq!(faq.fields[2].kind, FieldKind::TextList);

    let legal = schema.collection("legalCategories").unwrap();
    assert_eq!(legal.fields[1].kind, FieldKind::Nested);
    assert_eq!(legal.fields[1].fields, ["title"]);
}

#[test]
fn schema_file_is_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schema.toml");
    std::fs::write(&path, CUSTOM).unwrap();

    let schema = LocalizationSchema::from_file(&path).unwrap();
    assert!(schema.collection("faq").is_some());
}

#[test]
fn missing_file_is_a_source_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = LocalizationSchema::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, LocalizationError::Source { .. }));
}

#[test]
fn invalid_schemas_are_rejected() {
    let nested_without_fields = r#"
[[collections]]
name = "legalCategories"
fields = [{ path = "steps", kind = "nested" }]
"#;
    assert!(matches!(
        LocalizationSchema::from_toml_str(nested_without_fields),
        Err(LocalizationError::Schema { .. })
    ));

    let dotted = r#"
[[collections]]
name = "team"
fields = [{ path = "bio.fr", kind = "text" }]
"#;
    assert!(LocalizationSchema::from_toml_str(dotted).is_err());

    let unknown_kind = r#"
[[collections]]
name = "team"
fields = [{ path = "bio", kind = "markdown" }]
"#;
    assert!(LocalizationSchema::from_toml_str(unknown_kind).is_err());
}

#[tokio::test]
async fn custom_schema_drives_the_migrator() {
    let db = Database::builder().url("mem://").init().await.unwrap();
    let (_, data) = Document::from_value(json!({
        "question": "Combien ?",
        "tags": ["tarifs"],
        "answer": { "fr": "Gratuit", "en": "Free" }
    }))
    .unwrap();
    db.insert("faq", Document::new("q1", data)).await.unwrap();

    let migrator = Migrator::new(LocalizationSchema::from_toml_str(CUSTOM).unwrap());
    let summary = migrator.run(&db, &MigrateOptions::default()).await.unwrap();
    assert_eq!(summary.collection("faq").unwrap().updated, 1);

    let q1 = db.get("faq", "q1").await.unwrap().unwrap();
    assert_eq!(q1.get("tags"), Some(&json!([{ "fr": "tarifs", "en": "tarifs" }])));
    assert_eq!(q1.get("answer"), Some(&json!({ "fr": "Gratuit", "en": "Free" })));
}
