use cab_database::{Database, DatabaseError, Document, DocumentStore, Fields, MemoryStore};
use cab_domain::Language;
use cab_localization::{MigrateOptions, Migrator};
use parking_lot::Mutex;
use serde_json::{Value, json};

fn fields(value: Value) -> Fields {
    Document::from_value(value).expect("object").1
}

async fn seeded() -> Database {
    let db = Database::builder().url("mem://").init().await.unwrap();
    let docs = [
        ("services", "family", json!({
            "title": "Droit de la famille",
            "description": { "fr": "Divorce et garde", "en": "Divorce and custody" },
            "features": ["a (plain)", { "fr": "x", "en": "y" }],
            "order": 1,
            "isActive": true
        })),
        ("services", "tax", json!({ "title": { "fr": "Fiscalité", "en": "Tax" }, "order": 2 })),
        ("team", "claire", json!({ "name": "Claire", "role": "Associée", "bio": { "fr": "Bio" } })),
        ("processes", "step1", json!({ "title": "Consultation", "stepNumber": 1 })),
        ("legalCategories", "divorce", json!({
            "title": { "fr": "Divorce", "en": "Divorce" },
            "steps": [{ "title": "Requête", "description": { "fr": "Dépôt", "en": "Filing" } }]
        })),
    ];
    for (collection, id, body) in docs {
        db.insert(collection, Document::new(id, fields(body))).await.unwrap();
    }
    db
}

async fn snapshot<S: DocumentStore>(store: &S) -> Vec<Document> {
    let mut all = Vec::new();
    for collection in cab_domain::constants::COLLECTIONS {
        all.extend(store.list(collection).await.unwrap());
    }
    all
}

#[tokio::test]
async fn live_run_upgrades_legacy_fields() {
    let db = seeded().await;
    let summary = Migrator::default().run(&db, &MigrateOptions::default()).await.unwrap();

    let services = summary.collection("services").unwrap();
    assert_eq!((services.scanned, services.updated, services.failed), (2, 1, 0));
    assert_eq!(summary.collection("team").unwrap().updated, 1);
    assert_eq!(summary.collection("processes").unwrap().updated, 1);
    assert_eq!(summary.collection("legalCategories").unwrap().updated, 1);
    assert_eq!(summary.collection("testimonials").unwrap().scanned, 0);
    assert!(!summary.has_failures());

    let family = db.get("services", "family").await.unwrap().unwrap();
    assert_eq!(
        family.get("title"),
        Some(&json!({ "fr": "Droit de la famille", "en": "Droit de la famille" }))
    );
    assert_eq!(
        family.get("features"),
        Some(&json!([{ "fr": "a (plain)", "en": "a (plain)" }, { "fr": "x", "en": "y" }]))
    );
    assert_eq!(family.get("order"), Some(&json!(1)));
    assert_eq!(family.get("isActive"), Some(&json!(true)));

    let tax = db.get("services", "tax").await.unwrap().unwrap();
    assert_eq!(tax.get("title"), Some(&json!({ "fr": "Fiscalité", "en": "Tax" })));

    let claire = db.get("team", "claire").await.unwrap().unwrap();
    assert_eq!(claire.get("bio"), Some(&json!({ "fr": "Bio", "en": "Bio" })));
    assert_eq!(claire.get("name"), Some(&json!("Claire")));

    let divorce = db.get("legalCategories", "divorce").await.unwrap().unwrap();
    assert_eq!(
        divorce.get("steps"),
        Some(&json!([{
            "title": { "fr": "Requête", "en": "Requête" },
            "description": { "fr": "Dépôt", "en": "Filing" }
        }]))
    );
}

#[tokio::test]
async fn second_run_is_a_no_op() {
    let db = seeded().await;
    let migrator = Migrator::default();
    migrator.run(&db, &MigrateOptions::default()).await.unwrap();
    let after_first = snapshot(&db).await;

    let second = migrator.run(&db, &MigrateOptions::default()).await.unwrap();
    assert!(second.collections.iter().all(|c| c.updated == 0));
    assert_eq!(second.scanned(), 5);
    assert_eq!(snapshot(&db).await, after_first);
}

#[tokio::test]
async fn dry_run_counts_like_live_and_writes_nothing() {
    let dry_db = seeded().await;
    let live_db = seeded().await;
    let before = snapshot(&dry_db).await;

    let dry = Migrator::default()
        .run(&dry_db, &MigrateOptions::default().dry_run(true))
        .await
        .unwrap();
    let live = Migrator::default().run(&live_db, &MigrateOptions::default()).await.unwrap();

    assert!(dry.dry_run);
    assert_eq!(dry.collections, live.collections);
    assert_eq!(snapshot(&dry_db).await, before);
}

#[tokio::test]
async fn lang_fallback_does_not_change_the_outcome() {
    let fr_db = seeded().await;
    let en_db = seeded().await;

    Migrator::default().run(&fr_db, &MigrateOptions::default()).await.unwrap();
    Migrator::default()
        .run(&en_db, &MigrateOptions::default().lang_fallback(Language::En))
        .await
        .unwrap();

    assert_eq!(snapshot(&fr_db).await, snapshot(&en_db).await);
}

#[tokio::test]
async fn collection_filter_accepts_aliases() {
    let db = seeded().await;
    let options = MigrateOptions::default().collection("process");
    let summary = Migrator::default().run(&db, &options).await.unwrap();

    assert_eq!(summary.collections.len(), 1);
    assert_eq!(summary.collections[0].collection, "processes");
    let untouched = db.get("services", "family").await.unwrap().unwrap();
    assert_eq!(untouched.get("title"), Some(&json!("Droit de la famille")));

    let unknown = Migrator::default().run(&db, &MigrateOptions::default().collection("blog")).await;
    assert!(unknown.is_err());
}

/// Records every patch and fails on demand.
#[derive(Debug, Default)]
struct FaultyStore {
    inner: MemoryStore,
    fail_update: Option<&'static str>,
    fail_list: Option<&'static str>,
    patches: Mutex<Vec<(String, String, Fields)>>,
}

impl DocumentStore for FaultyStore {
    async fn list(&self, collection: &str) -> Result<Vec<Document>, DatabaseError> {
        if self.fail_list == Some(collection) {
            return Err("listing unavailable".into());
        }
        self.inner.list(collection).await
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, DatabaseError> {
        self.inner.get(collection, id).await
    }

    async fn insert(&self, collection: &str, document: Document) -> Result<(), DatabaseError> {
        self.inner.insert(collection, document).await
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Fields,
    ) -> Result<Document, DatabaseError> {
        if self.fail_update == Some(id) {
            return Err("permission denied".into());
        }
        self.patches.lock().push((collection.to_owned(), id.to_owned(), patch.clone()));
        self.inner.update(collection, id, patch).await
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), DatabaseError> {
        self.inner.delete(collection, id).await
    }
}

async fn faulty_store(
    fail_update: Option<&'static str>,
    fail_list: Option<&'static str>,
) -> FaultyStore {
    let store = FaultyStore { fail_update, fail_list, ..FaultyStore::default() };
    for id in ["a1", "a2", "a3"] {
        let body = fields(json!({
            "title": format!("Annonce {id}"),
            "content": { "fr": "Texte", "en": "Text" },
            "isPinned": false
        }));
        store.insert("announcements", Document::new(id, body)).await.unwrap();
    }
    store.insert("team", Document::new("m1", fields(json!({ "role": "Avocate" })))).await.unwrap();
    store
}

#[tokio::test]
async fn failed_update_is_skipped_and_reported() {
    let store = faulty_store(Some("a2"), None).await;
    let summary = Migrator::default().run(&store, &MigrateOptions::default()).await.unwrap();

    let announcements = summary.collection("announcements").unwrap();
    assert_eq!((announcements.scanned, announcements.updated, announcements.failed), (3, 2, 1));
    assert_eq!(summary.collection("team").unwrap().updated, 1);

    assert_eq!(summary.failures.len(), 1);
    let failure = &summary.failures[0];
    assert_eq!(failure.collection, "announcements");
    assert_eq!(failure.id.as_deref(), Some("a2"));
    assert!(failure.reason.contains("permission denied"));

    let a3 = store.get("announcements", "a3").await.unwrap().unwrap();
    assert_eq!(a3.get("title"), Some(&json!({ "fr": "Annonce a3", "en": "Annonce a3" })));
    let a2 = store.get("announcements", "a2").await.unwrap().unwrap();
    assert_eq!(a2.get("title"), Some(&json!("Annonce a2")));
}

#[tokio::test]
async fn failed_listing_skips_only_that_collection() {
    let store = faulty_store(None, Some("announcements")).await;
    let summary = Migrator::default().run(&store, &MigrateOptions::default()).await.unwrap();

    let announcements = summary.collection("announcements").unwrap();
    assert_eq!((announcements.scanned, announcements.updated, announcements.failed), (0, 0, 1));
    assert_eq!(summary.collection("team").unwrap().updated, 1);
    assert_eq!(summary.failures.len(), 1);
    assert!(summary.failures[0].id.is_none());
    assert!(summary.has_failures());
    assert_eq!(summary.failed(), summary.failures.len());

    let table = summary.to_string();
    let total = table.lines().find(|line| line.starts_with("total")).unwrap();
    assert_eq!(total.split_whitespace().collect::<Vec<_>>(), ["total", "1", "1", "1"]);
}

#[tokio::test]
async fn updates_carry_only_changed_fields() {
    let store = faulty_store(None, None).await;
    Migrator::default().run(&store, &MigrateOptions::default()).await.unwrap();

    let patches = store.patches.lock();
    assert_eq!(patches.len(), 4);
    for (collection, _, patch) in patches.iter() {
        let keys: Vec<_> = patch.keys().map(String::as_str).collect();
        match collection.as_str() {
            "announcements" => assert_eq!(keys, ["title"]),
            "team" => assert_eq!(keys, ["role"]),
            other => panic!("unexpected collection {other}"),
        }
    }
}

#[tokio::test]
async fn summary_table_lists_failures() {
    let store = faulty_store(Some("a1"), None).await;
    let summary = Migrator::default().run(&store, &MigrateOptions::default()).await.unwrap();
    let table = summary.to_string();

    assert!(table.starts_with("Localized content migration (live)"));
    assert!(table.contains("announcements"));
    assert!(table.contains("announcements/a1: "));
}
