use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;

const SEED: &str = r#"{
  "services": [
    { "id": "family", "order": 1, "title": "Droit de la famille", "features": ["Médiation", { "fr": "Garde", "en": "Custody" }] },
    { "id": "tax", "order": 2, "title": { "fr": "Fiscalité", "en": "Tax law" } }
  ],
  "process": [],
  "team": [{ "id": "claire", "name": "Claire", "role": "Associée" }]
}"#;

fn cabinet(workdir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("cabinet").unwrap();
    cmd.current_dir(workdir).env_remove("RUST_LOG");
    cmd
}

fn seeded() -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().unwrap();
    let seed = dir.path().join("seed.json");
    std::fs::write(&seed, SEED).unwrap();
    let store = format!("file://{}", dir.path().join("store").display());

    cabinet(dir.path())
        .args(["--store", &store, "seed"])
        .arg(&seed)
        .assert()
        .success()
        .stdout(predicate::str::contains("services"));
    (dir, store)
}

#[test]
fn no_arguments_prints_help() {
    let dir = tempfile::tempdir().unwrap();
    cabinet(dir.path()).assert().failure().stderr(predicate::str::contains("Usage"));
}

#[test]
fn dry_run_then_live_then_converged() {
    let (dir, store) = seeded();

    let dry = cabinet(dir.path())
        .args(["--store", &store, "migrate", "--dry-run", "--json"])
        .assert()
        .success();
    let summary: Value = serde_json::from_slice(&dry.get_output().stdout).unwrap();
    assert_eq!(summary["dry_run"], Value::Bool(true));
    assert_eq!(summary["collections"][0]["collection"], "services");
    assert_eq!(summary["collections"][0]["updated"], 1);

    let raw = std::fs::read_to_string(dir.path().join("store/services/family.json")).unwrap();
    assert!(raw.contains("\"Droit de la famille\""));
    assert!(!raw.contains("\"fr\": \"Droit de la famille\""));

    cabinet(dir.path())
        .args(["--store", &store, "migrate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(live)"));

    let second = cabinet(dir.path())
        .args(["--store", &store, "migrate", "--json"])
        .assert()
        .success();
    let summary: Value = serde_json::from_slice(&second.get_output().stdout).unwrap();
    let updated: u64 = summary["collections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["updated"].as_u64().unwrap())
        .sum();
    assert_eq!(updated, 0);
}

#[test]
fn show_resolves_titles_in_the_requested_language() {
    let (dir, store) = seeded();

    cabinet(dir.path())
        .args(["--store", &store, "show", "services", "--lang", "en-US"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Droit de la famille"))
        .stdout(predicate::str::contains("Tax law"));

    cabinet(dir.path())
        .args(["--store", &store, "show", "services", "--lang", "fr-CA"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fiscalité"));
}

#[test]
fn collection_filter_and_unknown_collections() {
    let (dir, store) = seeded();

    let out = cabinet(dir.path())
        .args(["--store", &store, "migrate", "--json", "--collection", "team"])
        .assert()
        .success();
    let summary: Value = serde_json::from_slice(&out.get_output().stdout).unwrap();
    assert_eq!(summary["collections"].as_array().unwrap().len(), 1);

    cabinet(dir.path())
        .args(["--store", &store, "migrate", "--collection", "blog"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("blog"));

    cabinet(dir.path())
        .args(["--store", &store, "show", "blog"])
        .assert()
        .failure();
}

#[test]
fn config_file_selects_the_store() {
    let (dir, store) = seeded();
    let config = dir.path().join("cabinet.toml");
    let body =
        format!("[database]\nurl = \"{store}\"\n\n[localization]\ndefault_language = \"en\"\n");
    std::fs::write(&config, body).unwrap();

    cabinet(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["show", "services"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tax law"))
        .stderr(predicate::str::contains("Configuration loaded"))
        .stderr(predicate::str::contains("cabinet.toml"));
}

#[test]
fn unsupported_store_url_fails() {
    let dir = tempfile::tempdir().unwrap();
    cabinet(dir.path())
        .args(["--store", "redis://localhost", "show", "services"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Opening the document store"));
}
