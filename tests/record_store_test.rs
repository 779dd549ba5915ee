//! Tests for the file-backed InMemoryRecordStore

use std::fs;

use tempfile::TempDir;

use multimenu::domain::{FieldNames, FieldValue, RecordKey};
use multimenu::infrastructure::{InMemoryRecordStore, RecordStore, StoreError};
use multimenu::util::testing;

const JSON_RECORDS: &str = r#"[
    { "id": 1, "parentId": null, "title": "Home" },
    { "id": 2, "parentId": 1, "title": "About" },
    { "id": 3, "parentId": 2, "title": "Team", "visible": true }
]"#;

const TOML_RECORDS: &str = r#"
[[records]]
id = "docs"
title = "Docs"

[[records]]
id = "install"
parentId = "docs"
title = "Install"
"#;

#[test]
fn given_json_file_when_loading_then_reads_all_records() {
    testing::init_test_setup();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("menu.json");
    fs::write(&path, JSON_RECORDS).unwrap();

    let store = InMemoryRecordStore::load(&path, FieldNames::default()).unwrap();

    assert_eq!(store.count().unwrap(), 3);
    let team = store.find_by_id(&RecordKey::Int(3)).unwrap().unwrap();
    assert_eq!(team.get("visible"), Some(&FieldValue::Bool(true)));
    let home = store.find_by_id(&RecordKey::Int(1)).unwrap().unwrap();
    assert_eq!(home.get("parentId"), Some(&FieldValue::Null));
}

#[test]
fn given_toml_file_when_loading_then_reads_record_tables() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("menu.toml");
    fs::write(&path, TOML_RECORDS).unwrap();

    let store = InMemoryRecordStore::load(&path, FieldNames::default()).unwrap();

    let install = store.find_by_id(&RecordKey::from("install")).unwrap().unwrap();
    assert_eq!(install.get("parentId"), Some(&FieldValue::from("docs")));
}

#[test]
fn given_modified_json_store_when_saving_then_file_reflects_changes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("menu.json");
    fs::write(&path, JSON_RECORDS).unwrap();
    let store = InMemoryRecordStore::load(&path, FieldNames::default()).unwrap();

    store.remove(&RecordKey::Int(3)).unwrap();
    store.save(&path).unwrap();
    let reloaded = InMemoryRecordStore::load(&path, FieldNames::default()).unwrap();

    assert_eq!(reloaded.count().unwrap(), 2);
    assert!(reloaded.find_by_id(&RecordKey::Int(3)).unwrap().is_none());
}

#[test]
fn given_null_parent_when_saving_toml_then_field_is_omitted() {
    let dir = TempDir::new().unwrap();
    let json = dir.path().join("menu.json");
    let toml_path = dir.path().join("menu.toml");
    fs::write(&json, JSON_RECORDS).unwrap();
    let store = InMemoryRecordStore::load(&json, FieldNames::default()).unwrap();

    store.save(&toml_path).unwrap();
    let reloaded = InMemoryRecordStore::load(&toml_path, FieldNames::default()).unwrap();

    let home = reloaded.find_by_id(&RecordKey::Int(1)).unwrap().unwrap();
    assert_eq!(home.get("parentId"), None);
    let about = reloaded.find_by_id(&RecordKey::Int(2)).unwrap().unwrap();
    assert_eq!(about.get("parentId"), Some(&FieldValue::Int(1)));
}

#[test]
fn given_unsupported_extension_when_loading_then_format_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("menu.yaml");
    fs::write(&path, "- id: 1").unwrap();

    let result = InMemoryRecordStore::load(&path, FieldNames::default());

    assert!(matches!(result, Err(StoreError::Format { .. })));
}

#[test]
fn given_missing_file_when_loading_then_io_error() {
    let dir = TempDir::new().unwrap();

    let result = InMemoryRecordStore::load(&dir.path().join("none.json"), FieldNames::default());

    assert!(matches!(result, Err(StoreError::Io { .. })));
}

#[test]
fn given_malformed_json_when_loading_then_format_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("menu.json");
    fs::write(&path, "{ not json").unwrap();

    let result = InMemoryRecordStore::load(&path, FieldNames::default());

    assert!(matches!(result, Err(StoreError::Format { .. })));
}
