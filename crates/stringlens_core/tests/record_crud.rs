use serde_json::json;
use stringlens_core::db::open_db_in_memory;
use stringlens_core::{
    analyze, RecordRepository, RecordService, RepoError, ServiceError, SqliteRecordRepository,
};

#[test]
fn insert_and_find_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::new(&conn);

    let props = analyze("hello world");
    let (record, inserted) = repo.insert_if_absent("hello world", &props).unwrap();
    assert!(inserted);
    assert_eq!(record.id, props.sha256_hash);
    assert_eq!(record.value, "hello world");
    assert_eq!(record.length, 11);
    assert_eq!(record.word_count, 2);
    assert!(record.created_at > 0);

    let loaded = repo.find_by_value("hello world").unwrap().unwrap();
    assert_eq!(loaded, record);
}

#[test]
fn second_insert_of_same_value_retains_original() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::new(&conn);

    let props = analyze("level");
    let (original, inserted) = repo.insert_if_absent("level", &props).unwrap();
    assert!(inserted);

    let (retained, inserted_again) = repo.insert_if_absent("level", &props).unwrap();
    assert!(!inserted_again);
    assert_eq!(retained, original);
    assert_eq!(repo.list_records().unwrap().len(), 1);
}

#[test]
fn delete_is_permanent_and_missing_delete_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::new(&conn);

    repo.insert_if_absent("ephemeral", &analyze("ephemeral"))
        .unwrap();
    repo.delete_by_value("ephemeral").unwrap();
    assert!(repo.find_by_value("ephemeral").unwrap().is_none());

    let err = repo.delete_by_value("ephemeral").unwrap_err();
    assert!(matches!(err, RepoError::NotFound(value) if value == "ephemeral"));
}

#[test]
fn service_write_path_reports_duplicate_as_conflict() {
    let conn = open_db_in_memory().unwrap();
    let service = RecordService::new(SqliteRecordRepository::new(&conn));

    let record = service.create("racecar").unwrap();
    assert!(record.is_palindrome);

    let err = service.create("racecar").unwrap_err();
    assert_eq!(err.code(), "duplicate_value");
    assert!(matches!(err, ServiceError::DuplicateValue { id } if id == record.id));
}

#[test]
fn service_write_path_validates_payload_in_order() {
    let conn = open_db_in_memory().unwrap();
    let service = RecordService::new(SqliteRecordRepository::new(&conn));

    let err = service.create_from_payload(&json!({})).unwrap_err();
    assert_eq!(err.code(), "missing_field");

    let err = service
        .create_from_payload(&json!({ "value": ["not", "a", "string"] }))
        .unwrap_err();
    assert_eq!(err.code(), "invalid_type");

    let record = service
        .create_from_payload(&json!({ "value": "from payload" }))
        .unwrap();
    assert_eq!(record.value, "from payload");
}

#[test]
fn service_read_path_reports_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = RecordService::new(SqliteRecordRepository::new(&conn));

    let err = service.get("never stored").unwrap_err();
    assert_eq!(err.code(), "not_found");

    service.create("stored once").unwrap();
    let record = service.get("stored once").unwrap();
    assert_eq!(record.value, "stored once");

    service.delete("stored once").unwrap();
    let err = service.delete("stored once").unwrap_err();
    assert_eq!(err.code(), "not_found");
}

#[test]
fn stored_record_matches_reanalysis() {
    let conn = open_db_in_memory().unwrap();
    let service = RecordService::new(SqliteRecordRepository::new(&conn));

    let stored = service.create("No drift allowed").unwrap();
    let recomputed = analyze("No drift allowed");

    assert_eq!(stored.id, recomputed.sha256_hash);
    assert_eq!(stored.length, recomputed.length);
    assert_eq!(stored.is_palindrome, recomputed.is_palindrome);
    assert_eq!(stored.unique_characters, recomputed.unique_characters);
    assert_eq!(stored.word_count, recomputed.word_count);
    assert_eq!(
        stored.character_frequency_map,
        recomputed.character_frequency_map
    );
}
