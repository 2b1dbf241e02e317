use stringlens_core::db::open_db_in_memory;
use stringlens_core::{FilterIntent, RecordService, SqliteRecordRepository};

fn seeded_service(conn: &rusqlite::Connection) -> RecordService<SqliteRecordRepository<'_>> {
    let service = RecordService::new(SqliteRecordRepository::new(conn));
    // lengths 3, 5, 10; one palindrome; one single word
    service.create("abc").unwrap();
    service.create("civic").unwrap();
    service.create("hello you!").unwrap();
    service
}

#[test]
fn unfiltered_list_returns_everything_with_empty_echo() {
    let conn = open_db_in_memory().unwrap();
    let service = seeded_service(&conn);

    let outcome = service.list(&FilterIntent::default()).unwrap();
    assert_eq!(outcome.count, 3);
    assert_eq!(outcome.records.len(), 3);
    assert!(outcome.filters_applied.is_empty());
}

#[test]
fn length_range_filters_compose_with_and() {
    let conn = open_db_in_memory().unwrap();
    let service = seeded_service(&conn);

    let outcome = service
        .list_from_pairs([("min_length", "4"), ("max_length", "8")])
        .unwrap();
    assert_eq!(outcome.count, 1);
    assert_eq!(outcome.records[0].value, "civic");
    assert_eq!(outcome.filters_applied.get("min_length").unwrap(), "4");
    assert_eq!(outcome.filters_applied.get("max_length").unwrap(), "8");
}

#[test]
fn palindrome_and_word_count_filters_match_exactly() {
    let conn = open_db_in_memory().unwrap();
    let service = seeded_service(&conn);

    let outcome = service
        .list_from_pairs([("is_palindrome", "true")])
        .unwrap();
    assert_eq!(outcome.count, 1);
    assert_eq!(outcome.records[0].value, "civic");

    let outcome = service.list_from_pairs([("word_count", "2")]).unwrap();
    assert_eq!(outcome.count, 1);
    assert_eq!(outcome.records[0].value, "hello you!");
}

#[test]
fn contains_character_matches_case_insensitively() {
    let conn = open_db_in_memory().unwrap();
    let service = RecordService::new(SqliteRecordRepository::new(&conn));
    service.create("Zebra crossing").unwrap();
    service.create("no match here").unwrap();

    let outcome = service
        .list_from_pairs([("contains_character", "z")])
        .unwrap();
    assert_eq!(outcome.count, 1);
    assert_eq!(outcome.records[0].value, "Zebra crossing");
}

#[test]
fn unknown_filter_keys_are_ignored_not_echoed() {
    let conn = open_db_in_memory().unwrap();
    let service = seeded_service(&conn);

    let outcome = service
        .list_from_pairs([("ordering", "desc"), ("min_length", "1")])
        .unwrap();
    assert_eq!(outcome.count, 3);
    assert_eq!(outcome.filters_applied.len(), 1);
    assert!(outcome.filters_applied.contains_key("min_length"));
}

#[test]
fn invalid_filter_value_fails_instead_of_being_dropped() {
    let conn = open_db_in_memory().unwrap();
    let service = seeded_service(&conn);

    let err = service
        .list_from_pairs([("word_count", "several")])
        .unwrap_err();
    assert_eq!(err.code(), "invalid_filter_value");
}
