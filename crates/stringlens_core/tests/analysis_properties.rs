use stringlens_core::analyze;

#[test]
fn analysis_is_deterministic_including_hash() {
    let first = analyze("Was it a car or a cat I saw?");
    let second = analyze("Was it a car or a cat I saw?");
    assert_eq!(first, second);
    assert_eq!(first.sha256_hash, second.sha256_hash);
}

#[test]
fn distinct_values_get_distinct_identities() {
    assert_ne!(analyze("hello").sha256_hash, analyze("hello ").sha256_hash);
    assert_ne!(analyze("Aa").sha256_hash, analyze("aA").sha256_hash);
}

#[test]
fn palindrome_is_case_folded_but_not_stripped() {
    assert!(analyze("Racecar").is_palindrome);
    assert!(!analyze("Race car").is_palindrome);
    assert!(analyze("").is_palindrome);
    // Literal symmetry including the space.
    assert!(analyze("a b a").is_palindrome);
    assert!(!analyze("A man a plan").is_palindrome);
}

#[test]
fn word_count_collapses_surrounding_and_repeated_whitespace() {
    assert_eq!(analyze("  hello   world  ").word_count, 2);
    assert_eq!(analyze("").word_count, 0);
    assert_eq!(analyze("   \t\n ").word_count, 0);
    assert_eq!(analyze("one").word_count, 1);
}

#[test]
fn unique_characters_are_case_sensitive() {
    assert_eq!(analyze("Aa").unique_characters, 2);
    assert_eq!(analyze("aaa").unique_characters, 1);
}

#[test]
fn frequency_map_ties_back_to_length_and_unique_count() {
    let props = analyze("hello world");
    let total: u32 = props.character_frequency_map.values().sum();
    assert_eq!(total, props.length);
    assert_eq!(
        props.character_frequency_map.len() as u32,
        props.unique_characters
    );
    assert_eq!(props.character_frequency_map[&'l'], 3);
    assert_eq!(props.character_frequency_map[&' '], 1);
}

#[test]
fn length_counts_codepoints_not_bytes() {
    let props = analyze("héllo");
    assert_eq!(props.length, 5);
    assert_eq!(props.character_frequency_map[&'é'], 1);
}
