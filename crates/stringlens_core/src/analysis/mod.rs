//! Pure string analysis.
//!
//! # Responsibility
//! - Compute every derived property of an input string in one pass set.
//! - Produce the canonical content hash used as record identity.
//!
//! # Invariants
//! - `analyze` is pure: identical input yields bit-identical output.
//! - The hash is SHA-256 over the UTF-8 bytes of the input, lowercase hex.
//! - Character counting is codepoint-based and case-sensitive except for the
//!   palindrome check, which case-folds first and strips nothing.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Derived properties of a single analyzed string.
///
/// This is the full analyzer output; record identity (`sha256_hash`) is part
/// of it so the same value can never map to two identities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringProperties {
    /// Number of codepoints in the input.
    pub length: u32,
    /// Whether the case-folded input equals its own reverse.
    pub is_palindrome: bool,
    /// Number of distinct codepoints, case-sensitive.
    pub unique_characters: u32,
    /// Number of whitespace-delimited tokens.
    pub word_count: u32,
    /// SHA-256 of the UTF-8 encoding, lowercase hex (64 chars).
    pub sha256_hash: String,
    /// Occurrences per distinct codepoint, case-sensitive, whitespace and
    /// punctuation included.
    pub character_frequency_map: BTreeMap<char, u32>,
}

/// Analyzes a string and returns its full derived property set.
///
/// Total over all string input; the caller enforces any length ceiling
/// before calling. Whitespace-only and empty inputs are valid (an empty
/// string is a palindrome with zero words).
pub fn analyze(value: &str) -> StringProperties {
    let mut character_frequency_map: BTreeMap<char, u32> = BTreeMap::new();
    let mut length: u32 = 0;
    for ch in value.chars() {
        *character_frequency_map.entry(ch).or_insert(0) += 1;
        length += 1;
    }

    let folded: Vec<char> = value.to_lowercase().chars().collect();
    let is_palindrome = folded.iter().eq(folded.iter().rev());

    let unique_characters = character_frequency_map.len() as u32;
    let word_count = value.split_whitespace().count() as u32;
    let sha256_hash = hex::encode(Sha256::digest(value.as_bytes()));

    StringProperties {
        length,
        is_palindrome,
        unique_characters,
        word_count,
        sha256_hash,
        character_frequency_map,
    }
}
