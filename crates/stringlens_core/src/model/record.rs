//! Analyzed record domain model.
//!
//! # Responsibility
//! - Define the canonical persisted record for one analyzed string.
//! - Provide the cheap internal-consistency check used on rows read back
//!   from storage.
//!
//! # Invariants
//! - `id == properties derived from value` at all times (no drift); two
//!   records can never share a `value`.
//! - `created_at` is set once on first insert and never mutated.

use crate::analysis::StringProperties;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One stored analyzed string with all derived properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzedRecord {
    /// SHA-256 content hash of `value`, lowercase hex. Unique identity.
    pub id: String,
    /// Original input string, unique across all records.
    pub value: String,
    /// Codepoint count of `value`.
    pub length: u32,
    /// Case-folded palindrome flag (no whitespace stripping).
    pub is_palindrome: bool,
    /// Distinct codepoints, case-sensitive.
    pub unique_characters: u32,
    /// Whitespace-delimited token count.
    pub word_count: u32,
    /// Occurrences per distinct codepoint.
    pub character_frequency_map: BTreeMap<char, u32>,
    /// Unix epoch milliseconds of first analysis.
    pub created_at: i64,
}

impl AnalyzedRecord {
    /// Assembles a record from analyzer output.
    ///
    /// `created_at` comes from the storage layer (set on first insert), so
    /// re-reading a record never shifts its timestamp.
    pub fn from_properties(
        value: impl Into<String>,
        properties: StringProperties,
        created_at: i64,
    ) -> Self {
        Self {
            id: properties.sha256_hash,
            value: value.into(),
            length: properties.length,
            is_palindrome: properties.is_palindrome,
            unique_characters: properties.unique_characters,
            word_count: properties.word_count,
            character_frequency_map: properties.character_frequency_map,
            created_at,
        }
    }

    /// Checks the arithmetic invariants that tie the frequency map to the
    /// scalar counters.
    ///
    /// Read paths reject rows that fail this instead of masking corrupt
    /// persisted state.
    pub fn check_consistency(&self) -> Result<(), String> {
        let frequency_total: u64 = self
            .character_frequency_map
            .values()
            .map(|count| u64::from(*count))
            .sum();
        if frequency_total != u64::from(self.length) {
            return Err(format!(
                "frequency map totals {frequency_total} but length is {}",
                self.length
            ));
        }

        let distinct = self.character_frequency_map.len();
        if distinct != self.unique_characters as usize {
            return Err(format!(
                "frequency map has {distinct} keys but unique_characters is {}",
                self.unique_characters
            ));
        }

        Ok(())
    }
}
