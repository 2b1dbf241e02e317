//! Structured filter translation.
//!
//! # Responsibility
//! - Define the closed set of recognized filter keys.
//! - Translate string key/value pairs into a typed, AND-composed predicate
//!   over [`AnalyzedRecord`].
//!
//! # Invariants
//! - Unrecognized keys are ignored; recognized keys with bad values fail
//!   loudly instead of being dropped.
//! - The key enumeration is the single source of truth for both predicate
//!   evaluation and the `filters_applied` echo in responses.

use crate::model::record::AnalyzedRecord;
use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type for filter translation.
pub type FilterResult<T> = Result<T, FilterError>;

/// Error for filter translation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// A recognized key carried a value that does not coerce to its type.
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl Display for FilterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue {
                key,
                value,
                expected,
            } => write!(
                f,
                "invalid value `{value}` for filter `{key}`: expected {expected}"
            ),
        }
    }
}

impl Error for FilterError {}

/// Closed enumeration of recognized filter keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKey {
    IsPalindrome,
    WordCount,
    MinLength,
    MaxLength,
    ContainsCharacter,
}

impl FilterKey {
    /// Every recognized key, in stable order.
    pub const ALL: [FilterKey; 5] = [
        FilterKey::IsPalindrome,
        FilterKey::WordCount,
        FilterKey::MinLength,
        FilterKey::MaxLength,
        FilterKey::ContainsCharacter,
    ];

    /// Wire name of this key.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::IsPalindrome => "is_palindrome",
            Self::WordCount => "word_count",
            Self::MinLength => "min_length",
            Self::MaxLength => "max_length",
            Self::ContainsCharacter => "contains_character",
        }
    }

    /// Resolves a wire name; `None` for anything outside the closed set.
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "is_palindrome" => Some(Self::IsPalindrome),
            "word_count" => Some(Self::WordCount),
            "min_length" => Some(Self::MinLength),
            "max_length" => Some(Self::MaxLength),
            "contains_character" => Some(Self::ContainsCharacter),
            _ => None,
        }
    }
}

/// Typed filter intent; `None` fields do not constrain.
///
/// Serializes with unset keys omitted, which makes it directly usable as the
/// `parsed_filters` transparency block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterIntent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_palindrome: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contains_character: Option<char>,
}

impl FilterIntent {
    /// Translates string key/value pairs into a typed intent.
    ///
    /// Unrecognized keys are skipped. A later pair for the same key
    /// overwrites an earlier one.
    pub fn from_pairs<'a, I>(pairs: I) -> FilterResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut intent = Self::default();
        for (raw_key, raw_value) in pairs {
            let Some(key) = FilterKey::parse(raw_key) else {
                continue;
            };
            intent.set(key, raw_value)?;
        }
        Ok(intent)
    }

    /// Coerces and assigns one recognized key.
    pub fn set(&mut self, key: FilterKey, raw_value: &str) -> FilterResult<()> {
        match key {
            FilterKey::IsPalindrome => {
                self.is_palindrome = Some(coerce_bool(key, raw_value)?);
            }
            FilterKey::WordCount => {
                self.word_count = Some(coerce_count(key, raw_value)?);
            }
            FilterKey::MinLength => {
                self.min_length = Some(coerce_count(key, raw_value)?);
            }
            FilterKey::MaxLength => {
                self.max_length = Some(coerce_count(key, raw_value)?);
            }
            FilterKey::ContainsCharacter => {
                self.contains_character = Some(coerce_char(key, raw_value)?);
            }
        }
        Ok(())
    }

    /// True when no key constrains the result set.
    pub fn is_empty(&self) -> bool {
        self.is_palindrome.is_none()
            && self.word_count.is_none()
            && self.min_length.is_none()
            && self.max_length.is_none()
            && self.contains_character.is_none()
    }

    /// AND-composed predicate over one record.
    pub fn matches(&self, record: &AnalyzedRecord) -> bool {
        if let Some(want) = self.is_palindrome {
            if record.is_palindrome != want {
                return false;
            }
        }
        if let Some(want) = self.word_count {
            if record.word_count != want {
                return false;
            }
        }
        if let Some(min) = self.min_length {
            if record.length < min {
                return false;
            }
        }
        if let Some(max) = self.max_length {
            if record.length > max {
                return false;
            }
        }
        if let Some(ch) = self.contains_character {
            if !value_contains_char_case_insensitive(&record.value, ch) {
                return false;
            }
        }
        true
    }

    /// Recognized filters actually applied, keyed by wire name.
    ///
    /// Used verbatim as the `filters_applied` / `parsed_filters` echo.
    pub fn echo(&self) -> BTreeMap<&'static str, String> {
        let mut applied = BTreeMap::new();
        if let Some(value) = self.is_palindrome {
            applied.insert(FilterKey::IsPalindrome.as_str(), value.to_string());
        }
        if let Some(value) = self.word_count {
            applied.insert(FilterKey::WordCount.as_str(), value.to_string());
        }
        if let Some(value) = self.min_length {
            applied.insert(FilterKey::MinLength.as_str(), value.to_string());
        }
        if let Some(value) = self.max_length {
            applied.insert(FilterKey::MaxLength.as_str(), value.to_string());
        }
        if let Some(value) = self.contains_character {
            applied.insert(FilterKey::ContainsCharacter.as_str(), value.to_string());
        }
        applied
    }
}

fn value_contains_char_case_insensitive(value: &str, ch: char) -> bool {
    let needle = ch.to_lowercase().collect::<String>();
    value.to_lowercase().contains(&needle)
}

fn coerce_bool(key: FilterKey, raw: &str) -> FilterResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(FilterError::InvalidValue {
            key: key.as_str(),
            value: raw.to_string(),
            expected: "a boolean",
        }),
    }
}

fn coerce_count(key: FilterKey, raw: &str) -> FilterResult<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| FilterError::InvalidValue {
            key: key.as_str(),
            value: raw.to_string(),
            expected: "a non-negative integer",
        })
}

fn coerce_char(key: FilterKey, raw: &str) -> FilterResult<char> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch),
        _ => Err(FilterError::InvalidValue {
            key: key.as_str(),
            value: raw.to_string(),
            expected: "a single character",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{FilterError, FilterIntent, FilterKey};

    #[test]
    fn unrecognized_keys_are_ignored() {
        let intent =
            FilterIntent::from_pairs([("sort_by", "length"), ("min_length", "3")]).unwrap();
        assert_eq!(intent.min_length, Some(3));
        assert_eq!(intent.echo().len(), 1);
    }

    #[test]
    fn bad_value_for_recognized_key_fails_loudly() {
        let err = FilterIntent::from_pairs([("word_count", "many")]).unwrap_err();
        assert!(matches!(
            err,
            FilterError::InvalidValue { key: "word_count", .. }
        ));
    }

    #[test]
    fn contains_character_requires_a_single_character() {
        assert!(FilterIntent::from_pairs([("contains_character", "ab")]).is_err());
        assert!(FilterIntent::from_pairs([("contains_character", "")]).is_err());
        let intent = FilterIntent::from_pairs([("contains_character", "z")]).unwrap();
        assert_eq!(intent.contains_character, Some('z'));
    }

    #[test]
    fn key_enumeration_round_trips() {
        for key in FilterKey::ALL {
            assert_eq!(FilterKey::parse(key.as_str()), Some(key));
        }
        assert_eq!(FilterKey::parse("length"), None);
    }
}
