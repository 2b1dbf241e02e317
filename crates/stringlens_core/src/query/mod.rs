//! Natural-language query interpretation.
//!
//! # Responsibility
//! - Map a free-text query onto a structured [`FilterIntent`] using a fixed
//!   table of keyword/regex rules.
//! - Keep the original query alongside the derived intent for transparency.
//!
//! # Invariants
//! - Rules are evaluated independently over the case-folded query; every
//!   rule that matches contributes to the intent.
//! - A blank query and an unmatched query are distinct error conditions.
//!
//! This is deliberately not language understanding. The vocabulary is small
//! and fixed, and the mapping is deterministic.

use crate::filter::FilterIntent;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

static LONGER_THAN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"longer than (\d+)").expect("valid longer-than regex"));
static CONTAINS_LETTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"contain(?:ing|s) the letter ([a-z])").expect("valid letter regex"));

/// Result type for query interpretation.
pub type QueryResult<T> = Result<T, QueryError>;

/// Error for the natural-language path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The query parameter was absent or blank.
    MissingQuery,
    /// No rule in the vocabulary matched the query.
    Unparsable(String),
}

impl Display for QueryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingQuery => write!(f, "query parameter is required"),
            Self::Unparsable(query) => {
                write!(f, "unable to parse natural language query `{query}`")
            }
        }
    }
}

impl Error for QueryError {}

/// A successfully interpreted query: the case-folded original plus the
/// structured intent derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterpretedQuery {
    /// Case-folded query text the rules ran against.
    pub original: String,
    /// Structured filters derived from the query.
    pub parsed_filters: FilterIntent,
}

/// Interprets a free-text query into a structured filter intent.
///
/// Rule vocabulary, applied independently:
/// - "palindrome"/"palindromic" => `is_palindrome = true`
/// - "single word" => `word_count = 1`
/// - "longer than N" => `min_length = N + 1` (strictly-greater expressed as
///   a minimum)
/// - "contains/containing the letter c" => `contains_character = c`
/// - "first vowel" => `contains_character = 'a'`; the source system ships
///   this fixed substitution rather than computing any actual first vowel,
///   and the behavior is kept verbatim
pub fn interpret(raw_query: &str) -> QueryResult<InterpretedQuery> {
    let query = raw_query.trim().to_lowercase();
    if query.is_empty() {
        return Err(QueryError::MissingQuery);
    }

    let mut intent = FilterIntent::default();

    if query.contains("palindromic") || query.contains("palindrome") {
        intent.is_palindrome = Some(true);
    }

    if query.contains("single word") {
        intent.word_count = Some(1);
    }

    if let Some(captures) = LONGER_THAN_RE.captures(&query) {
        // Numbers too large for u32 leave the rule unmatched.
        if let Ok(threshold) = captures[1].parse::<u32>() {
            intent.min_length = Some(threshold.saturating_add(1));
        }
    }

    if let Some(captures) = CONTAINS_LETTER_RE.captures(&query) {
        intent.contains_character = captures[1].chars().next();
    }

    if query.contains("first vowel") {
        intent.contains_character = Some('a');
    }

    if intent.is_empty() {
        return Err(QueryError::Unparsable(query));
    }

    Ok(InterpretedQuery {
        original: query,
        parsed_filters: intent,
    })
}
