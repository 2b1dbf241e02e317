//! Record repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable store APIs over the canonical `analyzed_strings` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `insert_if_absent` never overwrites: the first writer of a value wins
//!   and later writers observe the pre-existing row.
//! - Rows read back must pass the record consistency check.

use crate::analysis::StringProperties;
use crate::db::DbError;
use crate::model::record::AnalyzedRecord;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

const RECORD_SELECT_SQL: &str = "SELECT
    id,
    value,
    length,
    is_palindrome,
    unique_characters,
    word_count,
    character_frequency_map,
    created_at
FROM analyzed_strings";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for record persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// No record stored for this value.
    NotFound(String),
    /// Persisted row violates a record invariant.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(value) => write!(f, "no record stored for value `{value}`"),
            Self::InvalidData(message) => write!(f, "invalid persisted record: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage contract for analyzed string records.
///
/// The services never assume a particular storage engine; anything that can
/// honor conditional insert and exact-value lookup can back them.
pub trait RecordRepository {
    /// Inserts a record for `value` unless one already exists.
    ///
    /// Returns the stored record and whether this call inserted it. When the
    /// value was already present the existing record is returned unchanged
    /// and the supplied properties are discarded.
    fn insert_if_absent(
        &self,
        value: &str,
        properties: &StringProperties,
    ) -> RepoResult<(AnalyzedRecord, bool)>;

    /// Looks up a record by its exact original value.
    fn find_by_value(&self, value: &str) -> RepoResult<Option<AnalyzedRecord>>;

    /// Permanently removes the record for `value`.
    ///
    /// Returns `NotFound` when no record matched; deletion is otherwise
    /// unconditional and irreversible.
    fn delete_by_value(&self, value: &str) -> RepoResult<()>;

    /// Lists all records in deterministic order (`created_at`, then `id`).
    fn list_records(&self) -> RepoResult<Vec<AnalyzedRecord>>;
}

/// SQLite-backed record repository.
pub struct SqliteRecordRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRecordRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl RecordRepository for SqliteRecordRepository<'_> {
    fn insert_if_absent(
        &self,
        value: &str,
        properties: &StringProperties,
    ) -> RepoResult<(AnalyzedRecord, bool)> {
        let frequency_json = encode_frequency_map(&properties.character_frequency_map)?;

        let changed = self.conn.execute(
            "INSERT INTO analyzed_strings (
                id,
                value,
                length,
                is_palindrome,
                unique_characters,
                word_count,
                character_frequency_map
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT (value) DO NOTHING;",
            params![
                properties.sha256_hash.as_str(),
                value,
                i64::from(properties.length),
                bool_to_int(properties.is_palindrome),
                i64::from(properties.unique_characters),
                i64::from(properties.word_count),
                frequency_json,
            ],
        )?;

        // Read back either way: the insert path needs the SQL-assigned
        // `created_at`, the conflict path needs the retained original row.
        let stored = self.find_by_value(value)?.ok_or_else(|| {
            RepoError::InvalidData(format!(
                "value `{value}` absent immediately after conditional insert"
            ))
        })?;

        Ok((stored, changed == 1))
    }

    fn find_by_value(&self, value: &str) -> RepoResult<Option<AnalyzedRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{RECORD_SELECT_SQL} WHERE value = ?1;"))?;

        stmt.query_row([value], |row| Ok(parse_record_row(row)))
            .optional()?
            .transpose()
    }

    fn delete_by_value(&self, value: &str) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM analyzed_strings WHERE value = ?1;", [value])?;

        if changed == 0 {
            return Err(RepoError::NotFound(value.to_string()));
        }

        Ok(())
    }

    fn list_records(&self) -> RepoResult<Vec<AnalyzedRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{RECORD_SELECT_SQL} ORDER BY created_at ASC, id ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(parse_record_row(row)?);
        }

        Ok(records)
    }
}

fn parse_record_row(row: &Row<'_>) -> RepoResult<AnalyzedRecord> {
    let frequency_text: String = row.get("character_frequency_map")?;
    let character_frequency_map: BTreeMap<char, u32> = serde_json::from_str(&frequency_text)
        .map_err(|err| {
            RepoError::InvalidData(format!("undecodable character_frequency_map: {err}"))
        })?;

    let is_palindrome = match row.get::<_, i64>("is_palindrome")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_palindrome value `{other}`"
            )));
        }
    };

    let record = AnalyzedRecord {
        id: row.get("id")?,
        value: row.get("value")?,
        length: row.get("length")?,
        is_palindrome,
        unique_characters: row.get("unique_characters")?,
        word_count: row.get("word_count")?,
        character_frequency_map,
        created_at: row.get("created_at")?,
    };

    record.check_consistency().map_err(RepoError::InvalidData)?;
    Ok(record)
}

fn encode_frequency_map(map: &BTreeMap<char, u32>) -> RepoResult<String> {
    serde_json::to_string(map).map_err(|err| {
        RepoError::InvalidData(format!("unencodable character_frequency_map: {err}"))
    })
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
