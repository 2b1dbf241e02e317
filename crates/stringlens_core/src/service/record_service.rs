//! Record use-case service.
//!
//! # Responsibility
//! - Provide the boundary operations over analyzed strings: write, read,
//!   delete, filtered listing and natural-language listing.
//! - Map lower-layer failures onto the stable outward error taxonomy.
//!
//! # Invariants
//! - A duplicate write leaves the original record untouched and discards
//!   the new computation.
//! - Storage failures surface as a generic internal condition; detail goes
//!   to the log, never to the caller.

use crate::analysis::analyze;
use crate::filter::{FilterError, FilterIntent};
use crate::model::record::AnalyzedRecord;
use crate::query::{interpret, InterpretedQuery, QueryError};
use crate::repo::record_repo::{RecordRepository, RepoError};
use crate::service::write_request::{extract_value, WriteRequestError};
use log::{error, info, warn};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Boundary-level error taxonomy.
///
/// Each variant has a distinct, stable machine code (see [`ServiceError::code`])
/// so transports can map conditions without string matching.
#[derive(Debug)]
pub enum ServiceError {
    /// Write payload failed validation (missing field, wrong type, too long).
    Request(WriteRequestError),
    /// A record with this exact value already exists.
    DuplicateValue { id: String },
    /// Lookup or delete matched no record.
    NotFound(String),
    /// A filter value failed type coercion.
    Filter(FilterError),
    /// Natural-language query was missing or unparsable.
    Query(QueryError),
    /// Unexpected storage or computation failure. Outward message stays
    /// generic; the cause is retained for logs only.
    Internal(RepoError),
}

impl ServiceError {
    /// Stable machine-readable condition code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Request(WriteRequestError::MissingField) => "missing_field",
            Self::Request(WriteRequestError::InvalidType) => "invalid_type",
            Self::Request(WriteRequestError::ValueTooLong { .. }) => "value_too_long",
            Self::DuplicateValue { .. } => "duplicate_value",
            Self::NotFound(_) => "not_found",
            Self::Filter(_) => "invalid_filter_value",
            Self::Query(QueryError::MissingQuery) => "missing_query",
            Self::Query(QueryError::Unparsable(_)) => "unparsable_query",
            Self::Internal(_) => "internal_error",
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Request(err) => write!(f, "{err}"),
            Self::DuplicateValue { .. } => {
                write!(f, "string already exists in the system")
            }
            Self::NotFound(value) => write!(f, "no analyzed string found for `{value}`"),
            Self::Filter(err) => write!(f, "{err}"),
            Self::Query(err) => write!(f, "{err}"),
            // Internal detail is deliberately not echoed to callers.
            Self::Internal(_) => write!(f, "an internal error occurred"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Request(err) => Some(err),
            Self::Filter(err) => Some(err),
            Self::Query(err) => Some(err),
            Self::Internal(err) => Some(err),
            Self::DuplicateValue { .. } | Self::NotFound(_) => None,
        }
    }
}

impl From<WriteRequestError> for ServiceError {
    fn from(value: WriteRequestError) -> Self {
        Self::Request(value)
    }
}

impl From<FilterError> for ServiceError {
    fn from(value: FilterError) -> Self {
        Self::Filter(value)
    }
}

impl From<QueryError> for ServiceError {
    fn from(value: QueryError) -> Self {
        Self::Query(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(missing) => Self::NotFound(missing),
            other => Self::Internal(other),
        }
    }
}

/// Response envelope for the filtered list operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOutcome {
    /// Matching records in deterministic store order.
    pub records: Vec<AnalyzedRecord>,
    /// Number of matching records.
    pub count: usize,
    /// Recognized filters actually applied, keyed by wire name.
    pub filters_applied: BTreeMap<&'static str, String>,
}

/// Response envelope for the natural-language operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOutcome {
    /// Matching records in deterministic store order.
    pub records: Vec<AnalyzedRecord>,
    /// Number of matching records.
    pub count: usize,
    /// Transparency block: original query plus derived filters.
    pub interpreted: InterpretedQuery,
}

/// Use-case service over a record repository.
pub struct RecordService<R: RecordRepository> {
    repo: R,
}

impl<R: RecordRepository> RecordService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Write path: validates the payload, analyzes the string and stores it
    /// unless an identical value already exists.
    ///
    /// # Contract
    /// - The analyzer always succeeds; a duplicate is a post-computation
    ///   conflict, not an analysis failure.
    /// - On conflict the original record is retained unchanged.
    pub fn create_from_payload(
        &self,
        payload: &serde_json::Value,
    ) -> ServiceResult<AnalyzedRecord> {
        let value = extract_value(payload)?;
        self.create(value)
    }

    /// Write path for callers that already hold a validated string.
    pub fn create(&self, value: &str) -> ServiceResult<AnalyzedRecord> {
        let properties = analyze(value);
        let (record, inserted) = self.repo.insert_if_absent(value, &properties)?;

        if !inserted {
            warn!(
                "event=record_create module=service status=conflict id={}",
                record.id
            );
            return Err(ServiceError::DuplicateValue { id: record.id });
        }

        info!(
            "event=record_create module=service status=ok id={} length={} word_count={}",
            record.id, record.length, record.word_count
        );
        Ok(record)
    }

    /// Read path: exact-value lookup.
    pub fn get(&self, value: &str) -> ServiceResult<AnalyzedRecord> {
        self.repo
            .find_by_value(value)?
            .ok_or_else(|| ServiceError::NotFound(value.to_string()))
    }

    /// Delete path: permanent removal by exact value.
    pub fn delete(&self, value: &str) -> ServiceResult<()> {
        self.repo.delete_by_value(value)?;
        info!("event=record_delete module=service status=ok");
        Ok(())
    }

    /// List path: applies an already-translated filter intent.
    pub fn list(&self, intent: &FilterIntent) -> ServiceResult<ListOutcome> {
        let records = self.filtered_records(intent)?;
        let count = records.len();

        info!(
            "event=record_list module=service status=ok count={count} filters={}",
            intent.echo().len()
        );
        Ok(ListOutcome {
            records,
            count,
            filters_applied: intent.echo(),
        })
    }

    /// List path convenience: translates raw key/value pairs first.
    ///
    /// Unrecognized keys are ignored by translation; a recognized key with a
    /// bad value fails the whole request.
    pub fn list_from_pairs<'a, I>(&self, pairs: I) -> ServiceResult<ListOutcome>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let intent = FilterIntent::from_pairs(pairs)?;
        self.list(&intent)
    }

    /// Natural-language path: interprets the query, then lists by the
    /// derived intent, echoing both for transparency.
    pub fn query(&self, raw_query: &str) -> ServiceResult<QueryOutcome> {
        let interpreted = interpret(raw_query)?;
        let records = self.filtered_records(&interpreted.parsed_filters)?;
        let count = records.len();

        info!(
            "event=record_query module=service status=ok count={count} filters={}",
            interpreted.parsed_filters.echo().len()
        );
        Ok(QueryOutcome {
            records,
            count,
            interpreted,
        })
    }

    fn filtered_records(&self, intent: &FilterIntent) -> ServiceResult<Vec<AnalyzedRecord>> {
        let records = self.repo.list_records().map_err(|err| {
            error!(
                "event=record_list module=service status=error error_code=store_failed error={err}"
            );
            ServiceError::from(err)
        })?;

        Ok(records
            .into_iter()
            .filter(|record| intent.matches(record))
            .collect())
    }
}
