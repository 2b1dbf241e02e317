//! Core domain logic for the string analysis service.
//! This crate is the single source of truth for business invariants.

pub mod analysis;
pub mod db;
pub mod filter;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;

pub use analysis::{analyze, StringProperties};
pub use filter::{FilterError, FilterIntent, FilterKey, FilterResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::record::AnalyzedRecord;
pub use query::{interpret, InterpretedQuery, QueryError, QueryResult};
pub use repo::record_repo::{
    RecordRepository, RepoError, RepoResult, SqliteRecordRepository,
};
pub use service::record_service::{
    ListOutcome, QueryOutcome, RecordService, ServiceError, ServiceResult,
};
pub use service::write_request::{extract_value, WriteRequestError, MAX_VALUE_CHARS};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
