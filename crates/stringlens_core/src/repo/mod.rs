//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the record-store contract the services depend on.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Insert is a single conditional operation; the store, not the caller,
//!   resolves a race between two writes of the same value.
//! - Read paths reject invalid persisted state instead of masking it.

pub mod record_repo;
