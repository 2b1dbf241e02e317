//! Domain model for analyzed string records.
//!
//! # Responsibility
//! - Define the canonical record shape shared by storage and services.
//!
//! # Invariants
//! - `id` is a pure function of `value` (the SHA-256 content hash).
//! - Records are immutable after creation; deletion is the only mutation.

pub mod record;
