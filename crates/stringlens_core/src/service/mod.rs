//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate analyzer, filter, interpreter and repository into the
//!   boundary-level operations (write, read, delete, list, NL query).
//! - Keep transport layers decoupled from storage details.

pub mod record_service;
pub mod write_request;
