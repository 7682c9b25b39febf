//! Outbound adapters implementing the driven domain ports.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel
//! - **memory**: a single in-process store used when no database is
//!   configured, and by tests
//!
//! Adapters convert between domain types and storage representations. Text
//! length is re-checked at the storage boundary; no other business rule
//! lives here.

pub mod memory;
pub mod persistence;
