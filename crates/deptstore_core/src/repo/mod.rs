//! Repository layer for the `departments` table.
//!
//! # Responsibility
//! - Define the row-level data access contract used by the store.
//! - Isolate SQLite statements from identity-map bookkeeping.
//!
//! # Invariants
//! - Each repository call issues exactly one parameterized statement.
//! - Database errors are propagated unchanged; nothing is retried.

pub mod department_repo;
