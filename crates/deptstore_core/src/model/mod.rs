//! Domain model for persisted department records.
//!
//! # Responsibility
//! - Define the department record and its raw row shape.
//! - Define the shared handle used to express object identity.
//!
//! # Invariants
//! - A department without an id has never been persisted (or was deleted).

pub mod department;
