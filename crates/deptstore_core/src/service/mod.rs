//! Record store services.
//!
//! # Responsibility
//! - Orchestrate repository calls into the department record lifecycle.
//! - Own the identity map so each store starts from an empty cache.

pub mod department_store;
pub mod identity_map;
