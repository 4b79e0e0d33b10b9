//! Core persistence for department records.
//! This crate owns the `departments` table contract and the identity map
//! that keeps one in-memory instance per persisted row.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::department::{Department, DepartmentId, DepartmentRef, DepartmentRow};
pub use repo::department_repo::{
    DepartmentRepository, RepoError, RepoResult, SqliteDepartmentRepository,
};
pub use service::department_store::DepartmentStore;
pub use service::identity_map::IdentityMap;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
