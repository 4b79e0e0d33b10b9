//! Department domain model.
//!
//! # Responsibility
//! - Define the record mapped onto the `departments` table.
//! - Provide the shared handle type that carries object identity.
//!
//! # Invariants
//! - `id` is `None` for transient instances and a positive rowid once saved.
//! - `name`/`location` mirror nullable `TEXT` columns; `None` is SQL `NULL`.
//! - Two handles denote the same instance iff `Rc::ptr_eq` holds.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

/// Primary key of a persisted department (SQLite rowid).
pub type DepartmentId = i64;

/// Shared, mutable handle to a department instance.
///
/// The identity map hands out clones of this handle, so every lookup of the
/// same row yields the same allocation.
pub type DepartmentRef = Rc<RefCell<Department>>;

/// A department record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Database-generated key; unset until saved.
    pub id: Option<DepartmentId>,
    pub name: Option<String>,
    pub location: Option<String>,
}

impl Department {
    /// Creates a transient department with no id.
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
            location: Some(location.into()),
        }
    }

    /// Wraps this department into a shared handle.
    pub fn into_ref(self) -> DepartmentRef {
        Rc::new(RefCell::new(self))
    }

    /// Returns whether this instance is backed by a table row.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

impl Display for Department {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = self.name.as_deref().unwrap_or("None");
        let location = self.location.as_deref().unwrap_or("None");
        match self.id {
            Some(id) => write!(f, "<Department {id}: {name}, {location}>"),
            None => write!(f, "<Department unsaved: {name}, {location}>"),
        }
    }
}

/// Raw `departments` row as read from SQLite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentRow {
    pub id: DepartmentId,
    pub name: Option<String>,
    pub location: Option<String>,
}
