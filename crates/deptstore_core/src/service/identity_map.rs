//! Identity map for materialized departments.
//!
//! # Invariants
//! - At most one handle is registered per id.
//! - The map holds strong handles; entries leave only through `evict`.

use crate::model::department::{DepartmentId, DepartmentRef};
use std::collections::HashMap;
use std::rc::Rc;

/// Store-owned cache from primary key to the live in-memory instance.
#[derive(Debug, Default)]
pub struct IdentityMap {
    entries: HashMap<DepartmentId, DepartmentRef>,
}

impl IdentityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a clone of the registered handle for `id`, if any.
    pub fn get(&self, id: DepartmentId) -> Option<DepartmentRef> {
        self.entries.get(&id).map(Rc::clone)
    }

    /// Registers `department` under `id`, replacing any previous handle.
    pub fn register(&mut self, id: DepartmentId, department: DepartmentRef) {
        self.entries.insert(id, department);
    }

    /// Removes and returns the handle registered under `id`.
    pub fn evict(&mut self, id: DepartmentId) -> Option<DepartmentRef> {
        self.entries.remove(&id)
    }

    pub fn contains(&self, id: DepartmentId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
