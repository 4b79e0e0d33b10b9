//! Department record store.
//!
//! # Responsibility
//! - Map department instances onto `departments` rows (save, update, delete,
//!   lookups) through a `DepartmentRepository`.
//! - Keep the identity map consistent with every lookup and mutation.
//!
//! # Invariants
//! - Every handle returned by a lookup is the one registered in the
//!   identity map for that id.
//! - `save` registers the instance; `delete` evicts it and clears its id.
//! - Zero-row updates/deletes (stale ids) succeed without error.
//!
//! # Panics
//! Operations borrow the passed handle mutably; holding a `RefCell` borrow
//! of the same department across a store call panics.

use crate::model::department::{Department, DepartmentId, DepartmentRef, DepartmentRow};
use crate::repo::department_repo::{
    DepartmentRepository, RepoError, RepoResult, SqliteDepartmentRepository,
};
use crate::service::identity_map::IdentityMap;
use log::{debug, warn};
use rusqlite::Connection;
use std::rc::Rc;

/// Active-record style store for departments with an identity map.
pub struct DepartmentStore<R: DepartmentRepository> {
    repo: R,
    identity_map: IdentityMap,
}

impl<'conn> DepartmentStore<SqliteDepartmentRepository<'conn>> {
    /// Creates a store over a borrowed SQLite connection.
    pub fn sqlite(conn: &'conn Connection) -> Self {
        Self::new(SqliteDepartmentRepository::new(conn))
    }
}

impl<R: DepartmentRepository> DepartmentStore<R> {
    /// Creates a store with an empty identity map.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            identity_map: IdentityMap::new(),
        }
    }

    /// Read-only view of the identity map.
    pub fn identity_map(&self) -> &IdentityMap {
        &self.identity_map
    }

    /// Ensures the `departments` table exists.
    pub fn create_table(&self) -> RepoResult<()> {
        self.repo.create_table()?;
        debug!("event=table_create module=store status=ok table=departments");
        Ok(())
    }

    /// Drops the `departments` table if present.
    ///
    /// The identity map is left untouched.
    pub fn drop_table(&self) -> RepoResult<()> {
        self.repo.drop_table()?;
        debug!("event=table_drop module=store status=ok table=departments");
        Ok(())
    }

    /// Inserts a transient department and registers it in the identity map.
    ///
    /// # Errors
    /// - `AlreadyPersisted` when the instance already has an id; no row is
    ///   written in that case.
    /// - `Db` when the insert fails; the instance stays transient.
    pub fn save(&mut self, department: &DepartmentRef) -> RepoResult<()> {
        let id = {
            let current = department.borrow();
            if let Some(id) = current.id {
                return Err(RepoError::AlreadyPersisted(id));
            }
            self.repo
                .insert(current.name.as_deref(), current.location.as_deref())?
        };

        department.borrow_mut().id = Some(id);
        self.identity_map.register(id, Rc::clone(department));
        debug!("event=department_save module=store status=ok id={id}");
        Ok(())
    }

    /// Builds a department from `name`/`location` and saves it.
    pub fn create(
        &mut self,
        name: impl Into<String>,
        location: impl Into<String>,
    ) -> RepoResult<DepartmentRef> {
        let department = Department::new(name, location).into_ref();
        self.save(&department)?;
        Ok(department)
    }

    /// Writes the instance's `name`/`location` to its row.
    ///
    /// A missing row is not an error: the statement simply affects nothing.
    pub fn update(&self, department: &DepartmentRef) -> RepoResult<()> {
        let row = {
            let current = department.borrow();
            let id = current.id.ok_or(RepoError::NotPersisted)?;
            DepartmentRow {
                id,
                name: current.name.clone(),
                location: current.location.clone(),
            }
        };

        let changed = self.repo.update(&row)?;
        if changed == 0 {
            warn!(
                "event=department_update module=store status=ok id={} rows_affected=0",
                row.id
            );
        } else {
            debug!("event=department_update module=store status=ok id={}", row.id);
        }
        Ok(())
    }

    /// Deletes the instance's row, evicts it and clears its id.
    ///
    /// # Errors
    /// - `NotPersisted` when the instance has no id.
    /// - `NotCached` when the id is absent from the identity map; the row is
    ///   left untouched in that case.
    pub fn delete(&mut self, department: &DepartmentRef) -> RepoResult<()> {
        let id = department.borrow().id.ok_or(RepoError::NotPersisted)?;
        if !self.identity_map.contains(id) {
            return Err(RepoError::NotCached(id));
        }

        let changed = self.repo.delete(id)?;
        if changed == 0 {
            warn!("event=department_delete module=store status=ok id={id} rows_affected=0");
        } else {
            debug!("event=department_delete module=store status=ok id={id}");
        }

        self.identity_map.evict(id);
        department.borrow_mut().id = None;
        Ok(())
    }

    /// Materializes a row through the identity map.
    ///
    /// A cached instance is refreshed in place and returned; otherwise a new
    /// instance is built and registered.
    pub fn instance_from_db(&mut self, row: DepartmentRow) -> DepartmentRef {
        if let Some(existing) = self.identity_map.get(row.id) {
            {
                let mut cached = existing.borrow_mut();
                cached.name = row.name;
                cached.location = row.location;
            }
            return existing;
        }

        let id = row.id;
        let department = Department {
            id: Some(id),
            name: row.name,
            location: row.location,
        }
        .into_ref();
        self.identity_map.register(id, Rc::clone(&department));
        department
    }

    /// Returns every row as a department, in storage order.
    pub fn get_all(&mut self) -> RepoResult<Vec<DepartmentRef>> {
        let rows = self.repo.select_all()?;
        Ok(rows
            .into_iter()
            .map(|row| self.instance_from_db(row))
            .collect())
    }

    /// Returns the department with `id`, or `None` when no row matches.
    pub fn find_by_id(&mut self, id: DepartmentId) -> RepoResult<Option<DepartmentRef>> {
        let row = self.repo.select_by_id(id)?;
        Ok(row.map(|row| self.instance_from_db(row)))
    }

    /// Returns the first department (storage order) with a matching name.
    ///
    /// Accepts `&str` or `None`; `None` finds a row whose name is `NULL`.
    pub fn find_by_name<'a>(
        &mut self,
        name: impl Into<Option<&'a str>>,
    ) -> RepoResult<Option<DepartmentRef>> {
        let row = self.repo.select_by_name(name.into())?;
        Ok(row.map(|row| self.instance_from_db(row)))
    }
}
