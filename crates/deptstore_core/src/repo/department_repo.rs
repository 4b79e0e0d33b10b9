//! Department repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide table lifecycle and row-level CRUD over `departments`.
//! - Keep SQL text inside the persistence boundary.
//!
//! # Invariants
//! - Statements run in auto-commit mode; no explicit transactions.
//! - Reads use storage order (no `ORDER BY`).
//! - `update`/`delete` report affected rows instead of failing on zero.
//! - `name`/`location` are nullable; `NULL` round-trips as `None`.

use crate::db::DbError;
use crate::model::department::{DepartmentId, DepartmentRow};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const DEPARTMENT_SELECT_SQL: &str = "SELECT
    id,
    name,
    location
FROM departments";

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for department persistence and identity-map operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// `update`/`delete` called on an instance that has no id.
    NotPersisted,
    /// `save` called on an instance that already has an id.
    AlreadyPersisted(DepartmentId),
    /// `delete` called for an id the identity map does not hold.
    NotCached(DepartmentId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotPersisted => write!(f, "department has no id; save it first"),
            Self::AlreadyPersisted(id) => {
                write!(f, "department {id} is already persisted; use update")
            }
            Self::NotCached(id) => write!(f, "department {id} is not in the identity map"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotPersisted | Self::AlreadyPersisted(_) | Self::NotCached(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Row-level access to the `departments` table.
pub trait DepartmentRepository {
    fn create_table(&self) -> RepoResult<()>;
    fn drop_table(&self) -> RepoResult<()>;
    /// Inserts a row and returns its generated primary key.
    fn insert(&self, name: Option<&str>, location: Option<&str>) -> RepoResult<DepartmentId>;
    /// Overwrites `name`/`location` for `row.id`; returns affected rows.
    fn update(&self, row: &DepartmentRow) -> RepoResult<usize>;
    /// Deletes the row with `id`; returns affected rows.
    fn delete(&self, id: DepartmentId) -> RepoResult<usize>;
    fn select_all(&self) -> RepoResult<Vec<DepartmentRow>>;
    fn select_by_id(&self, id: DepartmentId) -> RepoResult<Option<DepartmentRow>>;
    /// Returns the first row in storage order whose name matches
    /// (`None` matches `NULL`).
    fn select_by_name(&self, name: Option<&str>) -> RepoResult<Option<DepartmentRow>>;
}

/// SQLite-backed department repository.
pub struct SqliteDepartmentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDepartmentRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl DepartmentRepository for SqliteDepartmentRepository<'_> {
    fn create_table(&self) -> RepoResult<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS departments (
                id INTEGER PRIMARY KEY,
                name TEXT,
                location TEXT
            );",
            [],
        )?;
        Ok(())
    }

    fn drop_table(&self) -> RepoResult<()> {
        self.conn.execute("DROP TABLE IF EXISTS departments;", [])?;
        Ok(())
    }

    fn insert(&self, name: Option<&str>, location: Option<&str>) -> RepoResult<DepartmentId> {
        self.conn.execute(
            "INSERT INTO departments (name, location) VALUES (?1, ?2);",
            params![name, location],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, row: &DepartmentRow) -> RepoResult<usize> {
        let changed = self.conn.execute(
            "UPDATE departments
             SET
                name = ?1,
                location = ?2
             WHERE id = ?3;",
            params![row.name.as_deref(), row.location.as_deref(), row.id],
        )?;
        Ok(changed)
    }

    fn delete(&self, id: DepartmentId) -> RepoResult<usize> {
        let changed = self
            .conn
            .execute("DELETE FROM departments WHERE id = ?1;", [id])?;
        Ok(changed)
    }

    fn select_all(&self) -> RepoResult<Vec<DepartmentRow>> {
        let mut stmt = self.conn.prepare(DEPARTMENT_SELECT_SQL)?;
        let mut rows = stmt.query([])?;
        let mut departments = Vec::new();

        while let Some(row) = rows.next()? {
            departments.push(parse_department_row(row)?);
        }

        Ok(departments)
    }

    fn select_by_id(&self, id: DepartmentId) -> RepoResult<Option<DepartmentRow>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DEPARTMENT_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_department_row(row)?));
        }

        Ok(None)
    }

    fn select_by_name(&self, name: Option<&str>) -> RepoResult<Option<DepartmentRow>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DEPARTMENT_SELECT_SQL} WHERE name IS ?1;"))?;

        let mut rows = stmt.query([name])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_department_row(row)?));
        }

        Ok(None)
    }
}

fn parse_department_row(row: &Row<'_>) -> RepoResult<DepartmentRow> {
    Ok(DepartmentRow {
        id: row.get("id")?,
        name: row.get("name")?,
        location: row.get("location")?,
    })
}
