use deptstore_core::db::{open_db, DbError};
use deptstore_core::DepartmentStore;
use std::rc::Rc;

#[test]
fn file_database_keeps_rows_across_connections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("departments.db");

    {
        let conn = open_db(&path).unwrap();
        let mut store = DepartmentStore::sqlite(&conn);
        store.create_table().unwrap();
        store.create("Engineering", "Building A").unwrap();
        store.create("Sales", "Building B").unwrap();
    }

    let conn = open_db(&path).unwrap();
    let mut store = DepartmentStore::sqlite(&conn);
    store.create_table().unwrap();

    let all = store.get_all().unwrap();
    assert_eq!(all.len(), 2);
    let sales = store.find_by_name("Sales").unwrap().unwrap();
    assert!(Rc::ptr_eq(&sales, &all[1]));
}

#[test]
fn opening_missing_directory_reports_target() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("departments.db");

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::Open { target, .. } => assert!(target.ends_with("departments.db")),
        other => panic!("unexpected error: {other}"),
    }
}
