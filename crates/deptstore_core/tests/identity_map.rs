use deptstore_core::db::open_db_in_memory;
use deptstore_core::{DepartmentStore, DepartmentRow};
use std::rc::Rc;

#[test]
fn create_then_find_by_id_returns_same_instance() {
    let conn = open_db_in_memory().unwrap();
    let mut store = DepartmentStore::sqlite(&conn);
    store.create_table().unwrap();

    let created = store.create("Engineering", "Building A").unwrap();
    let id = created.borrow().id.unwrap();
    assert!(id > 0);

    let found = store.find_by_id(id).unwrap().unwrap();
    assert!(Rc::ptr_eq(&found, &created));
    assert_eq!(found.borrow().name.as_deref(), Some("Engineering"));
    assert_eq!(found.borrow().location.as_deref(), Some("Building A"));
}

#[test]
fn repeated_lookups_share_one_instance() {
    let conn = open_db_in_memory().unwrap();
    let mut store = DepartmentStore::sqlite(&conn);
    store.create_table().unwrap();
    store.create("Sales", "Building B").unwrap();

    let by_name = store.find_by_name("Sales").unwrap().unwrap();
    let by_id = store.find_by_id(1).unwrap().unwrap();
    let all = store.get_all().unwrap();

    assert!(Rc::ptr_eq(&by_name, &by_id));
    assert!(Rc::ptr_eq(&all[0], &by_id));
    assert_eq!(store.identity_map().len(), 1);
}

#[test]
fn fresh_store_materializes_new_instances() {
    let conn = open_db_in_memory().unwrap();
    let mut writer = DepartmentStore::sqlite(&conn);
    writer.create_table().unwrap();
    let created = writer.create("Engineering", "Building A").unwrap();

    let mut reader = DepartmentStore::sqlite(&conn);
    assert!(reader.identity_map().is_empty());

    let loaded = reader.find_by_id(1).unwrap().unwrap();
    assert!(!Rc::ptr_eq(&loaded, &created));
    assert_eq!(*loaded.borrow(), *created.borrow());
    assert!(reader.identity_map().contains(1));
}

#[test]
fn instance_from_db_registers_then_refreshes() {
    let conn = open_db_in_memory().unwrap();
    let mut store = DepartmentStore::sqlite(&conn);

    let first = store.instance_from_db(DepartmentRow {
        id: 3,
        name: Some("Legal".to_string()),
        location: Some("Annex".to_string()),
    });
    assert_eq!(first.borrow().id, Some(3));
    assert!(store.identity_map().contains(3));

    let second = store.instance_from_db(DepartmentRow {
        id: 3,
        name: Some("Legal & Compliance".to_string()),
        location: Some("Tower".to_string()),
    });
    assert!(Rc::ptr_eq(&first, &second));
    assert_eq!(first.borrow().name.as_deref(), Some("Legal & Compliance"));
    assert_eq!(first.borrow().location.as_deref(), Some("Tower"));
    assert_eq!(store.identity_map().len(), 1);
}

#[test]
fn drop_table_keeps_identity_map_entries() {
    let conn = open_db_in_memory().unwrap();
    let mut store = DepartmentStore::sqlite(&conn);
    store.create_table().unwrap();
    store.create("Engineering", "Building A").unwrap();

    store.drop_table().unwrap();
    assert!(store.identity_map().contains(1));
}

#[test]
fn department_walkthrough() {
    let conn = open_db_in_memory().unwrap();
    let mut store = DepartmentStore::sqlite(&conn);
    store.create_table().unwrap();

    let engineering = store.create("Engineering", "Building A").unwrap();
    let sales = store.create("Sales", "Building B").unwrap();
    assert_eq!(engineering.borrow().id, Some(1));
    assert_eq!(sales.borrow().id, Some(2));

    let ids: Vec<i64> = store
        .get_all()
        .unwrap()
        .iter()
        .map(|d| d.borrow().id.unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2]);

    let found = store.find_by_name("Sales").unwrap().unwrap();
    assert!(Rc::ptr_eq(&found, &sales));

    let doomed = store.find_by_id(2).unwrap().unwrap();
    store.delete(&doomed).unwrap();

    let remaining = store.get_all().unwrap();
    assert_eq!(remaining.len(), 1);
    assert!(Rc::ptr_eq(&remaining[0], &engineering));
    assert!(store.find_by_id(2).unwrap().is_none());
    assert_eq!(sales.borrow().id, None);
}
