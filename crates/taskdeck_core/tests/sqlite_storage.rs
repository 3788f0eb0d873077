use taskdeck_core::db::open_db;
use taskdeck_core::db::open_db_in_memory;
use taskdeck_core::{
    Category, KeyValueStore, SqliteKeyValueStore, StoreConfig, TaskStore, DEFAULT_STORAGE_KEY,
};

#[test]
fn get_missing_key_returns_none() {
    let store = SqliteKeyValueStore::new(open_db_in_memory().unwrap());
    assert_eq!(store.get("absent").unwrap(), None);
}

#[test]
fn set_upserts_existing_key() {
    let mut store = SqliteKeyValueStore::new(open_db_in_memory().unwrap());
    store.set("k", "one").unwrap();
    store.set("k", "two").unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));

    let conn = store.into_inner();
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn task_store_survives_reopen_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taskdeck.sqlite3");

    let created = {
        let storage = SqliteKeyValueStore::new(open_db(&path).unwrap());
        let mut store = TaskStore::open(storage, StoreConfig::default());
        let task = store.add("Persist me", Category::Project, None).unwrap();
        store.toggle_completed(&task.id).unwrap()
    };

    let storage = SqliteKeyValueStore::new(open_db(&path).unwrap());
    assert!(storage.get(DEFAULT_STORAGE_KEY).unwrap().is_some());
    let store = TaskStore::open(storage, StoreConfig::default());
    assert_eq!(store.tasks(), &[created]);
}
