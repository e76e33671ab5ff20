use mistake_journal_core::db::{open_db, open_db_in_memory};
use mistake_journal_core::{
    AnswerSet, DraftStore, EntryStore, FieldSchema, JournalConfig, JournalEntry, KeyValueStorage,
    SqliteStorage, StorageFailureKind,
};
use chrono::{TimeZone, Utc};
use rusqlite::Connection;

#[test]
fn set_get_remove_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteStorage::try_new(&conn).unwrap();

    assert_eq!(storage.get_item("slot").unwrap(), None);
    storage.set_item("slot", "first").unwrap();
    storage.set_item("slot", "second").unwrap();
    assert_eq!(storage.get_item("slot").unwrap().as_deref(), Some("second"));

    storage.remove_item("slot").unwrap();
    storage.remove_item("slot").unwrap();
    assert_eq!(storage.get_item("slot").unwrap(), None);
}

#[test]
fn try_new_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteStorage::try_new(&conn).err().unwrap();
    assert_eq!(err.kind(), StorageFailureKind::Unavailable);
}

#[test]
fn draft_and_entries_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("journal.db");
    let schema = FieldSchema::dated();
    let config = JournalConfig::default();
    let at = Utc.with_ymd_and_hms(2026, 10, 17, 21, 0, 0).unwrap();
    let entry = JournalEntry::with_id(
        "persisted",
        AnswerSet::new()
            .with("date", "2026-10-17")
            .with("mistakes", "Stayed up late")
            .typed_for(&schema),
        at,
    );

    {
        let conn = open_db(&path).unwrap();
        let storage = SqliteStorage::try_new(&conn).unwrap();
        DraftStore::new(&storage, &schema, &config)
            .save(&AnswerSet::new().with("mistakes", "Half-written"));
        EntryStore::new(&storage, &schema, &config).append(&entry);
    }

    let conn = open_db(&path).unwrap();
    let storage = SqliteStorage::try_new(&conn).unwrap();
    let restored = DraftStore::new(&storage, &schema, &config)
        .restore()
        .unwrap();
    assert_eq!(restored.text("mistakes").as_deref(), Some("Half-written"));

    let listed = EntryStore::new(&storage, &schema, &config).list();
    assert_eq!(listed, vec![entry]);
}
