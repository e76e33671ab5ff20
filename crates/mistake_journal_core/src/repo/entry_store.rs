//! Bounded, newest-first collection of submitted entries.
//!
//! # Responsibility
//! - Persist submitted entries as one JSON array in the entries slot.
//! - Serve list/delete/clear operations for history views.
//!
//! # Invariants
//! - Writes follow read-merge-write: load, modify, truncate, persist.
//! - The persisted collection never exceeds `max_entries`.
//! - Storage failures degrade to no-ops; `list` degrades to empty.
//!
//! # See also
//! - `repo::draft_store` for the companion draft slot.

use crate::config::JournalConfig;
use crate::model::entry::JournalEntry;
use crate::model::field::FieldSchema;
use crate::storage::events::{StorageEvents, StorageOperation, StorageSlot};
use crate::storage::{KeyValueStorage, StorageError, StorageFailureKind, StorageResult};
use log::{debug, info};

/// Owner of the persisted entry collection.
pub struct EntryStore<'s, S: KeyValueStorage> {
    storage: &'s S,
    schema: &'s FieldSchema,
    key: String,
    max_entries: usize,
    events: StorageEvents,
}

impl<'s, S: KeyValueStorage> EntryStore<'s, S> {
    pub fn new(storage: &'s S, schema: &'s FieldSchema, config: &JournalConfig) -> Self {
        Self {
            storage,
            schema,
            key: config.entries_key.clone(),
            max_entries: config.max_entries.max(1),
            events: StorageEvents::new(),
        }
    }

    /// Routes swallowed failures to `events`.
    pub fn with_events(mut self, events: StorageEvents) -> Self {
        self.events = events;
        self
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Inserts `entry` at the head and evicts from the tail past the bound.
    ///
    /// A corrupt stored collection is replaced by a fresh one; an unreadable
    /// medium turns the append into a no-op.
    pub fn append(&self, entry: &JournalEntry) {
        let mut entries = match self.load() {
            Ok(entries) => entries,
            Err(err) if err.kind() == StorageFailureKind::Corrupt => {
                self.events
                    .report(StorageSlot::Entries, StorageOperation::Append, &err);
                Vec::new()
            }
            Err(err) => {
                self.events
                    .report(StorageSlot::Entries, StorageOperation::Append, &err);
                return;
            }
        };

        entries.insert(0, entry.clone());
        entries.truncate(self.max_entries);

        match self.persist(&entries) {
            Ok(()) => info!(
                "event=entry_append module=entry_store status=ok count={}",
                entries.len()
            ),
            Err(err) => self
                .events
                .report(StorageSlot::Entries, StorageOperation::Append, &err),
        }
    }

    /// Returns stored entries newest-first; failures yield an empty list.
    pub fn list(&self) -> Vec<JournalEntry> {
        match self.load() {
            Ok(entries) => entries,
            Err(err) => {
                self.events
                    .report(StorageSlot::Entries, StorageOperation::List, &err);
                Vec::new()
            }
        }
    }

    pub fn find_by_id(&self, id: &str) -> Option<JournalEntry> {
        self.list().into_iter().find(|entry| entry.id == id)
    }

    /// Removes the entry whose id matches exactly.
    ///
    /// Returns `true` when an entry was removed and the result persisted.
    pub fn delete_by_id(&self, id: &str) -> bool {
        let result = self.load().and_then(|mut entries| {
            let before = entries.len();
            entries.retain(|entry| entry.id != id);
            if entries.len() == before {
                return Ok(false);
            }
            self.persist(&entries)?;
            Ok(true)
        });

        match result {
            Ok(removed) => {
                debug!("event=entry_delete module=entry_store status=ok removed={removed}");
                removed
            }
            Err(err) => {
                self.events
                    .report(StorageSlot::Entries, StorageOperation::Delete, &err);
                false
            }
        }
    }

    /// Removes the whole persisted collection.
    pub fn clear_all(&self) {
        match self.storage.remove_item(&self.key) {
            Ok(()) => info!("event=entry_clear_all module=entry_store status=ok"),
            Err(err) => self
                .events
                .report(StorageSlot::Entries, StorageOperation::ClearAll, &err),
        }
    }

    fn load(&self) -> StorageResult<Vec<JournalEntry>> {
        let Some(payload) = self.storage.get_item(&self.key)? else {
            return Ok(Vec::new());
        };
        let entries: Vec<JournalEntry> = serde_json::from_str(&payload)
            .map_err(|err| StorageError::corrupt(&self.key, &err))?;
        Ok(entries
            .into_iter()
            .map(|mut entry| {
                entry.data = entry.data.typed_for(self.schema);
                entry
            })
            .collect())
    }

    fn persist(&self, entries: &[JournalEntry]) -> StorageResult<()> {
        let payload = serde_json::to_string(entries)
            .map_err(|err| StorageError::corrupt(&self.key, &err))?;
        self.storage.set_item(&self.key, &payload)
    }
}
