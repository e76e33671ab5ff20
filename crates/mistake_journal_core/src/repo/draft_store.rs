//! Draft slot persistence with debounced writes.
//!
//! # Responsibility
//! - Persist the single in-progress answer set of one form.
//! - Collapse bursts of edits into one trailing write.
//!
//! # Invariants
//! - A draft without user content is never persisted; saving one deletes
//!   any stored draft instead. A date equal to `default_date` is not content.
//! - At most one pending save exists; scheduling replaces it.
//! - No operation propagates a storage failure to the caller.

use crate::clock::{Clock, SystemClock};
use crate::config::JournalConfig;
use crate::model::answer::AnswerSet;
use crate::model::field::FieldSchema;
use crate::repo::debounce::Debouncer;
use crate::storage::events::{StorageEvents, StorageOperation, StorageSlot};
use crate::storage::{KeyValueStorage, StorageError, StorageResult};
use chrono::NaiveDate;
use log::debug;
use std::time::Instant;

/// Owner of the persisted draft slot.
pub struct DraftStore<'s, S: KeyValueStorage> {
    storage: &'s S,
    schema: &'s FieldSchema,
    key: String,
    default_date: NaiveDate,
    events: StorageEvents,
    debouncer: Debouncer<AnswerSet>,
}

impl<'s, S: KeyValueStorage> DraftStore<'s, S> {
    pub fn new(storage: &'s S, schema: &'s FieldSchema, config: &JournalConfig) -> Self {
        Self {
            storage,
            schema,
            key: config.draft_key.clone(),
            default_date: SystemClock.today(),
            events: StorageEvents::new(),
            debouncer: Debouncer::new(config.debounce_window()),
        }
    }

    /// Routes swallowed failures to `events`.
    pub fn with_events(mut self, events: StorageEvents) -> Self {
        self.events = events;
        self
    }

    /// Sets the date a pristine form starts with; defaults to today.
    pub fn with_default_date(mut self, date: NaiveDate) -> Self {
        self.default_date = date;
        self
    }

    pub fn set_default_date(&mut self, date: NaiveDate) {
        self.default_date = date;
    }

    pub fn schema(&self) -> &'s FieldSchema {
        self.schema
    }

    /// Reads the persisted draft.
    ///
    /// Absent, unreadable or corrupt drafts all yield `None`. Values for
    /// fields outside the schema are dropped.
    pub fn restore(&self) -> Option<AnswerSet> {
        match self.read() {
            Ok(Some(mut answers)) => {
                answers.retain_schema_fields(self.schema);
                debug!(
                    "event=draft_restore module=draft_store status=ok fields={}",
                    answers.len()
                );
                Some(answers)
            }
            Ok(None) => None,
            Err(err) => {
                self.events
                    .report(StorageSlot::Draft, StorageOperation::Restore, &err);
                None
            }
        }
    }

    /// Persists `answers` now, or deletes the draft when it has no content.
    pub fn save(&self, answers: &AnswerSet) {
        if !answers.has_content(self.schema, self.default_date) {
            debug!("event=draft_save module=draft_store status=skipped reason=empty");
            self.clear_as(StorageOperation::Save);
            return;
        }

        let result = serde_json::to_string(answers)
            .map_err(|err| StorageError::corrupt(&self.key, &err))
            .and_then(|payload| {
                self.storage.set_item(&self.key, &payload)?;
                Ok(payload.len())
            });
        match result {
            Ok(bytes) => debug!("event=draft_save module=draft_store status=ok bytes={bytes}"),
            Err(err) => self
                .events
                .report(StorageSlot::Draft, StorageOperation::Save, &err),
        }
    }

    /// Removes the persisted draft unconditionally.
    pub fn clear(&self) {
        self.clear_as(StorageOperation::Clear);
    }

    /// Whether a draft is persisted; unreadable storage counts as absent.
    pub fn exists(&self) -> bool {
        match self.storage.get_item(&self.key) {
            Ok(value) => value.is_some(),
            Err(err) => {
                self.events
                    .report(StorageSlot::Draft, StorageOperation::Exists, &err);
                false
            }
        }
    }

    /// Schedules a trailing save, canceling any pending one.
    pub fn schedule_save(&mut self, answers: AnswerSet, now: Instant) {
        if self.debouncer.schedule(answers, now) {
            debug!("event=draft_debounce module=draft_store status=replaced");
        }
    }

    /// Writes the pending draft if its deadline has passed.
    ///
    /// Returns `true` when a save ran.
    pub fn flush_due(&mut self, now: Instant) -> bool {
        match self.debouncer.take_due(now) {
            Some(answers) => {
                self.save(&answers);
                true
            }
            None => false,
        }
    }

    /// Drops the pending save without writing it.
    ///
    /// Returns `true` when a pending save was canceled.
    pub fn cancel_pending(&mut self) -> bool {
        let canceled = self.debouncer.cancel().is_some();
        if canceled {
            debug!("event=draft_debounce module=draft_store status=canceled");
        }
        canceled
    }

    pub fn has_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    fn read(&self) -> StorageResult<Option<AnswerSet>> {
        let Some(payload) = self.storage.get_item(&self.key)? else {
            return Ok(None);
        };
        let answers: AnswerSet = serde_json::from_str(&payload)
            .map_err(|err| StorageError::corrupt(&self.key, &err))?;
        Ok(Some(answers.typed_for(self.schema)))
    }

    fn clear_as(&self, operation: StorageOperation) {
        if let Err(err) = self.storage.remove_item(&self.key) {
            self.events.report(StorageSlot::Draft, operation, &err);
        }
    }
}
