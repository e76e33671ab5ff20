//! Journal form controller.
//!
//! # Responsibility
//! - Drive the form lifecycle: restore, edit, validate, submit, reset.
//! - Coordinate the draft slot and entry collection around submission.
//!
//! # Invariants
//! - A rejected submission performs no storage writes.
//! - An accepted submission clears the draft before the entry is appended,
//!   and leaves no pending draft save behind.
//! - After `close`, no storage side effect can happen through this form.
//!
//! # See also
//! - `service::read_only` for the display-only example form.

use crate::clock::{Clock, SystemClock};
use crate::config::JournalConfig;
use crate::model::answer::{AnswerSet, FieldValue};
use crate::model::entry::JournalEntry;
use crate::model::field::FieldSchema;
use crate::model::validation::{validate, FieldErrors};
use crate::repo::draft_store::DraftStore;
use crate::repo::entry_store::EntryStore;
use crate::storage::events::StorageEvents;
use crate::storage::KeyValueStorage;
use log::{debug, info};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Lifecycle state of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Editing,
    Submitting,
    Submitted,
}

impl FormState {
    fn as_str(self) -> &'static str {
        match self {
            Self::Editing => "editing",
            Self::Submitting => "submitting",
            Self::Submitted => "submitted",
        }
    }
}

/// Caller misuse of the form API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    UnknownField(String),
    Closed,
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownField(name) => write!(f, "unknown form field: `{name}`"),
            Self::Closed => write!(f, "journal form is closed"),
        }
    }
}

impl Error for FormError {}

/// Result of one submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The entry was built and handed to the entry store.
    Accepted(JournalEntry),
    /// Validation failed; the form keeps its answers.
    Rejected(FieldErrors),
}

/// In-process controller the presentation layer talks to.
pub struct JournalForm<'s, S: KeyValueStorage, C: Clock = SystemClock> {
    schema: &'s FieldSchema,
    drafts: DraftStore<'s, S>,
    entries: EntryStore<'s, S>,
    clock: C,
    answers: AnswerSet,
    validation: FieldErrors,
    touched: BTreeSet<String>,
    submit_attempted: bool,
    restored: bool,
    state: FormState,
    closed: bool,
}

impl<'s, S: KeyValueStorage, C: Clock> JournalForm<'s, S, C> {
    /// Opens a form over shared storage, restoring any persisted draft.
    pub fn open(
        storage: &'s S,
        schema: &'s FieldSchema,
        config: &JournalConfig,
        events: StorageEvents,
        clock: C,
    ) -> Self {
        let drafts = DraftStore::new(storage, schema, config).with_events(events.clone());
        let entries = EntryStore::new(storage, schema, config).with_events(events);
        Self::new(drafts, entries, clock)
    }

    /// Builds a form from existing stores, restoring any persisted draft.
    ///
    /// The draft store's schema is the form schema.
    pub fn new(drafts: DraftStore<'s, S>, entries: EntryStore<'s, S>, clock: C) -> Self {
        let schema = drafts.schema();
        let today = clock.today();
        let drafts = drafts.with_default_date(today);
        let (answers, restored) = match drafts.restore() {
            Some(mut draft) => {
                draft.fill_defaults(schema, today);
                (draft, true)
            }
            None => (AnswerSet::defaults(schema, today), false),
        };
        info!("event=form_open module=journal_form status=ok restored={restored}");

        let mut form = Self {
            schema,
            drafts,
            entries,
            clock,
            answers,
            validation: FieldErrors::new(),
            touched: BTreeSet::new(),
            submit_attempted: false,
            restored,
            state: FormState::Editing,
            closed: false,
        };
        form.revalidate();
        form
    }

    /// Applies one field edit and schedules a debounced draft save.
    ///
    /// Date fields accept `YYYY-MM-DD` text; unparseable text is kept so the
    /// validation message can point at it.
    ///
    /// # Errors
    /// - `Closed` after `close`.
    /// - `UnknownField` when `name` is not in the schema.
    pub fn on_field_change(
        &mut self,
        name: &str,
        value: impl Into<FieldValue>,
    ) -> Result<(), FormError> {
        self.ensure_open()?;
        let kind = self
            .schema
            .field(name)
            .map(|field| field.kind)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;

        self.answers.set(name, value.into().coerce(kind));
        self.touched.insert(name.to_string());
        self.revalidate();

        self.drafts
            .schedule_save(self.answers.clone(), self.clock.instant());
        self.tick();
        Ok(())
    }

    /// Validates and, when valid, turns the answers into a stored entry.
    ///
    /// # Errors
    /// - `Closed` after `close`.
    pub fn on_submit(&mut self) -> Result<SubmitOutcome, FormError> {
        self.ensure_open()?;
        self.submit_attempted = true;
        self.transition(FormState::Submitting);

        let valid = match validate(self.schema, &self.answers) {
            Ok(valid) => valid,
            Err(errors) => {
                info!(
                    "event=form_submit module=journal_form status=rejected invalid_fields={}",
                    errors.len()
                );
                self.validation = errors.clone();
                self.transition(FormState::Editing);
                return Ok(SubmitOutcome::Rejected(errors));
            }
        };

        self.drafts.cancel_pending();
        self.drafts.clear();
        let entry = JournalEntry::new(valid, self.clock.now());
        self.entries.append(&entry);
        self.transition(FormState::Submitted);
        info!("event=form_submit module=journal_form status=ok");

        self.reset();
        self.transition(FormState::Editing);
        Ok(SubmitOutcome::Accepted(entry))
    }

    /// Runs a due debounced save; hosts call this from their event loop.
    ///
    /// Returns `true` when a draft write ran.
    pub fn tick(&mut self) -> bool {
        if self.closed {
            return false;
        }
        self.drafts.flush_due(self.clock.instant())
    }

    /// Closes the form, discarding any pending draft save.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        let canceled = self.drafts.cancel_pending();
        self.closed = true;
        info!("event=form_close module=journal_form status=ok canceled_pending={canceled}");
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Errors to display: touched fields before the first submit attempt,
    /// every field afterwards.
    pub fn field_errors(&self) -> FieldErrors {
        let mut visible = self.validation.clone();
        if !self.submit_attempted {
            visible.retain(|name| self.touched.contains(name));
        }
        visible
    }

    pub fn is_valid(&self) -> bool {
        self.validation.is_empty()
    }

    pub fn current_answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    /// Whether the initial answers came from a persisted draft.
    pub fn restored_from_draft(&self) -> bool {
        self.restored
    }

    pub fn has_pending_save(&self) -> bool {
        self.drafts.has_pending()
    }

    pub fn schema(&self) -> &'s FieldSchema {
        self.schema
    }

    pub fn drafts(&self) -> &DraftStore<'s, S> {
        &self.drafts
    }

    pub fn entries(&self) -> &EntryStore<'s, S> {
        &self.entries
    }

    fn ensure_open(&self) -> Result<(), FormError> {
        if self.closed {
            return Err(FormError::Closed);
        }
        Ok(())
    }

    fn revalidate(&mut self) {
        self.validation = match validate(self.schema, &self.answers) {
            Ok(_) => FieldErrors::new(),
            Err(errors) => errors,
        };
    }

    fn reset(&mut self) {
        let today = self.clock.today();
        self.drafts.set_default_date(today);
        self.answers = AnswerSet::defaults(self.schema, today);
        self.touched.clear();
        self.submit_attempted = false;
        self.restored = false;
        self.revalidate();
    }

    fn transition(&mut self, next: FormState) {
        debug!(
            "event=form_state module=journal_form from={} to={}",
            self.state.as_str(),
            next.as_str()
        );
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::{FormError, FormState, JournalForm};
    use crate::clock::ManualClock;
    use crate::config::JournalConfig;
    use crate::model::field::FieldSchema;
    use crate::storage::events::StorageEvents;
    use crate::storage::memory::MemoryStorage;
    use chrono::{TimeZone, Utc};

    #[test]
    fn errors_surface_for_touched_fields_until_first_submit() {
        let storage = MemoryStorage::new();
        let schema = FieldSchema::undated();
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2026, 3, 1, 20, 0, 0).unwrap());
        let mut form = JournalForm::open(
            &storage,
            &schema,
            &JournalConfig::default(),
            StorageEvents::new(),
            &clock,
        );

        assert!(form.field_errors().is_empty());
        assert!(!form.is_valid());

        form.on_field_change("effects", "  ").unwrap();
        let errors = form.field_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("effects"), Some("Impact on My Day is required"));

        form.on_submit().unwrap();
        assert_eq!(form.field_errors().len(), 5);
        assert_eq!(form.state(), FormState::Editing);
    }

    #[test]
    fn unknown_field_is_rejected_without_side_effects() {
        let storage = MemoryStorage::new();
        let schema = FieldSchema::undated();
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2026, 3, 1, 20, 0, 0).unwrap());
        let mut form = JournalForm::open(
            &storage,
            &schema,
            &JournalConfig::default(),
            StorageEvents::new(),
            &clock,
        );

        let err = form.on_field_change("mood", "fine").unwrap_err();
        assert_eq!(err, FormError::UnknownField("mood".to_string()));
        assert_eq!(storage.write_count(), 0);
    }
}
