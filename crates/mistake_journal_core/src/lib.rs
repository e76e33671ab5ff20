//! Core domain logic for the mistakes journal.
//! This crate is the single source of truth for form and persistence
//! invariants; presentation layers call into it and render its state.

pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, JournalConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::answer::{parse_calendar_date, AnswerSet, FieldValue};
pub use model::entry::{EntryId, JournalEntry};
pub use model::examples::example_answers;
pub use model::field::{FieldDefinition, FieldKind, FieldSchema, SchemaError, DATE_FIELD};
pub use model::validation::{validate, FieldErrors, ValidAnswerSet};
pub use repo::draft_store::DraftStore;
pub use repo::entry_store::EntryStore;
pub use service::entry_listing::{entry_view, entry_views, EntryFieldView, EntryView};
pub use service::journal_form::{FormError, FormState, JournalForm, SubmitOutcome};
pub use service::read_only::{ReadOnlyField, ReadOnlyForm};
pub use storage::events::{
    RecordingSink, StorageEvent, StorageEventSink, StorageEvents, StorageOperation, StorageSlot,
};
pub use storage::memory::MemoryStorage;
pub use storage::sqlite::SqliteStorage;
pub use storage::{KeyValueStorage, StorageError, StorageFailureKind, StorageResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
