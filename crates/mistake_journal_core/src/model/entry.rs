//! Submitted journal entry model.
//!
//! # Invariants
//! - `id` is generated once at submission and never reused.
//! - Entries are immutable after creation; only deletion is allowed.

use crate::model::answer::AnswerSet;
use crate::model::validation::ValidAnswerSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque entry identifier.
pub type EntryId = String;

/// One submitted, timestamped journal session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: EntryId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub data: AnswerSet,
}

impl JournalEntry {
    /// Creates an entry with a fresh id, stamped at `now`.
    pub fn new(data: ValidAnswerSet, now: DateTime<Utc>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), data.into_inner(), now)
    }

    /// Creates an entry with a caller-provided id.
    ///
    /// Used by import paths and tests where identity already exists.
    pub fn with_id(id: impl Into<EntryId>, data: AnswerSet, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            created_at: now,
            updated_at: now,
            data,
        }
    }
}
