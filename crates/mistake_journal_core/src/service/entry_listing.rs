//! History view projection for stored entries.
//!
//! # Invariants
//! - Body fields follow schema order.
//! - With a date field in the schema, the entry date is the heading and
//!   date-kind fields are left out of the body.

use crate::model::entry::{EntryId, JournalEntry};
use crate::model::field::{FieldKind, FieldSchema};
use chrono::Local;

const DATE_HEADING_FORMAT: &str = "%B %-d, %Y";
const TIMESTAMP_HEADING_FORMAT: &str = "%B %-d, %Y, %I:%M %p";

/// One labelled body field of an entry view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFieldView {
    pub name: String,
    pub label: String,
    pub text: String,
}

/// Display projection of one stored entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryView {
    pub id: EntryId,
    pub heading: String,
    pub fields: Vec<EntryFieldView>,
}

/// Projects `entries` for display, preserving their order.
pub fn entry_views(schema: &FieldSchema, entries: &[JournalEntry]) -> Vec<EntryView> {
    entries
        .iter()
        .map(|entry| entry_view(schema, entry))
        .collect()
}

pub fn entry_view(schema: &FieldSchema, entry: &JournalEntry) -> EntryView {
    let dated = schema.date_field().is_some();
    let heading = schema
        .date_field()
        .and_then(|field| entry.data.get(&field.name))
        .and_then(|value| value.as_date())
        .map(|date| date.format(DATE_HEADING_FORMAT).to_string())
        .unwrap_or_else(|| {
            entry
                .created_at
                .with_timezone(&Local)
                .format(TIMESTAMP_HEADING_FORMAT)
                .to_string()
        });

    let fields = schema
        .fields()
        .iter()
        .filter(|field| !(dated && field.kind == FieldKind::Date))
        .map(|field| EntryFieldView {
            name: field.name.clone(),
            label: field.label.clone(),
            text: entry.data.text(&field.name).unwrap_or_default(),
        })
        .collect();

    EntryView {
        id: entry.id.clone(),
        heading,
        fields,
    }
}
