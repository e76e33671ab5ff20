//! Runtime answer values keyed by field name.
//!
//! # Responsibility
//! - Hold the in-progress or submitted values of one journal form.
//! - Convert between the typed values and their stored string shape.
//!
//! # Invariants
//! - Every value serializes as a plain JSON string; dates use `YYYY-MM-DD`.
//! - Date reconstruction is schema-driven: only date-kind fields are parsed.

use crate::model::field::{FieldKind, FieldSchema};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Value of one answered prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Date(NaiveDate),
}

impl FieldValue {
    /// Returns the value as display/storage text.
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(value) => value.clone(),
            Self::Date(date) => date.format(DATE_FORMAT).to_string(),
        }
    }

    /// Whether the value holds no non-whitespace content.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(value) => value.trim().is_empty(),
            Self::Date(_) => false,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(date) => Some(*date),
            Self::Text(_) => None,
        }
    }

    /// Reinterprets the value for a field kind.
    ///
    /// Date fields turn parseable text into a calendar date; anything else is
    /// returned unchanged so validation can report it.
    pub fn coerce(self, kind: FieldKind) -> Self {
        match (kind, self) {
            (FieldKind::Date, Self::Text(text)) => match parse_calendar_date(&text) {
                Some(date) => Self::Date(date),
                None => Self::Text(text),
            },
            (_, value) => value,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_text())
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::Text)
    }
}

/// Parses a calendar date from `YYYY-MM-DD` or an RFC 3339 timestamp.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|timestamp| timestamp.date_naive())
        })
}

/// Mapping from field name to current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    values: BTreeMap<String, FieldValue>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schema defaults: empty text, and `today` for date fields.
    pub fn defaults(schema: &FieldSchema, today: NaiveDate) -> Self {
        let values = schema
            .fields()
            .iter()
            .map(|field| {
                let value = match field.kind {
                    FieldKind::TextBlock => FieldValue::Text(String::new()),
                    FieldKind::Date => FieldValue::Date(today),
                };
                (field.name.clone(), value)
            })
            .collect();
        Self { values }
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(
        &mut self,
        name: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Option<FieldValue> {
        self.values.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Text form of one value; `None` when the field is absent.
    pub fn text(&self, name: &str) -> Option<String> {
        self.values.get(name).map(FieldValue::to_text)
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.values.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Reconstructs date-kind values from their stored text.
    pub fn typed_for(self, schema: &FieldSchema) -> Self {
        let values = self
            .values
            .into_iter()
            .map(|(name, value)| {
                let value = match schema.field(&name) {
                    Some(field) => value.coerce(field.kind),
                    None => value,
                };
                (name, value)
            })
            .collect();
        Self { values }
    }

    /// Drops values whose names the schema does not declare.
    pub fn retain_schema_fields(&mut self, schema: &FieldSchema) {
        self.values.retain(|name, _| schema.contains(name));
    }

    /// Adds schema defaults for every missing field.
    pub fn fill_defaults(&mut self, schema: &FieldSchema, today: NaiveDate) {
        for (name, value) in Self::defaults(schema, today).values {
            self.values.entry(name).or_insert(value);
        }
    }

    /// Whether any schema field holds something the user entered.
    ///
    /// Text counts when it has non-whitespace characters. A date counts only
    /// when it differs from `default_date`, the value a pristine form starts
    /// with.
    pub fn has_content(&self, schema: &FieldSchema, default_date: NaiveDate) -> bool {
        schema.fields().iter().any(|field| {
            let Some(value) = self.values.get(&field.name) else {
                return false;
            };
            match field.kind {
                FieldKind::TextBlock => !value.is_blank(),
                FieldKind::Date => !value.is_blank() && value.as_date() != Some(default_date),
            }
        })
    }
}
