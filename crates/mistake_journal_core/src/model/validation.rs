//! Validation rules derived from the field schema.
//!
//! # Responsibility
//! - Check a candidate answer set against required/type constraints.
//! - Report human-readable messages keyed by field name.
//!
//! # Invariants
//! - Validation is pure: no storage access, no logging.
//! - A `ValidAnswerSet` holds exactly the schema's fields.

use crate::model::answer::{parse_calendar_date, AnswerSet, FieldValue};
use crate::model::field::{FieldDefinition, FieldKind, FieldSchema};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Per-field validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    messages: BTreeMap<String, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, message: impl Into<String>) {
        self.messages.insert(name.into(), message.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.messages.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.messages.contains_key(name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.messages.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.messages
            .iter()
            .map(|(name, message)| (name.as_str(), message.as_str()))
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Keeps only the messages whose field satisfies `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.messages.retain(|name, _| keep(name));
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (name, message) in &self.messages {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{name}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl Error for FieldErrors {}

/// Answer set that passed validation against one schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidAnswerSet(AnswerSet);

impl ValidAnswerSet {
    pub fn as_answers(&self) -> &AnswerSet {
        &self.0
    }

    pub fn into_inner(self) -> AnswerSet {
        self.0
    }
}

/// Validates `answers` against `schema`.
///
/// Absent schema fields count as blank. Keys the schema does not declare are
/// reported as `unknown field`. On success, parseable date text is returned
/// as typed dates.
pub fn validate(schema: &FieldSchema, answers: &AnswerSet) -> Result<ValidAnswerSet, FieldErrors> {
    let mut errors = FieldErrors::new();
    let mut valid = AnswerSet::new();

    for field in schema.fields() {
        match check_field(field, answers.get(&field.name)) {
            Ok(value) => {
                valid.set(field.name.clone(), value);
            }
            Err(message) => errors.insert(field.name.clone(), message),
        }
    }

    for name in answers.names() {
        if !schema.contains(name) {
            errors.insert(name, "unknown field");
        }
    }

    if errors.is_empty() {
        Ok(ValidAnswerSet(valid))
    } else {
        Err(errors)
    }
}

fn check_field(field: &FieldDefinition, value: Option<&FieldValue>) -> Result<FieldValue, String> {
    let blank = value.map_or(true, FieldValue::is_blank);
    if blank {
        if field.required {
            return Err(format!("{} is required", field.label));
        }
        return Ok(FieldValue::Text(String::new()));
    }

    match (field.kind, value) {
        (FieldKind::TextBlock, Some(FieldValue::Text(text))) => Ok(FieldValue::Text(text.clone())),
        (FieldKind::TextBlock, _) => Err(format!("{} must be text", field.label)),
        (FieldKind::Date, Some(FieldValue::Date(date))) => Ok(FieldValue::Date(*date)),
        (FieldKind::Date, Some(FieldValue::Text(text))) => parse_calendar_date(text)
            .map(FieldValue::Date)
            .ok_or_else(|| format!("{} must be a valid date", field.label)),
        (FieldKind::Date, None) => Err(format!("{} is required", field.label)),
    }
}
