//! Field schema for one journal entry.
//!
//! # Responsibility
//! - Declare the ordered prompts a journal entry answers.
//! - Provide the canonical dated and undated prompt sets.
//!
//! # Invariants
//! - Field names are non-empty and unique within one schema.
//! - Field order is significant: it drives display and answer order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Name of the date field in the dated schema.
pub const DATE_FIELD: &str = "date";

/// Input kind of one prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Multi-line free text.
    TextBlock,
    /// Calendar date without time.
    Date,
}

/// Schema-only description of one prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    pub label: String,
    pub description: Option<String>,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldDefinition {
    /// Creates a required text-block field.
    pub fn text_block(
        name: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            description: Some(description.into()),
            kind: FieldKind::TextBlock,
            required: true,
        }
    }

    /// Creates a required date field.
    pub fn date(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            description: None,
            kind: FieldKind::Date,
            required: true,
        }
    }

    /// Marks this field optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// Schema construction error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    Empty,
    EmptyFieldName,
    DuplicateFieldName(String),
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "schema must declare at least one field"),
            Self::EmptyFieldName => write!(f, "field name cannot be empty"),
            Self::DuplicateFieldName(name) => write!(f, "duplicate field name: `{name}`"),
        }
    }
}

impl Error for SchemaError {}

/// Ordered, name-unique list of field definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    fields: Vec<FieldDefinition>,
}

impl FieldSchema {
    /// Builds a schema from ordered definitions.
    ///
    /// # Errors
    /// - `Empty` when no field is given.
    /// - `EmptyFieldName` when a trimmed name is empty.
    /// - `DuplicateFieldName` when two fields share a name.
    pub fn new(fields: Vec<FieldDefinition>) -> Result<Self, SchemaError> {
        if fields.is_empty() {
            return Err(SchemaError::Empty);
        }

        let mut seen = BTreeSet::new();
        for field in &fields {
            if field.name.trim().is_empty() {
                return Err(SchemaError::EmptyFieldName);
            }
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateFieldName(field.name.clone()));
            }
        }

        Ok(Self { fields })
    }

    /// The five reflective prompts, all required free text.
    pub fn undated() -> Self {
        Self {
            fields: prompt_fields(),
        }
    }

    /// The five prompts prefixed with a required entry date.
    pub fn dated() -> Self {
        let mut fields = Vec::with_capacity(6);
        fields.push(FieldDefinition::date(DATE_FIELD, "Date"));
        fields.extend(prompt_fields());
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// First date-kind field, used as an entry heading.
    pub fn date_field(&self) -> Option<&FieldDefinition> {
        self.fields
            .iter()
            .find(|field| field.kind == FieldKind::Date)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Default for FieldSchema {
    fn default() -> Self {
        Self::dated()
    }
}

fn prompt_fields() -> Vec<FieldDefinition> {
    vec![
        FieldDefinition::text_block(
            "mistakes",
            "Today’s Mistakes",
            "List each mistake on its own line. Be specific and observable (what exactly happened?)",
        ),
        FieldDefinition::text_block(
            "triggers",
            "Triggers & Root Causes",
            "What sparked each mistake? Note situation, emotion, cue, people, time, or thought pattern.",
        ),
        FieldDefinition::text_block(
            "effects",
            "Impact on My Day",
            "How did the mistakes affect mood, time, results, or relationships? Quantify if you can.",
        ),
        FieldDefinition::text_block(
            "three_months",
            "If This Continues for 3 Months…",
            "Project the consequences if repeated daily: health, grades/work, money, habits, or relationships.",
        ),
        FieldDefinition::text_block(
            "tomorrow_steps",
            "Plan for Tomorrow (Prevention Steps)",
            "Concrete, tiny actions with timing. Use “if–then” plans and environment tweaks.",
        ),
    ]
}
