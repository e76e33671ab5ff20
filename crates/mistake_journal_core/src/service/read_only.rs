//! Display-only journal form.
//!
//! A `ReadOnlyForm` has no handle on any store and exposes no mutators, so
//! a read-only form cannot write drafts or entries by construction.

use crate::model::answer::AnswerSet;
use crate::model::examples::example_answers;
use crate::model::field::{FieldDefinition, FieldSchema};

/// One rendered row of a read-only form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOnlyField<'a> {
    /// 1-based display position.
    pub position: usize,
    pub definition: &'a FieldDefinition,
    pub value: String,
}

/// Fixed answers rendered against a schema.
#[derive(Debug, Clone)]
pub struct ReadOnlyForm<'a> {
    schema: &'a FieldSchema,
    answers: AnswerSet,
}

impl<'a> ReadOnlyForm<'a> {
    /// Wraps externally supplied answers; values outside the schema are
    /// dropped.
    pub fn new(schema: &'a FieldSchema, mut answers: AnswerSet) -> Self {
        answers.retain_schema_fields(schema);
        Self { schema, answers }
    }

    /// The example form generated from `schema`.
    pub fn example(schema: &'a FieldSchema) -> Self {
        Self::new(schema, example_answers(schema))
    }

    pub fn schema(&self) -> &'a FieldSchema {
        self.schema
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    /// Rows in schema order; missing answers render as empty text.
    pub fn fields(&self) -> Vec<ReadOnlyField<'a>> {
        self.schema
            .fields()
            .iter()
            .enumerate()
            .map(|(index, definition)| ReadOnlyField {
                position: index + 1,
                definition,
                value: self.answers.text(&definition.name).unwrap_or_default(),
            })
            .collect()
    }
}
