//! Sample content for the read-only example form.
//!
//! Example answers are generated from a schema so the example never drifts
//! from the active field set.

use crate::model::answer::AnswerSet;
use crate::model::field::{FieldKind, FieldSchema};
use chrono::NaiveDate;

const SAMPLE_TEXT: &[(&str, &str)] = &[
    (
        "mistakes",
        "1. Checked my phone during study time.\n2. Ate junk food late at night.",
    ),
    (
        "triggers",
        "1. Got bored while studying and wanted quick dopamine.\n2. Felt stressed and thought, 'I deserve a snack.'",
    ),
    (
        "effects",
        "1. Lost 45 minutes of focus and felt guilty after scrolling.\n2. Slept late and woke up tired in the morning.",
    ),
    (
        "three_months",
        "My productivity will drop, my sleep cycle will worsen, and I’ll feel stuck in the same loop.",
    ),
    (
        "tomorrow_steps",
        "If I feel bored while studying, then I’ll take a 5-minute walk instead of opening my phone.",
    ),
];

/// Fixed date shown by the example form.
pub fn sample_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 15).unwrap_or_default()
}

/// Builds example answers for every field of `schema`.
///
/// Known prompts get sample text, date fields get `sample_date()`, and
/// fields without sample text stay empty.
pub fn example_answers(schema: &FieldSchema) -> AnswerSet {
    let mut answers = AnswerSet::new();
    for field in schema.fields() {
        match field.kind {
            FieldKind::Date => {
                answers.set(field.name.clone(), sample_date());
            }
            FieldKind::TextBlock => {
                let text = SAMPLE_TEXT
                    .iter()
                    .find(|(name, _)| *name == field.name)
                    .map_or("", |(_, text)| *text);
                answers.set(field.name.clone(), text);
            }
        }
    }
    answers
}
