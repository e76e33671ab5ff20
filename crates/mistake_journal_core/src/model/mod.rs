//! Journal domain model.
//!
//! # Responsibility
//! - Define the field schema, answer values and submitted entry shapes.
//! - Own the validation rules derived from the schema.
//!
//! # Invariants
//! - Schema definitions are immutable once built.
//! - Entries are created only from validated answer sets.

pub mod answer;
pub mod entry;
pub mod examples;
pub mod field;
pub mod validation;
