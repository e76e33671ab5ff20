//! Form-level use-case services.
//!
//! # Responsibility
//! - Orchestrate validation and the draft/entry stores for the
//!   presentation layer.
//! - Keep presentation code decoupled from storage details.

pub mod entry_listing;
pub mod journal_form;
pub mod read_only;
