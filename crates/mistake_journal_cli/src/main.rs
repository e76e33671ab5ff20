//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `mistake_journal_core` linkage without a presentation layer.
//! - Keep output deterministic for quick local sanity checks.

use mistake_journal_core::{FieldSchema, JournalConfig};

fn main() {
    let schema = FieldSchema::default();
    let config = JournalConfig::default();

    println!("mistake_journal_core ping={}", mistake_journal_core::ping());
    println!(
        "mistake_journal_core version={}",
        mistake_journal_core::core_version()
    );
    println!(
        "schema fields={} dated={}",
        schema.len(),
        schema.date_field().is_some()
    );
    println!(
        "storage draft_key={} entries_key={} max_entries={}",
        config.draft_key, config.entries_key, config.max_entries
    );
}
