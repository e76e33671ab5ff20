//! Persistence layer over the key/value storage medium.
//!
//! # Responsibility
//! - Own the draft slot and the entry collection slot.
//! - Isolate JSON encoding and storage failure handling from the form
//!   controller.
//!
//! # Invariants
//! - Store APIs never return storage errors; failures are reported on the
//!   storage event channel and degrade to safe defaults.

pub mod debounce;
pub mod draft_store;
pub mod entry_store;
