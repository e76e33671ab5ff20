//! Structured storage failure channel.
//!
//! # Responsibility
//! - Turn swallowed storage failures into events a host can observe.
//! - Mirror each failure into the `log` facade as a metadata-only line.
//!
//! # Invariants
//! - Reporting never fails and never panics.
//! - Event messages describe the medium failure, never journal content.

use super::{StorageError, StorageFailureKind};
use log::warn;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex};

/// Persisted slot an operation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageSlot {
    Draft,
    Entries,
}

impl StorageSlot {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Entries => "entries",
        }
    }
}

/// Store operation that hit a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageOperation {
    Restore,
    Save,
    Clear,
    Exists,
    Append,
    List,
    Delete,
    ClearAll,
}

impl StorageOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Restore => "restore",
            Self::Save => "save",
            Self::Clear => "clear",
            Self::Exists => "exists",
            Self::Append => "append",
            Self::List => "list",
            Self::Delete => "delete",
            Self::ClearAll => "clear_all",
        }
    }
}

/// One swallowed storage failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    pub slot: StorageSlot,
    pub operation: StorageOperation,
    pub kind: StorageFailureKind,
    pub message: String,
}

impl Display for StorageEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} failed ({:?}): {}",
            self.slot.as_str(),
            self.operation.as_str(),
            self.kind,
            self.message
        )
    }
}

/// Subscriber for storage failure events.
pub trait StorageEventSink: Send + Sync {
    fn on_event(&self, event: &StorageEvent);
}

/// Sink that keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<StorageEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded events in arrival order.
    pub fn events(&self) -> Vec<StorageEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.events().is_empty()
    }
}

impl StorageEventSink for RecordingSink {
    fn on_event(&self, event: &StorageEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
    }
}

/// Fan-out list of subscribed sinks, shared by the stores of one form.
#[derive(Clone, Default)]
pub struct StorageEvents {
    sinks: Vec<Arc<dyn StorageEventSink>>,
}

impl StorageEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, sink: Arc<dyn StorageEventSink>) {
        self.sinks.push(sink);
    }

    /// Builder-style `subscribe`.
    pub fn with_sink(mut self, sink: Arc<dyn StorageEventSink>) -> Self {
        self.subscribe(sink);
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Logs one failure and delivers it to every sink.
    pub fn report(&self, slot: StorageSlot, operation: StorageOperation, err: &StorageError) {
        let event = StorageEvent {
            slot,
            operation,
            kind: err.kind(),
            message: err.to_string(),
        };
        warn!(
            "event=storage_failure module={} status=error operation={} kind={:?} error={}",
            slot.as_str(),
            operation.as_str(),
            event.kind,
            event.message
        );
        for sink in &self.sinks {
            sink.on_event(&event);
        }
    }
}

impl std::fmt::Debug for StorageEvents {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageEvents")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}
