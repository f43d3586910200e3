//! Append-only JSONL record of a debate run.
//!
//! One self-contained JSON object per line. The run's history can be
//! rebuilt from the file alone, see [`replay`].

use std::path::Path;

use thiserror::Error;

#[path = "event_log/event.rs"]
mod event;

#[path = "event_log/jsonl.rs"]
mod jsonl;

#[path = "event_log/memory.rs"]
mod memory;

#[path = "event_log/replay.rs"]
mod replay;

pub use event::{DebateEvent, RunModels, TurnRecord};
pub use jsonl::JsonlEventLog;
pub use memory::MemoryEventLog;
pub use replay::{read_events, reconstruct, replay_file, ReplayedRun};

#[derive(Debug, Error)]
pub enum EventLogError {
    #[error("event log IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("event serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("malformed event log at line {line}: {message}")]
    Malformed { line: usize, message: String },
}

/// Destination for debate events.
///
/// `record` must not return before the event is durably stored.
pub trait EventSink: Send {
    fn record(&mut self, event: &DebateEvent) -> Result<(), EventLogError>;

    /// Where the events end up, if they end up in a file.
    fn location(&self) -> Option<&Path> {
        None
    }
}

impl<T: EventSink + ?Sized> EventSink for Box<T> {
    fn record(&mut self, event: &DebateEvent) -> Result<(), EventLogError> {
        (**self).record(event)
    }

    fn location(&self) -> Option<&Path> {
        (**self).location()
    }
}
