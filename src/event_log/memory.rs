use super::event::DebateEvent;
use super::{EventLogError, EventSink};

/// Keeps events in memory; useful for embedding and tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryEventLog {
    events: Vec<DebateEvent>,
}

impl MemoryEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[DebateEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<DebateEvent> {
        self.events
    }
}

impl EventSink for MemoryEventLog {
    fn record(&mut self, event: &DebateEvent) -> Result<(), EventLogError> {
        self.events.push(event.clone());
        Ok(())
    }
}
