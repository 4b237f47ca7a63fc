//! Sink that keeps events in memory

use crate::core::{LogEvent, Result, Sink};
use parking_lot::Mutex;
use std::sync::Arc;

/// Collects every event it receives.
///
/// Clones share the same buffer, so a clone can be handed to a logger
/// while the original is kept for inspection.
#[derive(Debug, Clone, Default)]
pub struct InMemorySink {
    events: Arc<Mutex<Vec<LogEvent>>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the events received so far
    pub fn events(&self) -> Vec<LogEvent> {
        self.events.lock().clone()
    }

    /// Rendered messages, in arrival order
    pub fn messages(&self) -> Vec<String> {
        self.events.lock().iter().map(LogEvent::render_message).collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl Sink for InMemorySink {
    fn emit(&self, event: &LogEvent) -> Result<()> {
        self.events.lock().push(event.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
