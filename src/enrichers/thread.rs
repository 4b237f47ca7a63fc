//! Enricher that records the logging thread

use crate::core::{Enricher, LogEvent, LogEventProperty, PropertyFactory, Result};
use std::cell::RefCell;

// Thread-local caches for thread information to avoid repeated allocations
thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
    static THREAD_NAME_CACHE: RefCell<Option<Option<String>>> = const { RefCell::new(None) };
}

fn current_thread_id() -> String {
    THREAD_ID_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| format!("{:?}", std::thread::current().id()))
            .clone()
    })
}

fn current_thread_name() -> Option<String> {
    THREAD_NAME_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| std::thread::current().name().map(String::from))
            .clone()
    })
}

/// Adds `ThreadId` and, for named threads, `ThreadName`
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadEnricher;

impl Enricher for ThreadEnricher {
    fn enrich(&self, event: &mut LogEvent, _factory: &PropertyFactory) -> Result<()> {
        event.add_property_if_absent(LogEventProperty::new("ThreadId", current_thread_id())?);
        if let Some(name) = current_thread_name() {
            event.add_property_if_absent(LogEventProperty::new("ThreadName", name)?);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "thread"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MessageTemplate, SeverityLevel};
    use std::sync::Arc;

    fn enrich_on_current_thread() -> LogEvent {
        let mut event = LogEvent::new(
            chrono::Utc::now(),
            SeverityLevel::Information,
            Arc::new(MessageTemplate::parse("tick")),
            Vec::new(),
        );
        ThreadEnricher.enrich(&mut event, &PropertyFactory).unwrap();
        event
    }

    #[test]
    fn test_named_thread() {
        let event = std::thread::Builder::new()
            .name("worker-7".to_string())
            .spawn(enrich_on_current_thread)
            .unwrap()
            .join()
            .unwrap();

        assert_eq!(event.property("ThreadName").and_then(|v| v.as_str()), Some("worker-7"));
        assert!(event.property("ThreadId").is_some());
    }

    #[test]
    fn test_ids_differ_between_threads() {
        let here = enrich_on_current_thread();
        let there = std::thread::spawn(enrich_on_current_thread).join().unwrap();
        assert_ne!(here.property("ThreadId"), there.property("ThreadId"));
    }
}
