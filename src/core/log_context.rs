//! Shared context properties applied to every event
//!
//! This module provides:
//! - `LogContext`: a thread-safe set of properties that doubles as an enricher
//! - `ContextGuard`: RAII guard for a property scoped to the current thread

use super::{
    enricher::{Enricher, PropertyFactory},
    error::Result,
    log_event::LogEvent,
    message_template::CaptureHint,
    property_value::{Capture, LogEventProperty, PropertyValue},
};
use parking_lot::RwLock;
use std::cell::RefCell;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_CONTEXT_ID: AtomicU64 = AtomicU64::new(1);
static NEXT_GUARD_ID: AtomicU64 = AtomicU64::new(1);

struct ScopedProperty {
    context_id: u64,
    guard_id: u64,
    property: LogEventProperty,
}

thread_local! {
    // Pushed properties of every context on this thread, oldest first
    static SCOPED: RefCell<Vec<ScopedProperty>> = const { RefCell::new(Vec::new()) };
}

/// Properties attached to every event passing through a logger that has
/// this context registered as an enricher.
///
/// Two kinds of property are combined:
/// - properties set with [`LogContext::set`] are shared by all threads;
/// - properties pushed with [`LogContext::push_property`] are visible only
///   on the pushing thread, until the returned guard is dropped. The most
///   recent push of a name wins over older pushes and over `set`.
///
/// Properties already present on the event (for example bound from the
/// message template) take priority over context properties.
///
/// Clones share the same shared set and the same scoped properties.
///
/// # Example
///
/// ```
/// use rust_structured_logger::core::LogContext;
///
/// let ctx = LogContext::new();
/// ctx.set("Service", "api-gateway").unwrap();
///
/// {
///     let _guard = ctx.push_property("RequestId", &"abc-123").unwrap();
///     assert_eq!(ctx.len(), 2);
/// }
/// // RequestId removed here
/// assert_eq!(ctx.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct LogContext {
    id: u64,
    properties: Arc<RwLock<Vec<LogEventProperty>>>,
}

impl Default for LogContext {
    fn default() -> Self {
        Self {
            id: NEXT_CONTEXT_ID.fetch_add(1, Ordering::Relaxed),
            properties: Arc::default(),
        }
    }
}

impl LogContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a shared property, overwriting any existing value
    pub fn set(&self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Result<()> {
        let property = LogEventProperty::new(name, value)?;
        let mut properties = self.properties.write();
        match properties.iter_mut().find(|p| p.name() == property.name()) {
            Some(existing) => *existing = property,
            None => properties.push(property),
        }
        Ok(())
    }

    /// Set a property on the current thread until the returned guard is
    /// dropped.
    ///
    /// Dropping the guard removes exactly this push. Other pushes of the same
    /// name, dropped earlier or later, are unaffected.
    pub fn push_property(&self, name: &str, value: &dyn Capture) -> Result<ContextGuard> {
        let property = LogEventProperty::capture(name, value, CaptureHint::Default)?;
        let guard_id = NEXT_GUARD_ID.fetch_add(1, Ordering::Relaxed);
        SCOPED.with(|scoped| {
            scoped.borrow_mut().push(ScopedProperty {
                context_id: self.id,
                guard_id,
                property,
            })
        });
        Ok(ContextGuard {
            guard_id,
            _not_send: PhantomData,
        })
    }

    /// Remove a shared property. Pushed properties stay until their guards drop.
    pub fn remove(&self, name: &str) {
        self.properties.write().retain(|p| p.name() != name);
    }

    /// Remove all shared properties
    pub fn clear(&self) {
        self.properties.write().clear();
    }

    /// Value visible on the current thread
    pub fn get(&self, name: &str) -> Option<PropertyValue> {
        let scoped = SCOPED.with(|scoped| {
            scoped
                .borrow()
                .iter()
                .rev()
                .find(|s| s.context_id == self.id && s.property.name() == name)
                .map(|s| s.property.value().clone())
        });
        scoped.or_else(|| {
            self.properties
                .read()
                .iter()
                .find(|p| p.name() == name)
                .map(|p| p.value().clone())
        })
    }

    /// Properties visible on the current thread, one per name: the newest
    /// pushes first, then shared properties not shadowed by a push
    pub fn snapshot(&self) -> Vec<LogEventProperty> {
        let mut visible: Vec<LogEventProperty> = Vec::new();
        SCOPED.with(|scoped| {
            for s in scoped.borrow().iter().rev() {
                if s.context_id == self.id && visible.iter().all(|p| p.name() != s.property.name()) {
                    visible.push(s.property.clone());
                }
            }
        });
        for property in self.properties.read().iter() {
            if visible.iter().all(|p| p.name() != property.name()) {
                visible.push(property.clone());
            }
        }
        visible
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Enricher for LogContext {
    fn enrich(&self, event: &mut LogEvent, _factory: &PropertyFactory) -> Result<()> {
        for property in self.snapshot() {
            event.add_property_if_absent(property);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "log_context"
    }
}

/// Undoes one [`LogContext::push_property`] when dropped.
///
/// Tied to the thread that pushed the property.
pub struct ContextGuard {
    guard_id: u64,
    _not_send: PhantomData<*const ()>,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        // the thread-local may already be gone during thread teardown
        let _ = SCOPED.try_with(|scoped| {
            scoped.borrow_mut().retain(|s| s.guard_id != self.guard_id);
        });
    }
}
