//! Enricher trait for adding contextual properties to events

use super::{
    error::Result,
    log_event::LogEvent,
    message_template::CaptureHint,
    property_value::{Capture, LogEventProperty},
};

/// Creates properties for enrichers, capturing values the same way the
/// logger captures template arguments.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertyFactory;

impl PropertyFactory {
    /// Capture `value` under `name`; `structure` requests record capture
    /// like the `@` template prefix.
    pub fn create_property(
        &self,
        name: &str,
        value: &dyn Capture,
        structure: bool,
    ) -> Result<LogEventProperty> {
        let hint = if structure {
            CaptureHint::Structure
        } else {
            CaptureHint::Default
        };
        LogEventProperty::capture(name, value, hint)
    }
}

/// Adds properties to events before they reach the sinks.
///
/// Enrichers run on the logging thread, one after another in registration
/// order, and may read what earlier enrichers added. An error returned here
/// aborts the `log` call and is handed back to its caller.
///
/// # Example
///
/// ```
/// use rust_structured_logger::core::{Enricher, LogEvent, PropertyFactory, Result};
///
/// struct ServiceName;
///
/// impl Enricher for ServiceName {
///     fn enrich(&self, event: &mut LogEvent, factory: &PropertyFactory) -> Result<()> {
///         event.add_property_if_absent(factory.create_property("Service", &"billing", false)?);
///         Ok(())
///     }
/// }
/// ```
pub trait Enricher: Send + Sync {
    fn enrich(&self, event: &mut LogEvent, factory: &PropertyFactory) -> Result<()>;

    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PropertyValue;

    #[test]
    fn test_factory_captures_values() {
        let factory = PropertyFactory;
        let prop = factory.create_property("Count", &3, false).unwrap();
        assert_eq!(prop.value(), &PropertyValue::from(3i64));

        let prop = factory.create_property("Tags", &vec!["a", "b"], true).unwrap();
        assert!(matches!(prop.value(), PropertyValue::Sequence(_)));
    }

    #[test]
    fn test_factory_rejects_empty_name() {
        assert!(PropertyFactory.create_property("", &1, false).is_err());
    }
}
