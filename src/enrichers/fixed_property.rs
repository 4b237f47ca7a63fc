//! Enricher that attaches the same properties to every event

use crate::core::{
    Capture, CaptureHint, Enricher, LogEvent, LogEventProperty, PropertyFactory, Result,
};

/// Adds a fixed set of properties, captured once at construction.
///
/// Properties already on the event are left untouched.
#[derive(Debug, Clone)]
pub struct FixedPropertyEnricher {
    properties: Vec<LogEventProperty>,
}

impl FixedPropertyEnricher {
    pub fn new(properties: Vec<LogEventProperty>) -> Self {
        Self { properties }
    }

    /// Capture a single value; records are kept structured
    pub fn capture(name: &str, value: &dyn Capture) -> Result<Self> {
        let property = LogEventProperty::capture(name, value, CaptureHint::Structure)?;
        Ok(Self::new(vec![property]))
    }
}

impl Enricher for FixedPropertyEnricher {
    fn enrich(&self, event: &mut LogEvent, _factory: &PropertyFactory) -> Result<()> {
        for property in &self.properties {
            event.add_property_if_absent(property.clone());
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "fixed_property"
    }
}
