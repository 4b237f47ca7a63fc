//! Log event structure

use super::message_template::MessageTemplate;
use super::property_value::{LogEventProperty, PropertyValue};
use super::severity_level::SeverityLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Snapshot of an error attached to an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedError {
    pub message: String,
    /// Messages of the `source()` chain, outermost first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<String>,
}

impl CapturedError {
    pub fn from_error(error: &(dyn std::error::Error + 'static)) -> Self {
        let mut sources = Vec::new();
        let mut current = error.source();
        while let Some(source) = current {
            sources.push(source.to_string());
            current = source.source();
        }
        Self {
            message: error.to_string(),
            sources,
        }
    }
}

impl std::fmt::Display for CapturedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        for source in &self.sources {
            write!(f, ": {}", source)?;
        }
        Ok(())
    }
}

/// A structured log event
///
/// Built once per accepted `log` call. Enrichers may add properties; after
/// enrichment the event is only ever seen by sinks through `&LogEvent`.
#[derive(Debug, Clone)]
pub struct LogEvent {
    timestamp: DateTime<Utc>,
    level: SeverityLevel,
    template: Arc<MessageTemplate>,
    properties: Vec<LogEventProperty>,
    error: Option<CapturedError>,
}

impl LogEvent {
    pub fn new(
        timestamp: DateTime<Utc>,
        level: SeverityLevel,
        template: Arc<MessageTemplate>,
        properties: Vec<LogEventProperty>,
    ) -> Self {
        let mut event = Self {
            timestamp,
            level,
            template,
            properties: Vec::with_capacity(properties.len()),
            error: None,
        };
        for property in properties {
            event.add_or_update_property(property);
        }
        event
    }

    pub fn with_error(mut self, error: CapturedError) -> Self {
        self.error = Some(error);
        self
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn level(&self) -> SeverityLevel {
        self.level
    }

    pub fn template(&self) -> &MessageTemplate {
        &self.template
    }

    /// Shared handle to the template, for sinks that retain it
    pub fn template_arc(&self) -> &Arc<MessageTemplate> {
        &self.template
    }

    /// Properties in the order they were first added
    pub fn properties(&self) -> &[LogEventProperty] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties
            .iter()
            .find(|p| p.name() == name)
            .map(LogEventProperty::value)
    }

    pub fn error(&self) -> Option<&CapturedError> {
        self.error.as_ref()
    }

    /// Add a property, replacing the value of an existing one with the same name
    pub fn add_or_update_property(&mut self, property: LogEventProperty) {
        match self.properties.iter_mut().find(|p| p.name() == property.name()) {
            Some(existing) => *existing = property,
            None => self.properties.push(property),
        }
    }

    /// Add a property unless one with the same name is already present
    pub fn add_property_if_absent(&mut self, property: LogEventProperty) {
        if self.property(property.name()).is_none() {
            self.properties.push(property);
        }
    }

    pub fn remove_property(&mut self, name: &str) -> Option<LogEventProperty> {
        let index = self.properties.iter().position(|p| p.name() == name)?;
        Some(self.properties.remove(index))
    }

    /// Render the message text from the template and the event's properties
    pub fn render_message(&self) -> String {
        self.template.render(&self.properties)
    }
}
