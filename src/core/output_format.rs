//! Output format configuration for log events
//!
//! - Text: `[2025-01-08T10:30:45.123Z] [INFO ] User "alice" logged in (Service="api")`
//! - Json: one JSON object per event with the template, rendered message,
//!   properties and captured error

use super::log_event::LogEvent;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    /// Format an event as a single line (no trailing newline)
    pub fn format(&self, event: &LogEvent, timestamp_format: &TimestampFormat) -> String {
        match self {
            OutputFormat::Text => format_text(event, timestamp_format, event.level().to_str()),
            OutputFormat::Json => format_json(event, timestamp_format),
        }
    }
}

/// Text line with a caller-supplied level label (e.g. colorized)
pub(crate) fn format_text(
    event: &LogEvent,
    timestamp_format: &TimestampFormat,
    level_label: &str,
) -> String {
    let mut line = format!(
        "[{}] [{:5}] {}",
        timestamp_format.format(&event.timestamp()),
        level_label,
        sanitize_message(&event.render_message())
    );

    // properties that the template does not mention
    let template = event.template();
    let extra: Vec<String> = event
        .properties()
        .iter()
        .filter(|p| template.property_tokens().all(|t| t.name() != p.name()))
        .map(|p| format!("{}={}", p.name(), p.value()))
        .collect();
    if !extra.is_empty() {
        line.push_str(" (");
        line.push_str(&sanitize_message(&extra.join(", ")));
        line.push(')');
    }

    if let Some(error) = event.error() {
        line.push_str(" | error: ");
        line.push_str(&sanitize_message(&error.to_string()));
    }

    line
}

fn format_json(event: &LogEvent, timestamp_format: &TimestampFormat) -> String {
    serde_json::to_string(&to_json(event, timestamp_format)).unwrap_or_default()
}

/// JSON object for an event
pub fn to_json(event: &LogEvent, timestamp_format: &TimestampFormat) -> serde_json::Value {
    let mut json_obj = serde_json::Map::new();

    json_obj.insert(
        "timestamp".to_string(),
        timestamp_format.to_json_value(&event.timestamp()),
    );
    json_obj.insert(
        "level".to_string(),
        serde_json::Value::String(event.level().to_str().to_string()),
    );
    json_obj.insert(
        "template".to_string(),
        serde_json::Value::String(event.template().text().to_string()),
    );
    json_obj.insert(
        "message".to_string(),
        serde_json::Value::String(event.render_message()),
    );

    if !event.properties().is_empty() {
        let properties = event
            .properties()
            .iter()
            .map(|p| (p.name().to_string(), p.value().to_json_value()))
            .collect();
        json_obj.insert("properties".to_string(), serde_json::Value::Object(properties));
    }

    if let Some(error) = event.error() {
        json_obj.insert(
            "error".to_string(),
            serde_json::to_value(error).unwrap_or(serde_json::Value::Null),
        );
    }

    serde_json::Value::Object(json_obj)
}

/// Escape line breaks and tabs so one event is always one line
fn sanitize_message(message: &str) -> String {
    message
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CapturedError, LogEventProperty, MessageTemplate, SeverityLevel};
    use std::sync::Arc;

    fn event(template: &str, props: Vec<(&str, &str)>) -> LogEvent {
        LogEvent::new(
            chrono::Utc::now(),
            SeverityLevel::Warning,
            Arc::new(MessageTemplate::parse(template)),
            props
                .into_iter()
                .map(|(k, v)| LogEventProperty::new(k, v).unwrap())
                .collect(),
        )
    }

    #[test]
    fn test_text_format() {
        let e = event("User {User} logged in", vec![("User", "alice"), ("Service", "api")]);
        let line = OutputFormat::Text.format(&e, &TimestampFormat::Iso8601);

        assert!(line.contains("[WARN ]"));
        assert!(line.contains("User \"alice\" logged in"));
        assert!(line.ends_with("(Service=\"api\")"));
    }

    #[test]
    fn test_text_format_escapes_newlines() {
        let e = event("{Input:l}", vec![("Input", "line1\nERROR fake entry")]);
        let line = OutputFormat::Text.format(&e, &TimestampFormat::Iso8601);
        assert!(!line.contains('\n'));
        assert!(line.contains("line1\\nERROR fake entry"));
    }

    #[test]
    fn test_text_format_with_error() {
        let e = event("failed", vec![]).with_error(CapturedError {
            message: "connection reset".to_string(),
            sources: vec![],
        });
        let line = OutputFormat::Text.format(&e, &TimestampFormat::Iso8601);
        assert!(line.ends_with("| error: connection reset"));
    }

    #[test]
    fn test_json_format() {
        let e = event("User {User} logged in", vec![("User", "alice")]);
        let line = OutputFormat::Json.format(&e, &TimestampFormat::UnixMillis);

        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["level"], "WARN");
        assert_eq!(parsed["template"], "User {User} logged in");
        assert_eq!(parsed["message"], "User \"alice\" logged in");
        assert_eq!(parsed["properties"]["User"], "alice");
        assert!(parsed["timestamp"].is_number());
        assert!(parsed.get("error").is_none());
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
    }
}
