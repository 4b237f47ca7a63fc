//! Console sink implementation

use crate::core::output_format::format_text;
use crate::core::{LogEvent, OutputFormat, Result, SeverityLevel, Sink, TimestampFormat};
use colored::Colorize;
use std::io::Write;

/// Writes one line per event to stdout, or stderr for Error and Fatal
pub struct ConsoleSink {
    use_colors: bool,
    timestamp_format: TimestampFormat,
    output_format: OutputFormat,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::with_colors(true)
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            timestamp_format: TimestampFormat::default(),
            output_format: OutputFormat::default(),
        }
    }

    /// Set the output format for this sink
    ///
    /// # Example
    ///
    /// ```
    /// use rust_structured_logger::sinks::ConsoleSink;
    /// use rust_structured_logger::OutputFormat;
    ///
    /// let sink = ConsoleSink::new().with_output_format(OutputFormat::Json);
    /// ```
    #[must_use]
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    fn render(&self, event: &LogEvent) -> String {
        match self.output_format {
            OutputFormat::Text if self.use_colors => {
                let label = format!("{:5}", event.level().to_str())
                    .color(event.level().color_code())
                    .to_string();
                format_text(event, &self.timestamp_format, &label)
            }
            _ => self.output_format.format(event, &self.timestamp_format),
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn emit(&self, event: &LogEvent) -> Result<()> {
        let line = self.render(event);
        match event.level() {
            SeverityLevel::Error | SeverityLevel::Fatal => {
                writeln!(std::io::stderr().lock(), "{}", line)?
            }
            _ => writeln!(std::io::stdout().lock(), "{}", line)?,
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MessageTemplate;
    use std::sync::Arc;

    #[test]
    fn test_plain_render_matches_text_format() {
        let sink = ConsoleSink::with_colors(false);
        let event = LogEvent::new(
            chrono::Utc::now(),
            SeverityLevel::Debug,
            Arc::new(MessageTemplate::parse("ready")),
            Vec::new(),
        );
        assert_eq!(
            sink.render(&event),
            OutputFormat::Text.format(&event, &TimestampFormat::default())
        );
    }

    #[test]
    fn test_json_render_ignores_colors() {
        let sink = ConsoleSink::new().with_output_format(OutputFormat::Json);
        let event = LogEvent::new(
            chrono::Utc::now(),
            SeverityLevel::Error,
            Arc::new(MessageTemplate::parse("failed")),
            Vec::new(),
        );
        let parsed: serde_json::Value = serde_json::from_str(&sink.render(&event)).unwrap();
        assert_eq!(parsed["level"], "ERROR");
    }
}
