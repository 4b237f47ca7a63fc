//! File sink implementation

use crate::core::{LogEvent, LoggerError, OutputFormat, Result, Sink, TimestampFormat};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends one line per event to a file.
///
/// Output is buffered; call `flush` (or drop the sink) to push it to disk.
pub struct FileSink {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
    timestamp_format: TimestampFormat,
    output_format: OutputFormat,
}

impl FileSink {
    /// Open `path` for appending, creating it and its parent directories
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                LoggerError::io_operation("creating log directory", parent.display().to_string(), e)
            })?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::io_operation("opening log file", path.display().to_string(), e)
            })?;

        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path,
            timestamp_format: TimestampFormat::default(),
            output_format: OutputFormat::default(),
        })
    }

    /// Set the output format for this sink
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use rust_structured_logger::sinks::FileSink;
    /// use rust_structured_logger::{OutputFormat, TimestampFormat};
    ///
    /// let sink = FileSink::new("/var/log/app.jsonl")
    ///     .unwrap()
    ///     .with_output_format(OutputFormat::Json)
    ///     .with_timestamp_format(TimestampFormat::UnixMillis);
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

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn emit(&self, event: &LogEvent) -> Result<()> {
        let mut line = self.output_format.format(event, &self.timestamp_format);
        line.push('\n');
        self.writer.lock().write_all(line.as_bytes())?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        let _ = self.writer.get_mut().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogEventProperty, MessageTemplate, SeverityLevel};
    use std::sync::Arc;
    use tempfile::tempdir;

    fn event(message: &str) -> LogEvent {
        LogEvent::new(
            chrono::Utc::now(),
            SeverityLevel::Information,
            Arc::new(MessageTemplate::parse("Order {OrderId} {Status}")),
            vec![
                LogEventProperty::new("OrderId", 17).unwrap(),
                LogEventProperty::new("Status", message).unwrap(),
            ],
        )
    }

    #[test]
    fn test_writes_text_lines() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("app.log");
        let sink = FileSink::new(&path).unwrap();

        sink.emit(&event("shipped")).unwrap();
        sink.emit(&event("delivered")).unwrap();
        sink.flush().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Order 17 \"shipped\""));
        assert!(lines[1].contains("[INFO ]"));
    }

    #[test]
    fn test_writes_json_lines() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("app.jsonl");
        let sink = FileSink::new(&path).unwrap().with_output_format(OutputFormat::Json);

        sink.emit(&event("shipped")).unwrap();
        drop(sink);

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(content.trim_end()).unwrap();
        assert_eq!(parsed["properties"]["OrderId"], 17);
        assert_eq!(parsed["properties"]["Status"], "shipped");
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("nested/deeper/app.log");
        let sink = FileSink::new(&path).unwrap();
        assert_eq!(sink.path(), path.as_path());
        assert!(path.exists());
    }

    #[test]
    fn test_appends_to_existing_file() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("app.log");
        std::fs::write(&path, "existing\n").unwrap();

        let sink = FileSink::new(&path).unwrap();
        sink.emit(&event("new")).unwrap();
        drop(sink);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("existing\n"));
        assert_eq!(content.lines().count(), 2);
    }
}
