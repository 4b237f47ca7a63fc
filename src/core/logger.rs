//! Main logger implementation

use super::{
    enricher::{Enricher, PropertyFactory},
    error::{LoggerError, Result},
    log_event::{CapturedError, LogEvent},
    message_template::MessageTemplate,
    metrics::PipelineMetrics,
    property_value::{Capture, LogEventProperty},
    sink::{AggregateSink, RestrictedSink, Sink},
    severity_level::SeverityLevel,
    template_repository::MessageTemplateRepository,
};
use std::sync::Arc;

/// The logging pipeline.
///
/// A `Logger` is immutable once built: its minimum level, enrichers and
/// sinks are fixed. Share it between threads with `Arc<Logger>`; every
/// `log` call runs the whole pipeline synchronously on the calling thread.
pub struct Logger {
    repository: Arc<MessageTemplateRepository>,
    minimum_level: SeverityLevel,
    sink: AggregateSink,
    enrichers: Vec<Box<dyn Enricher>>,
    metrics: Arc<PipelineMetrics>,
}

impl Logger {
    /// Assemble a pipeline. Each sink may carry its own minimum level.
    pub fn new(
        repository: Arc<MessageTemplateRepository>,
        minimum_level: SeverityLevel,
        sinks: Vec<(Box<dyn Sink>, Option<SeverityLevel>)>,
        enrichers: Vec<Box<dyn Enricher>>,
    ) -> Self {
        let metrics = Arc::new(PipelineMetrics::new());
        let sinks = sinks
            .into_iter()
            .map(|(sink, restriction)| match restriction {
                Some(level) if level > SeverityLevel::Minimum => {
                    Box::new(RestrictedSink::new(sink, level)) as Box<dyn Sink>
                }
                _ => sink,
            })
            .collect();

        Self {
            repository,
            minimum_level,
            sink: AggregateSink::with_metrics(sinks, Arc::clone(&metrics)),
            enrichers,
            metrics,
        }
    }

    /// A logger that accepts nothing
    #[must_use]
    pub fn silent() -> Self {
        Self::new(
            Arc::new(MessageTemplateRepository::new()),
            SeverityLevel::Maximum,
            Vec::new(),
            Vec::new(),
        )
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    #[inline]
    pub fn minimum_level(&self) -> SeverityLevel {
        self.minimum_level
    }

    #[inline]
    pub fn is_enabled(&self, level: SeverityLevel) -> bool {
        level.is_enabled(self.minimum_level)
    }

    pub fn repository(&self) -> &Arc<MessageTemplateRepository> {
        &self.repository
    }

    pub fn metrics(&self) -> &PipelineMetrics {
        &self.metrics
    }

    /// Write an event built from `template` and `args`.
    ///
    /// Returns an error only when an enricher fails. Sink failures are
    /// reported through `self_log` and never reach the caller.
    pub fn log(&self, level: SeverityLevel, template: &str, args: &[&dyn Capture]) -> Result<()> {
        self.write(level, None, template, args)
    }

    /// Like [`Logger::log`], attaching a snapshot of `error` to the event
    pub fn log_error(
        &self,
        level: SeverityLevel,
        error: &(dyn std::error::Error + 'static),
        template: &str,
        args: &[&dyn Capture],
    ) -> Result<()> {
        self.write(level, Some(error), template, args)
    }

    fn write(
        &self,
        level: SeverityLevel,
        error: Option<&(dyn std::error::Error + 'static)>,
        template: &str,
        args: &[&dyn Capture],
    ) -> Result<()> {
        if !self.is_enabled(level) {
            self.metrics.record_filtered();
            return Ok(());
        }

        let template = self.repository.parse_or_get(template);
        let properties = bind_properties(&template, args);
        let mut event = LogEvent::new(chrono::Utc::now(), level, template, properties);
        if let Some(error) = error {
            event = event.with_error(CapturedError::from_error(error));
        }

        let factory = PropertyFactory;
        for enricher in &self.enrichers {
            if let Err(e) = enricher.enrich(&mut event, &factory) {
                self.metrics.record_enricher_failure();
                return Err(LoggerError::enricher(enricher.name(), e));
            }
        }

        self.metrics.record_emitted();
        self.sink.emit(&event);
        Ok(())
    }

    /// Flush every sink. Failures are reported through `self_log`.
    pub fn flush(&self) {
        self.sink.flush();
    }

    #[inline]
    pub fn verbose(&self, template: &str, args: &[&dyn Capture]) -> Result<()> {
        self.log(SeverityLevel::Verbose, template, args)
    }

    #[inline]
    pub fn debug(&self, template: &str, args: &[&dyn Capture]) -> Result<()> {
        self.log(SeverityLevel::Debug, template, args)
    }

    #[inline]
    pub fn information(&self, template: &str, args: &[&dyn Capture]) -> Result<()> {
        self.log(SeverityLevel::Information, template, args)
    }

    #[inline]
    pub fn warning(&self, template: &str, args: &[&dyn Capture]) -> Result<()> {
        self.log(SeverityLevel::Warning, template, args)
    }

    #[inline]
    pub fn error(&self, template: &str, args: &[&dyn Capture]) -> Result<()> {
        self.log(SeverityLevel::Error, template, args)
    }

    #[inline]
    pub fn fatal(&self, template: &str, args: &[&dyn Capture]) -> Result<()> {
        self.log(SeverityLevel::Fatal, template, args)
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.sink.flush();
    }
}

/// Bind call-site arguments to the template's property tokens.
///
/// Positional templates bind `{n}` to `args[n]`. Otherwise each distinct
/// property name takes the next argument in template order. Tokens left
/// without an argument stay unbound; surplus arguments are ignored.
fn bind_properties(template: &MessageTemplate, args: &[&dyn Capture]) -> Vec<LogEventProperty> {
    let mut properties: Vec<LogEventProperty> = Vec::new();
    if args.is_empty() {
        return properties;
    }

    let positional = template.is_positional();
    let mut next_arg = args.iter();

    for token in template.property_tokens() {
        if properties.iter().any(|p| p.name() == token.name()) {
            continue;
        }
        let arg = if positional {
            token.position().and_then(|idx| args.get(idx))
        } else {
            next_arg.next()
        };
        let Some(arg) = arg else {
            if positional {
                continue;
            }
            break;
        };
        // names produced by the parser are never empty
        if let Ok(property) = LogEventProperty::capture(token.name(), *arg, token.hint()) {
            properties.push(property);
        }
    }
    properties
}

/// Builder for constructing a [`Logger`] with a fluent API
///
/// # Example
/// ```
/// use rust_structured_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .minimum_level(SeverityLevel::Debug)
///     .sink(InMemorySink::new())
///     .enricher(ThreadEnricher)
///     .build();
///
/// logger.information("Started in {Elapsed} ms", &[&42]).unwrap();
/// ```
pub struct LoggerBuilder {
    minimum_level: SeverityLevel,
    sinks: Vec<(Box<dyn Sink>, Option<SeverityLevel>)>,
    enrichers: Vec<Box<dyn Enricher>>,
    repository: Option<Arc<MessageTemplateRepository>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values (minimum level Information)
    pub fn new() -> Self {
        Self {
            minimum_level: SeverityLevel::Information,
            sinks: Vec::new(),
            enrichers: Vec::new(),
            repository: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn minimum_level(mut self, level: SeverityLevel) -> Self {
        self.minimum_level = level;
        self
    }

    /// Add a sink that receives every event the logger accepts
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sinks.push((Box::new(sink), None));
        self
    }

    /// Add a sink that only receives events at or above `minimum_level`
    #[must_use = "builder methods return a new value"]
    pub fn restricted_sink<S: Sink + 'static>(mut self, sink: S, minimum_level: SeverityLevel) -> Self {
        self.sinks.push((Box::new(sink), Some(minimum_level)));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn enricher<E: Enricher + 'static>(mut self, enricher: E) -> Self {
        self.enrichers.push(Box::new(enricher));
        self
    }

    /// Attach the same property to every event. Fails if `name` is empty.
    pub fn fixed_property<V: Capture>(self, name: &str, value: &V) -> Result<Self> {
        let enricher = crate::enrichers::FixedPropertyEnricher::capture(name, value)?;
        Ok(self.enricher(enricher))
    }

    /// Share a template cache with other loggers
    #[must_use = "builder methods return a new value"]
    pub fn repository(mut self, repository: Arc<MessageTemplateRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    #[cfg(feature = "console")]
    #[must_use = "builder methods return a new value"]
    pub fn console_sink(self, restricted_to: SeverityLevel) -> Self {
        self.restricted_sink(crate::sinks::ConsoleSink::new(), restricted_to)
    }

    /// Append events to the file at `path`
    #[cfg(feature = "file")]
    pub fn file_sink(
        self,
        path: impl Into<std::path::PathBuf>,
        restricted_to: SeverityLevel,
    ) -> Result<Self> {
        let sink = crate::sinks::FileSink::new(path)?;
        Ok(self.restricted_sink(sink, restricted_to))
    }

    /// Stream JSON events to a TCP endpoint
    #[cfg(feature = "network")]
    pub fn network_sink(self, address: &str, restricted_to: SeverityLevel) -> Result<Self> {
        let sink = crate::sinks::NetworkSink::new(address)?;
        Ok(self.restricted_sink(sink, restricted_to))
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let repository = self
            .repository
            .unwrap_or_else(|| Arc::new(MessageTemplateRepository::new()));
        Logger::new(repository, self.minimum_level, self.sinks, self.enrichers)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
