//! Core pipeline types and traits

pub mod enricher;
pub mod error;
pub mod log_context;
pub mod log_event;
pub mod logger;
pub mod message_template;
pub mod metrics;
pub mod output_format;
pub mod property_value;
pub mod self_log;
pub mod severity_level;
pub mod sink;
pub mod template_repository;
pub mod timestamp;

pub use enricher::{Enricher, PropertyFactory};
pub use error::{LoggerError, Result};
pub use log_context::{ContextGuard, LogContext};
pub use log_event::{CapturedError, LogEvent};
pub use logger::{Logger, LoggerBuilder};
pub use message_template::{CaptureHint, MessageTemplate, PropertyToken, TemplateToken};
pub use metrics::PipelineMetrics;
pub use output_format::OutputFormat;
pub use property_value::{AsDisplay, Capture, LogEventProperty, PropertyValue, ScalarValue};
pub use severity_level::SeverityLevel;
pub use sink::{AggregateSink, RestrictedSink, Sink};
pub use template_repository::MessageTemplateRepository;
pub use timestamp::TimestampFormat;
