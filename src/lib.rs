//! # Rust Structured Logger
//!
//! A structured logging pipeline built around message templates.
//!
//! ## Features
//!
//! - **Message Templates**: `"User {User} logged in from {Ip}"` keeps both the
//!   rendered text and the named values
//! - **Template Cache**: each distinct template is parsed once and shared
//! - **Enrichers**: attach context (thread, fixed properties, scoped context)
//! - **Fault-Isolating Sinks**: a failing sink never affects the caller or
//!   the other sinks; failures go to [`core::self_log`]
//! - **Background Delivery**: bounded-queue sink wrapper with overflow policies
//!
//! ## Quick Start
//!
//! ```
//! use rust_structured_logger::prelude::*;
//!
//! let memory = InMemorySink::new();
//! let logger = Logger::builder()
//!     .minimum_level(SeverityLevel::Debug)
//!     .sink(memory.clone())
//!     .build();
//!
//! logger.information("User {User} logged in from {Ip}", &[&"alice", &"10.0.0.1"]).unwrap();
//!
//! let events = memory.events();
//! assert_eq!(events[0].render_message(), "User \"alice\" logged in from \"10.0.0.1\"");
//! ```

pub mod core;
pub mod enrichers;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        AsDisplay, Capture, CaptureHint, ContextGuard, Enricher, LogContext, LogEvent,
        LogEventProperty, Logger, LoggerBuilder, LoggerError, OutputFormat, PropertyValue, Result,
        SeverityLevel, Sink, TimestampFormat,
    };
    pub use crate::enrichers::{FixedPropertyEnricher, ThreadEnricher};
    pub use crate::sinks::{BackgroundSink, InMemorySink, OverflowPolicy};

    #[cfg(feature = "console")]
    pub use crate::sinks::ConsoleSink;
    #[cfg(feature = "file")]
    pub use crate::sinks::FileSink;
    #[cfg(feature = "network")]
    pub use crate::sinks::NetworkSink;
}

pub use core::{
    AggregateSink, AsDisplay, Capture, CaptureHint, CapturedError, ContextGuard, Enricher, LogContext,
    LogEvent, LogEventProperty, Logger, LoggerBuilder, LoggerError, MessageTemplate,
    MessageTemplateRepository, OutputFormat, PipelineMetrics, PropertyFactory, PropertyToken,
    PropertyValue, RestrictedSink, Result, ScalarValue, SeverityLevel, Sink, TemplateToken,
    TimestampFormat,
};
