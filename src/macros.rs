//! Logging macros for call sites.
//!
//! The macros take the logger, a message template and the argument values,
//! and save writing `&[&a, &b]` by hand. They return the `Result` of the
//! underlying `Logger::log` call.
//!
//! # Examples
//!
//! ```
//! use rust_structured_logger::prelude::*;
//! use rust_structured_logger::info;
//!
//! let logger = Logger::builder().sink(InMemorySink::new()).build();
//!
//! info!(logger, "Server started").unwrap();
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {Port}", port).unwrap();
//!
//! let user_id = 42;
//! let action = "login";
//! info!(logger, "User {UserId} performed {Action}", user_id, action).unwrap();
//! ```

/// Log at an explicit level.
///
/// # Examples
///
/// ```
/// # use rust_structured_logger::prelude::*;
/// # let logger = Logger::builder().build();
/// use rust_structured_logger::log;
/// log!(logger, SeverityLevel::Information, "Simple message").unwrap();
/// log!(logger, SeverityLevel::Error, "Error code: {Code}", 500).unwrap();
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $logger.log($level, $template, &[$(&$arg as &dyn $crate::Capture),*])
    };
}

#[macro_export]
macro_rules! verbose {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::SeverityLevel::Verbose, $($rest)+)
    };
}

/// Log at `Debug`.
///
/// ```
/// # use rust_structured_logger::prelude::*;
/// # let logger = Logger::builder().minimum_level(SeverityLevel::Debug).build();
/// use rust_structured_logger::debug;
/// debug!(logger, "Counter value: {Value}", 10).unwrap();
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::SeverityLevel::Debug, $($rest)+)
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::SeverityLevel::Information, $($rest)+)
    };
}

/// Log at `Warning`.
///
/// ```
/// # use rust_structured_logger::prelude::*;
/// # let logger = Logger::builder().build();
/// use rust_structured_logger::warn;
/// warn!(logger, "Retry attempt {Attempt} of {Max}", 3, 5).unwrap();
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::SeverityLevel::Warning, $($rest)+)
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::SeverityLevel::Error, $($rest)+)
    };
}

#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::SeverityLevel::Fatal, $($rest)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Logger, PropertyValue, SeverityLevel};
    use crate::sinks::InMemorySink;

    fn logger(sink: &InMemorySink) -> Logger {
        Logger::builder()
            .minimum_level(SeverityLevel::Verbose)
            .sink(sink.clone())
            .build()
    }

    #[test]
    fn test_log_macro() {
        let sink = InMemorySink::new();
        let logger = logger(&sink);
        log!(logger, SeverityLevel::Information, "Test message").unwrap();
        log!(logger, SeverityLevel::Information, "Formatted: {Value}", 42).unwrap();

        assert_eq!(sink.messages(), vec!["Test message", "Formatted: 42"]);
    }

    #[test]
    fn test_level_macros() {
        let sink = InMemorySink::new();
        let logger = logger(&sink);
        verbose!(logger, "v").unwrap();
        debug!(logger, "d").unwrap();
        info!(logger, "i").unwrap();
        warn!(logger, "w").unwrap();
        error!(logger, "e").unwrap();
        fatal!(logger, "f").unwrap();

        let levels: Vec<SeverityLevel> = sink.events().iter().map(|e| e.level()).collect();
        assert_eq!(levels, SeverityLevel::REAL_LEVELS.to_vec());
    }

    #[test]
    fn test_mixed_argument_types() {
        let sink = InMemorySink::new();
        let logger = logger(&sink);
        let tags = vec!["a", "b"];
        warn!(logger, "Retry {Attempt} of {Max} for {Tags}", 1, 3u8, tags,).unwrap();

        let event = &sink.events()[0];
        assert_eq!(event.property("Attempt"), Some(&PropertyValue::from(1i64)));
        assert_eq!(event.render_message(), "Retry 1 of 3 for [\"a\", \"b\"]");
    }
}
