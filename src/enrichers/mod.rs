//! Enricher implementations

pub mod fixed_property;
pub mod thread;

pub use fixed_property::FixedPropertyEnricher;
pub use thread::ThreadEnricher;

pub use crate::core::{Enricher, LogContext, PropertyFactory};
