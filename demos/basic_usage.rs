//! Basic logger usage example
//!
//! Demonstrates message templates, console output and level filtering.
//!
//! Run with: cargo run --example basic_usage

use rust_structured_logger::prelude::*;
use rust_structured_logger::{info, warn};
use serde::Serialize;

#[derive(Serialize)]
struct Order {
    id: u64,
    customer: String,
    total: f64,
}

fn main() -> Result<()> {
    println!("=== Rust Structured Logger - Basic Usage Example ===\n");

    let logger = Logger::builder()
        .minimum_level(SeverityLevel::Verbose)
        .console_sink(SeverityLevel::Minimum)
        .enricher(ThreadEnricher)
        .fixed_property("Application", &"basic_usage")?
        .build();

    println!("1. Logging at different levels:");
    logger.verbose("This is a verbose message", &[])?;
    logger.debug("This is a debug message", &[])?;
    logger.information("This is an information message", &[])?;
    logger.warning("This is a warning message", &[])?;
    logger.error("This is an error message", &[])?;
    logger.fatal("This is a fatal message", &[])?;

    println!("\n2. Message templates:");
    logger.information("User {User} logged in from {Ip}", &[&"alice", &"10.0.0.1"])?;
    logger.information("Disk usage at {Percent:F1}%", &[&87.25])?;
    logger.information("{0} sent {1} bytes", &[&"upload-7", &4096])?;

    let order = Order {
        id: 1001,
        customer: "acme".to_string(),
        total: 99.5,
    };
    logger.information("Placed {@Order}", &[&order])?;
    logger.information("Placed {$Order}", &[&order])?;

    println!("\n3. Macros:");
    info!(logger, "Processed {Count} items", 100)?;
    warn!(logger, "Retry attempt {Attempt} of {Max}", 3, 5)?;

    println!("\n4. A stricter logger - verbose and debug are dropped:");
    let strict = Logger::builder()
        .minimum_level(SeverityLevel::Information)
        .console_sink(SeverityLevel::Minimum)
        .build();
    strict.verbose("Verbose message (hidden)", &[])?;
    strict.debug("Debug message (hidden)", &[])?;
    strict.information("Information message (visible)", &[])?;
    println!("   filtered events: {}", strict.metrics().events_filtered());

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
