//! File logging example
//!
//! Writes the same events as text and as JSON lines, then prints both files.
//!
//! Run with: cargo run --example file_logging

use rust_structured_logger::prelude::*;
use std::fs;

fn main() -> Result<()> {
    println!("=== Rust Structured Logger - File Logging Example ===\n");

    let dir = std::env::temp_dir().join("rust_structured_logger_demo");
    let text_path = dir.join("app.log");
    let json_path = dir.join("app.jsonl");
    let _ = fs::remove_file(&text_path);
    let _ = fs::remove_file(&json_path);

    let context = LogContext::new();
    context.set("Service", "billing")?;

    let logger = Logger::builder()
        .minimum_level(SeverityLevel::Debug)
        .file_sink(&text_path, SeverityLevel::Minimum)?
        .sink(
            FileSink::new(&json_path)?
                .with_output_format(OutputFormat::Json)
                .with_timestamp_format(TimestampFormat::UnixMillis),
        )
        .enricher(context.clone())
        .build();

    for invoice in 1..=3 {
        let _scope = context.push_property("InvoiceId", &invoice)?;
        logger.debug("Loading invoice {InvoiceId}", &[&invoice])?;
        logger.information("Charged {Amount:F2} to {Customer}", &[&(invoice as f64 * 19.99), &"acme"])?;
    }

    let failure = std::io::Error::new(std::io::ErrorKind::TimedOut, "payment gateway timed out");
    logger.log_error(SeverityLevel::Error, &failure, "Charge failed for {Customer}", &[&"globex"])?;

    // flushes both files
    drop(logger);

    println!("--- {} ---", text_path.display());
    print!("{}", fs::read_to_string(&text_path)?);
    println!("\n--- {} ---", json_path.display());
    print!("{}", fs::read_to_string(&json_path)?);

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
