//! Background logging example
//!
//! Moves a slow sink onto a worker thread and shows what each overflow
//! policy does when producers outrun it.
//!
//! Run with: cargo run --example background_logging

use rust_structured_logger::core::{self_log, LogEvent};
use rust_structured_logger::prelude::*;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// A sink that takes a millisecond per event
struct SlowSink {
    inner: InMemorySink,
}

impl Sink for SlowSink {
    fn emit(&self, event: &LogEvent) -> Result<()> {
        thread::sleep(Duration::from_millis(1));
        self.inner.emit(event)
    }

    fn name(&self) -> &str {
        "slow"
    }
}

fn run(policy: OverflowPolicy) -> Result<()> {
    let delivered = InMemorySink::new();
    let background = Arc::new(BackgroundSink::with_policy(
        SlowSink {
            inner: delivered.clone(),
        },
        32,
        policy,
    )?);
    let logger = Arc::new(Logger::builder().sink(Arc::clone(&background)).build());

    let start = Instant::now();
    let producers: Vec<_> = (0..4)
        .map(|producer| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for item in 0..50 {
                    let _ = logger.information("Producer {Producer} item {Item}", &[&producer, &item]);
                }
            })
        })
        .collect();
    for producer in producers {
        let _ = producer.join();
    }
    let producing = start.elapsed();
    logger.flush();

    println!(
        "   {:<28} producers took {:>6.1?}, delivered {:>3}, dropped {:>3}",
        policy.to_string(),
        producing,
        delivered.len(),
        background.dropped_count()
    );
    Ok(())
}

fn main() -> Result<()> {
    println!("=== Rust Structured Logger - Background Logging Example ===\n");

    self_log::enable(Arc::new(|line: &str| println!("   self-log: {}", line)));

    run(OverflowPolicy::DropNewest)?;
    run(OverflowPolicy::BlockWithTimeout(Duration::from_millis(2)))?;
    run(OverflowPolicy::Block)?;

    self_log::disable();
    println!("\n=== Example completed successfully! ===");
    Ok(())
}
