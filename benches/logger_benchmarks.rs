//! Criterion benchmarks for rust_structured_logger

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_structured_logger::core::LogEvent;
use rust_structured_logger::prelude::*;
use rust_structured_logger::{MessageTemplate, MessageTemplateRepository};
use serde::Serialize;
use std::sync::Arc;

/// Accepts and discards everything
struct NullSink;

impl Sink for NullSink {
    fn emit(&self, event: &LogEvent) -> Result<()> {
        black_box(event);
        Ok(())
    }

    fn name(&self) -> &str {
        "null"
    }
}

#[derive(Serialize)]
struct Order {
    id: u64,
    customer: &'static str,
    total: f64,
}

// ============================================================================
// Template Benchmarks
// ============================================================================

fn bench_templates(c: &mut Criterion) {
    let mut group = c.benchmark_group("templates");
    group.throughput(Throughput::Elements(1));

    let text = "User {User} logged in from {Ip} after {Attempts:F0} attempts {{escaped}}";

    group.bench_function("parse", |b| {
        b.iter(|| black_box(MessageTemplate::parse(black_box(text))));
    });

    let repository = MessageTemplateRepository::new();
    repository.parse_or_get(text);
    group.bench_function("cache_hit", |b| {
        b.iter(|| black_box(repository.parse_or_get(black_box(text))));
    });

    group.finish();
}

// ============================================================================
// Pipeline Benchmarks
// ============================================================================

fn bench_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("logging");
    group.throughput(Throughput::Elements(1));

    let logger = Logger::builder()
        .minimum_level(SeverityLevel::Information)
        .sink(NullSink)
        .build();

    group.bench_function("filtered", |b| {
        b.iter(|| logger.debug(black_box("Never seen {X}"), &[&1]));
    });

    group.bench_function("no_properties", |b| {
        b.iter(|| logger.information(black_box("Service started"), &[]));
    });

    group.bench_function("scalar_properties", |b| {
        b.iter(|| {
            logger.information(
                black_box("User {User} logged in from {Ip}"),
                &[&"alice", &"10.0.0.1"],
            )
        });
    });

    let order = Order {
        id: 1001,
        customer: "acme",
        total: 99.5,
    };
    group.bench_function("structured_property", |b| {
        b.iter(|| logger.information(black_box("Placed {@Order}"), &[&order]));
    });

    let enriched = Logger::builder()
        .sink(NullSink)
        .enricher(ThreadEnricher)
        .fixed_property("Application", &"bench")
        .expect("valid property name")
        .build();
    group.bench_function("enriched", |b| {
        b.iter(|| enriched.information(black_box("Tick {N}"), &[&42]));
    });

    group.finish();
}

fn bench_background(c: &mut Criterion) {
    let mut group = c.benchmark_group("background");
    group.throughput(Throughput::Elements(1));

    let logger = Logger::builder()
        .sink(BackgroundSink::new(NullSink, 8192).expect("spawn worker"))
        .build();

    group.bench_function("enqueue", |b| {
        b.iter(|| logger.information(black_box("Queued {N}"), &[&7]));
    });

    group.finish();
}

// ============================================================================
// Rendering Benchmarks
// ============================================================================

fn bench_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("rendering");
    group.throughput(Throughput::Elements(1));

    let memory = InMemorySink::new();
    let logger = Logger::builder().sink(memory.clone()).build();
    logger
        .information("User {User} paid {Amount:F2} for {@Order}", &[
            &"alice",
            &12.5,
            &Order {
                id: 7,
                customer: "acme",
                total: 12.5,
            },
        ])
        .expect("log succeeds");
    let event = memory.events().remove(0);
    let timestamps = TimestampFormat::default();

    group.bench_function("message", |b| {
        b.iter(|| black_box(event.render_message()));
    });

    group.bench_function("text", |b| {
        b.iter(|| black_box(OutputFormat::Text.format(&event, &timestamps)));
    });

    group.bench_function("json", |b| {
        b.iter(|| black_box(OutputFormat::Json.format(&event, &timestamps)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_templates,
    bench_logging,
    bench_background,
    bench_rendering
);
criterion_main!(benches);
