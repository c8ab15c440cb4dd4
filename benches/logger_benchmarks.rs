//! Criterion benchmarks for sink_logger

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sink_logger::prelude::*;
use sink_logger::{call_site, format_line};
use std::time::Duration;

// ============================================================================
// Emit Benchmarks
// ============================================================================

fn bench_emit(c: &mut Criterion) {
    let mut group = c.benchmark_group("emit");
    group.throughput(Throughput::Elements(1));

    // The worker never ticks during the run, so the queue stays full and
    // every emit after the first fill exercises the overflow path
    for policy in [OverflowPolicy::DropNewest, OverflowPolicy::DropOldest] {
        let logger = Logger::builder()
            .tick_interval(Duration::from_secs(3600))
            .max_pending(10_000)
            .overflow_policy(policy)
            .drain_on_shutdown(false)
            .build();

        group.bench_with_input(BenchmarkId::new("full_queue", policy), &logger, |b, logger| {
            b.iter(|| logger.information(black_box("Info message")));
        });
    }

    let logger = Logger::builder()
        .tick_interval(Duration::from_secs(3600))
        .max_pending(10_000)
        .drain_on_shutdown(false)
        .build();

    group.bench_function("none_message", |b| {
        b.iter(|| logger.emit(LogLevel::Error, CallSite::caller(), black_box(None)));
    });

    group.finish();
}

// ============================================================================
// Filtering and Formatting Benchmarks
// ============================================================================

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");

    let threshold_only = SinkFilter::new(LogLevel::Warning);
    let with_lists = SinkFilter::new(LogLevel::Error)
        .with_whitelist([LogLevel::Trace, LogLevel::Debug])
        .with_blacklist([LogLevel::Critical]);

    group.bench_function("threshold_only", |b| {
        b.iter(|| {
            for level in LogLevel::ENTRY_LEVELS {
                black_box(threshold_only.accepts(black_box(level)));
            }
        });
    });

    group.bench_function("with_lists", |b| {
        b.iter(|| {
            for level in LogLevel::ENTRY_LEVELS {
                black_box(with_lists.accepts(black_box(level)));
            }
        });
    });

    group.finish();
}

fn bench_format(c: &mut Criterion) {
    let mut group = c.benchmark_group("format");

    let entry = LogEntry::new(
        LogLevel::Information,
        CallSite::new("src/net/server.rs", "app::net::Server::accept", 120),
        "Accepted connection from 10.0.0.7\twith keep-alive",
    );

    for format in [
        TimestampFormat::LongTime,
        TimestampFormat::Iso8601,
        TimestampFormat::UnixMillis,
    ] {
        group.bench_with_input(
            BenchmarkId::new("format_line", format!("{:?}", format)),
            &format,
            |b, format| b.iter(|| format_line(black_box(&entry), format)),
        );
    }

    group.bench_function("call_site_macro", |b| {
        b.iter(|| black_box(call_site!()));
    });

    group.finish();
}

criterion_group!(benches, bench_emit, bench_filter, bench_format);
criterion_main!(benches);
