//! Benchmark suite for record parsing
//!
//! Measures the line parser over representative inputs using the divan
//! benchmarking framework. Parsing dominates the hot loop of ingestion,
//! so each rejection class is measured alongside the accept path.
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench
//! ```

use ledger_ingest::parse_line;

fn main() {
    divan::main();
}

/// Benchmark parsing a well-formed deposit line
#[divan::bench]
fn parse_valid_deposit() {
    divan::black_box(parse_line(divan::black_box("42,deposit,100.25"))).ok();
}

/// Benchmark parsing a well-formed withdraw line
#[divan::bench]
fn parse_valid_withdraw() {
    divan::black_box(parse_line(divan::black_box("42,withdraw,30.50"))).ok();
}

/// Benchmark parsing a line with surrounding whitespace
#[divan::bench]
fn parse_padded_fields() {
    divan::black_box(parse_line(divan::black_box(" 42 , deposit , 100 "))).ok();
}

/// Benchmark the malformed-shape rejection path
#[divan::bench]
fn parse_wrong_field_count() {
    divan::black_box(parse_line(divan::black_box("42,deposit,100,extra"))).ok();
}

/// Benchmark the bad-amount rejection path
#[divan::bench]
fn parse_bad_amount() {
    divan::black_box(parse_line(divan::black_box("42,deposit,abc"))).ok();
}

/// Benchmark a batch-sized run of mixed lines
#[divan::bench]
fn parse_mixed_batch() {
    let lines = [
        "1,deposit,100",
        "2,withdraw,30.50",
        "x,deposit,50",
        "3,deposit,0.01",
        "4,transfer,10",
    ];
    for _ in 0..200 {
        for line in &lines {
            divan::black_box(parse_line(divan::black_box(line))).ok();
        }
    }
}
