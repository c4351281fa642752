//! One hundred random tokens concatenated by every technique.

mod common;

use criterion::{criterion_group, criterion_main, Criterion};
use string_concat_bench::Suite;

fn bench_hundred_strings(c: &mut Criterion) {
    common::bench_suite(c, &Suite::hundred());
}

criterion_group! {
    name = benches;
    config = common::criterion(&Suite::hundred().protocol);
    targets = bench_hundred_strings
}
criterion_main!(benches);
