//! Ten random tokens concatenated by every technique.
//!
//! Builder, sync-builder and concat keep the historical omission of the ninth
//! token so results stay comparable with earlier runs.

mod common;

use criterion::{criterion_group, criterion_main, Criterion};
use string_concat_bench::Suite;

fn bench_ten_strings(c: &mut Criterion) {
    common::bench_suite(c, &Suite::ten());
}

criterion_group! {
    name = benches;
    config = common::criterion(&Suite::ten().protocol);
    targets = bench_ten_strings
}
criterion_main!(benches);
