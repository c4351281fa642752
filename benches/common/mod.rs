//! Shared criterion wiring for the concatenation suites.

use criterion::{Criterion, Throughput};
use string_concat_bench::{MeasurementProtocol, Suite, Technique};

/// Build a criterion instance that follows the given measurement protocol.
pub fn criterion(protocol: &MeasurementProtocol) -> Criterion {
    Criterion::default()
        .warm_up_time(protocol.warmup_time())
        .measurement_time(protocol.measurement_time())
        .sample_size(protocol.sample_size())
}

/// Register one benchmark per technique under the suite's group.
///
/// Each benchmark generates its input once, before timing starts, and reuses it
/// for every iteration.
pub fn bench_suite(c: &mut Criterion, suite: &Suite) {
    let probe = suite.setup().expect("Failed to generate benchmark input");
    suite.verify(&probe).expect("Concatenation techniques disagree");

    let mut group = c.benchmark_group(suite.group_name());
    group.throughput(Throughput::Elements(suite.kind.size() as u64));

    for technique in Technique::extended() {
        let workload = suite
            .workload(technique)
            .expect("Failed to generate benchmark input");
        group.bench_function(technique.name(), |b| b.iter(|| workload.run()));
    }

    group.finish();
}
