use contesa::counters::Strategy;
use contesa::harness::run_trial;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const ITERATIONS_PER_WORKER: usize = 100_000;

/// One full trial per strategy: two workers, one shared counter.
///
/// The interesting comparison is the cost of the four sound disciplines
/// relative to each other; the two flawed ones are included as a baseline
/// for what "no synchronization at all" buys.
fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("trial");

    for strategy in Strategy::ALL {
        group.bench_function(
            BenchmarkId::new(
                strategy.name(),
                format!("2 threads x {ITERATIONS_PER_WORKER}iter"),
            ),
            |b| {
                b.iter(|| {
                    let result = run_trial(strategy, ITERATIONS_PER_WORKER)
                        .expect("trial failed");
                    black_box(result.analysis())
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_strategies);
criterion_main!(benches);
