use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use masspool::collision::detect;
use masspool::compound::{Compound, CompoundTable};
use masspool::plate::PlateFormat;
use masspool::pooling::{assign, Capacity};

/// Build a synthetic compound table with deterministic masses
fn make_table(compounds: usize) -> CompoundTable {
    CompoundTable {
        header: vec!["sample".to_string(), "ExactMass".to_string()],
        compounds: (0..compounds)
            .map(|i| {
                let mass = 100.0 + (i as f64 * 0.37) + (i as f64 * 0.731).sin() * 0.2;
                Compound {
                    fields: vec![format!("CMP-{i}"), mass.to_string()],
                    sample_id: format!("CMP-{i}"),
                    exact_mass: mass,
                }
            })
            .collect(),
        sample_index: 0,
        mass_index: 1,
    }
}

/// Benchmark round-robin assignment at laboratory scales
fn bench_assign(c: &mut Criterion) {
    let mut group = c.benchmark_group("assign");

    for compounds in [1_000, 5_000, 20_000] {
        group.throughput(Throughput::Elements(compounds as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}compounds", compounds)),
            &compounds,
            |b, &compounds| {
                b.iter_batched(
                    || make_table(compounds),
                    |table| {
                        assign(
                            black_box(table),
                            PlateFormat::W384,
                            Capacity::PerWell(10),
                        )
                        .unwrap()
                    },
                    criterion::BatchSize::SmallInput,
                )
            },
        );
    }

    group.finish();
}

/// Benchmark the collision scan at varying well occupancies
fn bench_detect(c: &mut Criterion) {
    let mut group = c.benchmark_group("detect");

    for per_well in [10, 25, 50] {
        let table = make_table(5_000);
        let assignment = assign(table, PlateFormat::W384, Capacity::PerWell(per_well)).unwrap();
        // Pairs scale quadratically with occupancy.
        let pairs = assignment.total_wells * per_well * (per_well - 1) / 2;
        group.throughput(Throughput::Elements(pairs as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}per_well", per_well)),
            &assignment,
            |b, assignment| b.iter(|| detect(black_box(assignment), 0.1)),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_assign, bench_detect);
criterion_main!(benches);
