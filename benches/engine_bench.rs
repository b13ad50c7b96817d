use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use edgematch::engine::Engine;

/// Full engine flow with setup and registration done once:
/// - encapsulation and trapdoor generation are measured per group size
/// - match verification is measured once per group size
/// - allocation over a batch of records is measured
pub fn bench_engine(c: &mut Criterion) {
    let engine = Engine::with_rng(StdRng::seed_from_u64(0xdead_beef));
    engine.setup(128).expect("setup failed");

    let ids: Vec<String> = (0..64).map(|i| i.to_string()).collect();
    for id in &ids {
        engine.register(id).expect("register failed");
    }

    let mut group_bench = c.benchmark_group("group_size");
    for size in [1usize, 8, 64] {
        let group = engine
            .create_group(&ids[..size])
            .expect("create_group failed");

        group_bench.bench_with_input(BenchmarkId::new("encapsulate", size), &group, |b, g| {
            b.iter(|| black_box(engine.encapsulate("observe", g).expect("encapsulate failed")))
        });

        group_bench.bench_with_input(BenchmarkId::new("trapdoor", size), &group, |b, g| {
            b.iter(|| {
                black_box(
                    engine
                        .generate_trapdoor("observe", g)
                        .expect("trapdoor failed"),
                )
            })
        });

        let record = engine
            .encapsulate("observe", &group)
            .and_then(|r| r.to_json())
            .expect("encapsulate failed");
        let trapdoor = engine
            .generate_trapdoor("observe", &group)
            .expect("trapdoor failed");
        group_bench.bench_function(BenchmarkId::new("verify_match", size), |b| {
            b.iter(|| black_box(engine.verify_match(&trapdoor, &record).expect("verify failed")))
        });
    }
    group_bench.finish();

    // Allocation: one match at the end of 32 records
    let group = engine.create_group(&ids[..8]).expect("create_group failed");
    let mut records: Vec<String> = (0..31)
        .map(|_| {
            engine
                .encapsulate("patrol", &group)
                .and_then(|r| r.to_json())
                .expect("encapsulate failed")
        })
        .collect();
    records.push(
        engine
            .encapsulate("observe", &group)
            .and_then(|r| r.to_json())
            .expect("encapsulate failed"),
    );
    let edges: Vec<String> = (0..records.len()).map(|i| format!("edge{i}")).collect();
    let trapdoor = engine
        .generate_trapdoor("observe", &group)
        .expect("trapdoor failed");

    c.bench_function("allocate_32_records", |b| {
        b.iter(|| {
            let chosen = engine
                .allocate(&trapdoor, &records, &edges)
                .expect("allocate failed");
            black_box(chosen);
        })
    });
}

criterion_group!(benches, bench_engine);
criterion_main!(benches);
