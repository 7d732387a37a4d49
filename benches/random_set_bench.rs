use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use rand_core::{RngCore, SeedableRng};
use rand_pcg::Lcg128Xsl64 as Pcg;
use random_set::RandomSet;
use std::time::Duration;

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn filled(seed: u64, n: usize) -> (RandomSet<String>, Vec<String>) {
    let mut rng = Pcg::seed_from_u64(seed);
    let keys: Vec<String> = (0..n).map(|_| key(rng.next_u64())).collect();
    let mut s = RandomSet::seed_from_u64(seed);
    s.extend(keys.iter().cloned());
    (s, keys)
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_set::insert");
    group.throughput(Throughput::Elements(100_000));
    group.bench_function("fresh_100k", |b| {
        b.iter_batched(
            || RandomSet::<String>::seed_from_u64(1),
            |mut s| {
                let mut rng = Pcg::seed_from_u64(1);
                for _ in 0..100_000 {
                    s.insert(key(rng.next_u64()));
                }
                black_box(s)
            },
            BatchSize::SmallInput,
        )
    });
    group.bench_function("warm_100k", |b| {
        b.iter_batched(
            || {
                // Grow to 110k then drain, keeping capacity and tombstones.
                let (mut s, keys) = filled(2, 110_000);
                for k in &keys {
                    s.remove(k);
                }
                s
            },
            |mut s| {
                let mut rng = Pcg::seed_from_u64(3);
                for _ in 0..100_000 {
                    s.insert(key(rng.next_u64()));
                }
                black_box(s)
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_set::remove");
    group.throughput(Throughput::Elements(10_000));
    group.bench_function("random_10k_of_110k", |b| {
        b.iter_batched(
            || {
                let (s, keys) = filled(5, 110_000);
                let mut rng = Pcg::seed_from_u64(6);
                let victims: Vec<String> = (0..10_000)
                    .map(|_| keys[(rng.next_u64() as usize) % keys.len()].clone())
                    .collect();
                (s, victims)
            },
            |(mut s, victims)| {
                for k in &victims {
                    black_box(s.remove(k));
                }
                black_box(s)
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_set::contains");
    group.throughput(Throughput::Elements(10_000));
    let (s, keys) = filled(7, 100_000);
    let mut rng = Pcg::seed_from_u64(8);
    let hits: Vec<String> = (0..10_000)
        .map(|_| keys[(rng.next_u64() as usize) % keys.len()].clone())
        .collect();
    let misses: Vec<String> = (0..10_000)
        .map(|_| format!("m{:016x}", rng.next_u64()))
        .collect();
    group.bench_function("hit_10k_on_100k", |b| {
        b.iter(|| {
            for k in &hits {
                black_box(s.contains(k));
            }
        })
    });
    group.bench_function("miss_10k_on_100k", |b| {
        b.iter(|| {
            for k in &misses {
                black_box(s.contains(k));
            }
        })
    });
    group.finish();
}

fn bench_get_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_set::get_random");
    group.throughput(Throughput::Elements(10_000));
    let (mut s, _) = filled(9, 100_000);
    group.bench_function("pick_10k_on_100k", |b| {
        b.iter(|| {
            for _ in 0..10_000 {
                black_box(s.get_random().ok());
            }
        })
    });
    group.finish();
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(12)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_insert, bench_remove, bench_lookup, bench_get_random
}
criterion_main!(benches);
