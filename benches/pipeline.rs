use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use culture_map::prelude::*;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

fn create_countries(n: usize) -> Vec<CountryRecord> {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    (0..n)
        .map(|i| {
            let mut scores = [0.0; Dimension::COUNT];
            for s in scores.iter_mut() {
                *s = rng.gen_range(0.0..100.0);
            }
            CountryRecord::new(format!("country_{}", i), scores)
        })
        .collect()
}

fn bench_distances(c: &mut Criterion) {
    let mut group = c.benchmark_group("pairwise");

    for n in [10, 50, 100].iter() {
        let countries = create_countries(*n);
        for metric in DistanceMetric::ALL {
            group.bench_with_input(BenchmarkId::new(metric.name(), n), &countries, |b, countries| {
                b.iter(|| pairwise(black_box(countries), metric).unwrap())
            });
        }
    }

    group.finish();
}

fn bench_normalise(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalise");

    for n in [10, 100].iter() {
        let (matrix, max) = pairwise(&create_countries(*n), DistanceMetric::Euclidean).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(n), &matrix, |b, matrix| {
            b.iter(|| normalise(black_box(matrix), max).unwrap())
        });
    }

    group.finish();
}

fn bench_embedding(c: &mut Criterion) {
    let mut group = c.benchmark_group("embedding");
    group.sample_size(10);

    for n in [10, 50].iter() {
        let table = extract(&create_countries(*n)).unwrap();
        for algorithm in EmbeddingAlgorithm::ALL {
            group.bench_with_input(BenchmarkId::new(algorithm.name(), n), &table, |b, table| {
                b.iter(|| embed(black_box(table), algorithm).unwrap())
            });
        }
    }

    group.finish();
}

fn bench_memoized(c: &mut Criterion) {
    let countries = create_countries(100);
    let map = CultureMap::default();
    map.distances(&countries, DistanceMetric::Cosine).unwrap();

    c.bench_function("distances_cache_hit", |b| {
        b.iter(|| map.distances(black_box(&countries), DistanceMetric::Cosine).unwrap())
    });
}

criterion_group!(benches, bench_distances, bench_normalise, bench_embedding, bench_memoized);
criterion_main!(benches);
