use blogclust::cluster::{Agglomerative, Iterations, Kmeans, VectorEntity, Vocabulary};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::prelude::*;
use std::sync::Arc;

fn synthetic(n: usize, words: usize) -> (Arc<Vocabulary>, Vec<VectorEntity>) {
    let mut rng = StdRng::seed_from_u64(42);
    let vocab = Arc::new(Vocabulary::new((0..words).map(|i| format!("w{i}"))).unwrap());
    let data = (0..n)
        .map(|i| {
            let counts = (0..words).map(|_| rng.random_range(0..30) as f64).collect();
            VectorEntity::new(format!("blog{i}"), Arc::clone(&vocab), counts).unwrap()
        })
        .collect();
    (vocab, data)
}

fn bench_kmeans(c: &mut Criterion) {
    let mut group = c.benchmark_group("kmeans");
    let (vocab, data) = synthetic(100, 700);

    group.bench_function("fit_n100_w700_k5_fixed10", |b| {
        b.iter(|| {
            let model = Kmeans::new(5)
                .with_iterations(Iterations::Fixed(10))
                .with_seed(42);
            model.fit(black_box(&data), &vocab).unwrap();
        })
    });

    group.finish();
}

fn bench_hierarchical(c: &mut Criterion) {
    let mut group = c.benchmark_group("hierarchical");
    group.sample_size(10);
    let (vocab, data) = synthetic(60, 700);

    group.bench_function("fit_n60_w700", |b| {
        b.iter(|| {
            Agglomerative::new().fit(black_box(&data), &vocab).unwrap();
        })
    });

    group.finish();
}

criterion_group!(benches, bench_kmeans, bench_hierarchical);
criterion_main!(benches);
