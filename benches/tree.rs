//! Benchmarks for decision tree training and prediction.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use learnstyle::prelude::*;

// Deterministic pseudo-random rows with one informative column per class
fn synthetic(n: usize) -> (Matrix<f64>, Vec<usize>) {
    let mut state = 0x2545_f491_4f6c_dd1d_u64;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state >> 11) as f64 / (1u64 << 53) as f64
    };

    let mut data = Vec::with_capacity(n * 5);
    let mut y = Vec::with_capacity(n);
    for i in 0..n {
        let class = i % 3;
        for col in 0..5 {
            let base = if col == class { 0.6 } else { 0.0 };
            data.push(base + next() * 0.5);
        }
        y.push(class);
    }
    (Matrix::from_vec(n, 5, data).expect("valid dimensions"), y)
}

fn bench_tree_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("decision_tree_fit");

    for size in [50, 200, 1000].iter() {
        let (x, y) = synthetic(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let mut tree = DecisionTreeClassifier::new().with_n_classes(3);
                tree.fit(black_box(&x), black_box(&y)).expect("fit")
            });
        });
    }

    group.finish();
}

fn bench_tree_predict(c: &mut Criterion) {
    let mut group = c.benchmark_group("decision_tree_predict_proba");

    for size in [50, 200, 1000].iter() {
        let (x, y) = synthetic(*size);
        let mut tree = DecisionTreeClassifier::new().with_n_classes(3);
        tree.fit(&x, &y).expect("fit");

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| tree.predict_proba(black_box(&x)).expect("fitted"));
        });
    }

    group.finish();
}

fn bench_predictor(c: &mut Criterion) {
    let (x, y) = synthetic(300);
    let mut scaler = MinMaxScaler::new();
    let scaled = scaler.fit_transform(&x).expect("scale");
    let mut tree = DecisionTreeClassifier::new().with_n_classes(3);
    tree.fit(&scaled, &y).expect("fit");
    let predictor = Predictor::new(tree, scaler).expect("predictor");
    let features = FeatureVector::from_array([0.8, 0.1, 0.2, 0.3, 0.1]);

    c.bench_function("predictor_single_answer_set", |b| {
        b.iter(|| predictor.predict(black_box(&features)).expect("predict"));
    });
}

criterion_group!(benches, bench_tree_fit, bench_tree_predict, bench_predictor);
criterion_main!(benches);
