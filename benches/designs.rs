use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use fracfact::{fracfact, fracfact_aliasing, fracfact_by_res, fracfact_opt};

fn bench_fracfact(c: &mut Criterion) {
    let mut group = c.benchmark_group("fracfact");

    for gen in ["a b ab", "a b c d abc abd", "a b c d e f abcde"] {
        let k = gen.split_whitespace().filter(|t| t.len() == 1).count();
        group.bench_with_input(BenchmarkId::from_parameter(k), &gen, |b, &gen| {
            b.iter(|| fracfact(gen).unwrap());
        });
    }
    group.finish();
}

fn bench_aliasing(c: &mut Criterion) {
    let mut group = c.benchmark_group("fracfact_aliasing");

    // Column count dominates: 2^n - 1 contrasts per analysis.
    for n in [6, 8, 10] {
        let design = fracfact_by_res(n, 3).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(n), &design, |b, design| {
            b.iter(|| fracfact_aliasing(design).unwrap());
        });
    }
    group.finish();
}

fn bench_opt(c: &mut Criterion) {
    let mut group = c.benchmark_group("fracfact_opt");
    group.sample_size(10);

    // (n_factors, n_erased) pairs with growing candidate spaces.
    for (n, e) in [(5, 1), (6, 2), (7, 3)] {
        let id = format!("{n}-{e}");
        group.bench_with_input(BenchmarkId::from_parameter(id), &(n, e), |b, &(n, e)| {
            b.iter(|| fracfact_opt(n, e, 0).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_fracfact, bench_aliasing, bench_opt);
criterion_main!(benches);
