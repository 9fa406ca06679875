use RustedCalculus::numerical::integral::integrate;
use RustedCalculus::numerical::limit::estimate_limit;
use RustedCalculus::numerical::substitution::SubstitutionMode;
use RustedCalculus::numerical::EstimatorSettings;
use RustedCalculus::symbolic::symbolic_traits::{Differentiator, SymbolicBackend};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_integral(c: &mut Criterion) {
    let settings = EstimatorSettings::default();
    c.bench_function("trapezoid exp(-x^2) over [0, 1]", |b| {
        b.iter(|| integrate(&SymbolicBackend, black_box("exp(-x^2)"), "x", 0.0, 1.0, &settings))
    });
}

fn bench_substitution_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("trapezoid by substitution mode");
    for mode in [SubstitutionMode::Identifier, SubstitutionMode::Legacy] {
        let settings = EstimatorSettings {
            substitution: mode,
            ..EstimatorSettings::default()
        };
        group.bench_function(mode.to_string(), |b| {
            b.iter(|| integrate(&SymbolicBackend, black_box("x*sin(x)"), "x", 0.0, 3.0, &settings))
        });
    }
    group.finish();
}

fn bench_limit(c: &mut Criterion) {
    let settings = EstimatorSettings::default();
    c.bench_function("limit sin(x)/x at 0", |b| {
        b.iter(|| estimate_limit(&SymbolicBackend, black_box("sin(x)/x"), "x", 0.0, &settings))
    });
}

fn bench_derivative(c: &mut Criterion) {
    c.bench_function("derivative of x^3*ln(x)", |b| {
        b.iter(|| SymbolicBackend.differentiate(black_box("x^3*ln(x)"), "x"))
    });
}

criterion_group!(
    benches,
    bench_integral,
    bench_substitution_modes,
    bench_limit,
    bench_derivative
);
criterion_main!(benches);
