use std::hint::black_box;

use criterion::criterion_group;
use criterion::criterion_main;
use criterion::BenchmarkId;
use criterion::Criterion;
use option_payoff::black_scholes_price;
use option_payoff::Leg;
use option_payoff::OptionType;
use option_payoff::Strategy;

fn ladder(n: usize) -> Strategy {
  (0..n)
    .map(|i| {
      let k = 50.0 + 5.0 * i as f64;
      if i % 2 == 0 {
        Leg::long_call(k, 3.0).unwrap()
      } else {
        Leg::short_put(k, 2.0).unwrap()
      }
    })
    .collect()
}

fn bench_analyzer(c: &mut Criterion) {
  let mut group = c.benchmark_group("Strategy");

  for n in [2usize, 8, 32] {
    let s = ladder(n);
    group.bench_with_input(BenchmarkId::new("break_evens", n), &s, |b, s| {
      b.iter(|| black_box(s.break_evens()))
    });
    group.bench_with_input(BenchmarkId::new("summary", n), &s, |b, s| {
      b.iter(|| black_box(s.summary()))
    });
    group.bench_with_input(BenchmarkId::new("curve_0_200", n), &s, |b, s| {
      b.iter(|| {
        let sum: f64 = s
          .payoff_curve(0.0, 200.0, 1.0)
          .unwrap()
          .map(|pt| pt.total)
          .sum();
        black_box(sum)
      })
    });
  }

  group.finish();
}

fn bench_pricer(c: &mut Criterion) {
  c.bench_function("black_scholes_price", |b| {
    b.iter(|| {
      black_box(black_scholes_price(
        OptionType::Call,
        black_box(100.0),
        black_box(105.0),
        30.0 / 365.0,
        0.2,
        0.03,
      ))
    })
  });
}

criterion_group!(benches, bench_analyzer, bench_pricer);
criterion_main!(benches);
