use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use chrono::{Days, NaiveDate};
use clientele_customers::classify;
use rust_decimal::Decimal;

fn bench_classify(c: &mut Criterion) {
    let today = NaiveDate::from_ymd_opt(2025, 8, 15).unwrap();
    let mut group = c.benchmark_group("classify");

    for (label, cents, days) in [
        ("platinum", 6_000_000i64, 30u64),
        ("gold", 150_000, 200),
        ("silver_stale", 150_000, 500),
    ] {
        let spend = Decimal::new(cents, 2);
        let date = today.checked_sub_days(Days::new(days)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(label), &(spend, date), |b, &(s, d)| {
            b.iter(|| classify(black_box(Some(s)), black_box(Some(d)), black_box(today)))
        });
    }

    group.bench_function("incomplete", |b| {
        b.iter(|| classify(black_box(None), black_box(None), black_box(today)))
    });

    group.finish();
}

criterion_group!(benches, bench_classify);
criterion_main!(benches);
