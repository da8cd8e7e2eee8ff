//! Benchmarks for view selection and rendering
//!
//! Run with: cargo bench

use covid_dashboard::view::*;
use covid_dashboard::{CountryRecord, GlobalSummary};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

fn create_test_records(count: usize) -> Vec<CountryRecord> {
    (0..count)
        .map(|i| {
            // Scatter case counts so the sort has work to do
            let cases = (i as u64 * 7_919) % 1_000_003;
            CountryRecord::new(format!("Country {}", i), cases, cases / 100, cases / 2)
        })
        .collect()
}

fn bench_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("select");

    for size in [230, 1000, 10000] {
        let records = create_test_records(size);

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("full_table_{}", size), |b| {
            b.iter(|| select(black_box(&ViewMode::FullTable), None, Some(&records)))
        });

        group.bench_function(format!("top_10_{}", size), |b| {
            b.iter(|| top_n(black_box(&records), 10))
        });

        let last = ViewMode::SingleCountry(format!("Country {}", size - 1));
        group.bench_function(format!("single_country_{}", size), |b| {
            b.iter(|| select(black_box(&last), None, Some(&records)))
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    let snapshot = Snapshot {
        global: Some(GlobalSummary::new(704_753_890, 7_010_681, 675_619_811)),
        countries: Some(create_test_records(230)),
        warnings: Vec::new(),
    };
    let options = RenderOptions::default();

    for (name, mode) in [
        ("global", ViewMode::Global),
        ("table", ViewMode::FullTable),
        ("country", ViewMode::SingleCountry("Country 42".to_string())),
    ] {
        let state = DashboardState::new(mode);
        group.bench_function(name, |b| {
            b.iter(|| render(black_box(&state), black_box(&snapshot), &options))
        });
    }

    group.finish();
}

fn bench_format(c: &mut Criterion) {
    c.bench_function("group_thousands", |b| {
        b.iter(|| group_thousands(black_box(704_753_890)))
    });
}

criterion_group!(benches, bench_select, bench_render, bench_format);
criterion_main!(benches);
