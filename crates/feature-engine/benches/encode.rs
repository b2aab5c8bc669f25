use criterion::{black_box, criterion_group, criterion_main, Criterion};
use feature_engine::{FeatureEncoder, FeatureSchema, DERIVED_COLUMNS, DIRECT_COLUMNS};
use video_metrics::{Category, Country, Device, OneHot, VideoMetrics};

fn full_schema() -> FeatureSchema {
    let mut columns: Vec<String> = DIRECT_COLUMNS
        .iter()
        .chain(DERIVED_COLUMNS)
        .map(|c| c.to_string())
        .collect();
    columns.extend(Category::ALL.iter().map(|c| c.column()));
    columns.extend(Device::ALL.iter().map(|d| d.column()));
    columns.extend(Country::ALL.iter().map(|c| c.column()));
    FeatureSchema::new(columns).expect("valid schema")
}

fn bench_encode(c: &mut Criterion) {
    let encoder = FeatureEncoder::new(full_schema());
    let metrics = VideoMetrics {
        category: Category::Gaming,
        device: Device::Tv,
        country: Country::Us,
        ..Default::default()
    };

    c.bench_function("encode_full_schema", |b| {
        b.iter(|| encoder.encode(black_box(&metrics)))
    });
}

criterion_group!(benches, bench_encode);
criterion_main!(benches);
