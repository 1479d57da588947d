use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tagcheck::prelude::*;

fn order(items: usize) -> Record {
    let lines = (0..items)
        .map(|i| {
            FieldValue::Record(
                Record::builder("Line")
                    .tagged("Sku", "validate", "not_empty,uppercase,max:12", format!("SKU-{}", i))
                    .tagged("Quantity", "validate", "numeric,min:1,max:999", (i % 50 + 1).to_string())
                    .build(),
            )
        })
        .collect();

    Record::builder("Order")
        .tagged("Customer", "validate", "not_empty,min:2,max:64,lowercase", "ann")
        .tagged("Note", "validate", "empty,max:140", None::<String>)
        .field(RecordField::new("Lines", FieldValue::List(lines)))
        .build()
}

fn bench_parse_tag(c: &mut Criterion) {
    c.bench_function("parse_tag", |b| {
        b.iter(|| parse_tag(black_box("not_empty,min:2,max:64,lowercase,numeric")))
    });
}

fn bench_validate(c: &mut Criterion) {
    let pipeline = ValidationPipeline::default();
    let small = order(4);
    let large = order(256);

    c.bench_function("validate_small_order", |b| {
        b.iter(|| pipeline.validate(black_box(&small)))
    });
    c.bench_function("validate_large_order", |b| {
        b.iter(|| pipeline.validate(black_box(&large)))
    });
}

criterion_group!(benches, bench_parse_tag, bench_validate);
criterion_main!(benches);
