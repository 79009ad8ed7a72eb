use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use eduforge_schema::{flatten, unflatten, BuilderSchema, FieldType, SchemaField, SchemaSection};

fn schema_with(sections: usize, fields_per_section: usize) -> BuilderSchema {
    let types = [
        FieldType::Text,
        FieldType::Number,
        FieldType::Boolean,
    ];
    let mut out = Vec::with_capacity(sections);
    let mut n = 0usize;
    for s in 0..sections {
        let mut fields = Vec::with_capacity(fields_per_section);
        for _ in 0..fields_per_section {
            fields.push(SchemaField::new(
                format!("field{n}"),
                format!("Field {n}"),
                types[n % types.len()],
            ));
            n += 1;
        }
        out.push(SchemaSection::new(format!("Section {s}")).with_fields(fields));
    }
    BuilderSchema::new(out)
}

fn bench_flatten(c: &mut Criterion) {
    let mut group = c.benchmark_group("schema_convert");

    for &(sections, fields) in &[(2usize, 10usize), (5, 20), (10, 50)] {
        let schema = schema_with(sections, fields);
        let flat = flatten(&schema).unwrap();
        let total = (sections * fields) as u64;
        group.throughput(Throughput::Elements(total));

        group.bench_with_input(
            BenchmarkId::new("flatten", format!("{sections}x{fields}")),
            &schema,
            |b, schema| b.iter(|| flatten(black_box(schema)).unwrap()),
        );
        group.bench_with_input(
            BenchmarkId::new("unflatten", format!("{sections}x{fields}")),
            &flat,
            |b, flat| b.iter(|| unflatten(black_box(flat))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_flatten);
criterion_main!(benches);
