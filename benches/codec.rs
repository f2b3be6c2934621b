use asa_ini::generators::ExperienceRamp;
use asa_ini::{from_str, parse_records, schema, serialize_records, set_value, to_string, TypedValue};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn sample_file(sections: usize, keys: usize) -> String {
    let mut text = String::from("; generated\r\n");
    for s in 0..sections {
        text.push_str(&format!("[Section{}]\r\n", s));
        for k in 0..keys {
            text.push_str(&format!("Key{}={}.0\r\n", k, k));
        }
        text.push_str("\r\n");
    }
    text
}

fn spawn_weights(count: usize) -> String {
    (0..count)
        .map(|i| format!("(DinoNameTag=\"Dino{}\",SpawnWeightMultiplier={}.5,OverrideSpawnLimitPercentage=true)", i, i))
        .collect::<Vec<_>>()
        .join(",")
}

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for size in [10, 100, 1000].iter() {
        let text = sample_file(4, *size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| from_str(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize");

    for size in [10, 100, 1000].iter() {
        let doc = from_str(&sample_file(4, *size)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &doc, |b, doc| {
            b.iter(|| to_string(black_box(doc)))
        });
    }
    group.finish();
}

fn benchmark_records(c: &mut Criterion) {
    let mut group = c.benchmark_group("records");

    for size in [10, 100, 500].iter() {
        let text = spawn_weights(*size);
        let records = parse_records(&text).unwrap();
        group.bench_with_input(BenchmarkId::new("parse", size), &text, |b, text| {
            b.iter(|| parse_records(black_box(text)))
        });
        group.bench_with_input(BenchmarkId::new("serialize", size), &records, |b, records| {
            b.iter(|| serialize_records(black_box(records)))
        });
    }
    group.finish();
}

fn benchmark_typed_write(c: &mut Criterion) {
    let text = "[ServerSettings]\nXPMultiplier=1.0\nServerPVE=False\n";
    let xp = schema::find("ServerSettings", "XPMultiplier").unwrap();

    c.bench_function("typed_write_and_save", |b| {
        b.iter(|| {
            let mut doc = from_str(black_box(text)).unwrap();
            set_value(&mut doc, xp, TypedValue::Number(2.5)).unwrap();
            to_string(&doc)
        })
    });
}

fn benchmark_experience_ramp(c: &mut Criterion) {
    c.bench_function("experience_ramp_150", |b| {
        b.iter(|| ExperienceRamp::for_max_level(black_box(150)).to_value_string())
    });
}

criterion_group!(
    benches,
    benchmark_parse,
    benchmark_serialize,
    benchmark_records,
    benchmark_typed_write,
    benchmark_experience_ramp
);
criterion_main!(benches);
