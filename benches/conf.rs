use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_tellstick::{from_str, from_str_with_options, to_string, ConfOptions};

fn sample_conf(devices: usize) -> String {
    let mut text = String::from(
        "user = \"nobody\"\ngroup = \"plugdev\"\ncontroller {\n  id = 1\n  type = 2\n}\n",
    );
    for i in 0..devices {
        text.push_str(&format!(
            "device {{\n  id = {i}\n  name = \"Device {i}\"\n  protocol = \"arctech\"\n  model = \"selflearning-switch\"\n  parameters {{\n    house = {}\n    unit = {}\n  }}\n}}\n",
            1000 + i,
            i % 16
        ));
        if i % 10 == 0 {
            text.push_str(&format!("#device {{\n#  id = {}\n#}}\n", 10_000 + i));
        }
    }
    text
}

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for size in [1, 10, 50, 200].iter() {
        let text = sample_conf(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| from_str(black_box(&text)))
        });
    }
    group.finish();
}

fn benchmark_parse_strict(c: &mut Criterion) {
    let text = sample_conf(50);

    c.bench_function("parse_strict_50", |b| {
        b.iter(|| from_str_with_options(black_box(&text), ConfOptions::strict()))
    });
}

fn benchmark_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize");

    for size in [1, 10, 50, 200].iter() {
        let config = from_str(&sample_conf(*size)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| to_string(black_box(&config)))
        });
    }
    group.finish();
}

fn benchmark_roundtrip(c: &mut Criterion) {
    let text = sample_conf(10);

    c.bench_function("roundtrip_10", |b| {
        b.iter(|| {
            let config = from_str(black_box(&text)).unwrap();
            let _text: String = to_string(black_box(&config));
        })
    });
}

criterion_group!(
    benches,
    benchmark_parse,
    benchmark_parse_strict,
    benchmark_serialize,
    benchmark_roundtrip
);
criterion_main!(benches);
