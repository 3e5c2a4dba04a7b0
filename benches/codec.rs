use criterion::{criterion_group, criterion_main, Criterion};

use packform::{codec, format::Format, Value};

pub fn pack_unpack(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    let format = Format::parse("<4I2d").expect("parse");
    let values = [
        Value::Int(1),
        Value::Int(2),
        Value::Int(3),
        Value::Int(4),
        Value::F64(1.5),
        Value::F64(-2.5),
    ];

    group.bench_function("encode", |b| {
        b.iter(|| codec::encode(&format, &values).expect("encode"));
    });

    let data = codec::encode(&format, &values).expect("encode");
    group.bench_function("decode", |b| {
        b.iter(|| codec::decode(&format, &data).expect("decode"));
    });

    group.bench_function("pack_with_parse", |b| {
        b.iter(|| packform::pack("<4I2d", &values).expect("pack"));
    });

    group.finish();
}

criterion_group!(benches, pack_unpack);
criterion_main!(benches);
