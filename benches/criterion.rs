use criterion::{black_box, criterion_group, criterion_main, Criterion};

use raid6ec::config::CodecParams;
use raid6ec::field::Field;
use raid6ec::striper::pad;
use raid6ec::Codec;

fn field_ops(c: &mut Criterion) {
    let field = Field::default();
    c.bench_function("field_mul", |b| {
        b.iter(|| {
            let mut acc = 1u8;
            for i in 0..=255u8 {
                acc = field.mul(black_box(acc), black_box(i));
            }
            acc
        })
    });
    c.bench_function("field_div", |b| {
        b.iter(|| {
            let mut acc = 1u8;
            for i in 1..=255u8 {
                acc = field.div(black_box(acc), black_box(i)).unwrap();
            }
            acc
        })
    });
}

fn codec_encode(c: &mut Criterion) {
    let params = CodecParams::default();
    let codec = Codec::new(params);
    let input = vec![0x5au8; 64 * 1024];
    let (data, _) = pad(&input, params.n, params.chunk_size);

    c.bench_function("codec_encode_64kb", |b| {
        b.iter(|| black_box(codec.encode(black_box(&data)).unwrap()))
    });
}

fn codec_reconstruct(c: &mut Criterion) {
    let params = CodecParams::default();
    let codec = Codec::new(params);
    let input = vec![0x5au8; params.n * params.chunk_size];
    let (data, _) = pad(&input, params.n, params.chunk_size);
    let encoded = codec.encode(&data).unwrap();

    let erased = [0usize, 1];
    let rows: Vec<(usize, Vec<u8>)> = (0..params.n + params.m)
        .filter(|i| !erased.contains(i))
        .take(params.n)
        .map(|i| (i, encoded.chunk(i, 0).to_vec()))
        .collect();

    c.bench_function("codec_reconstruct_one_stripe", |b| {
        b.iter(|| black_box(codec.reconstruct(black_box(&rows), &erased).unwrap()))
    });
}

criterion_group!(benches, field_ops, codec_encode, codec_reconstruct);
criterion_main!(benches);
