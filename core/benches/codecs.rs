//! Criterion benchmarks for every registered codec.
//!
//! Run with:
//!   cargo bench --bench codecs

use bytes::Bytes;
use codec_core::chain::ByteChain;
use codec_core::compression::{get_codec, CodecType, CompressionLevel};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

const PAYLOAD_LEN: usize = 1 << 20;

fn payload() -> Vec<u8> {
    let text = b"Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor. ";
    (0..PAYLOAD_LEN).map(|i| text[i % text.len()] ^ ((i >> 12) as u8 & 0x07)).collect()
}

fn bench_compress(c: &mut Criterion) {
    let data = payload();
    let contiguous = ByteChain::from(data.clone());
    let fragmented: ByteChain = data.chunks(4096).map(Bytes::copy_from_slice).collect();

    let mut group = c.benchmark_group("compress");
    group.throughput(Throughput::Bytes(PAYLOAD_LEN as u64));

    for t in CodecType::ALL {
        for level in [CompressionLevel::Fastest, CompressionLevel::Best] {
            let codec = get_codec(t, level).unwrap();
            let id = format!("{}/{}", t, level);

            group.bench_with_input(BenchmarkId::new("contiguous", &id), &contiguous, |b, input| {
                b.iter(|| codec.compress(input).unwrap())
            });
            group.bench_with_input(BenchmarkId::new("fragmented", &id), &fragmented, |b, input| {
                b.iter(|| codec.compress(input).unwrap())
            });
        }
    }
    group.finish();
}

fn bench_uncompress(c: &mut Criterion) {
    let data = ByteChain::from(payload());

    let mut group = c.benchmark_group("uncompress");
    group.throughput(Throughput::Bytes(PAYLOAD_LEN as u64));

    for t in CodecType::ALL {
        let codec = get_codec(t, CompressionLevel::Default).unwrap();
        let compressed = codec.compress(&data).unwrap();

        group.bench_with_input(BenchmarkId::new("known_length", t), &compressed, |b, input| {
            b.iter(|| codec.uncompress(input, Some(PAYLOAD_LEN as u64)).unwrap())
        });
        if !codec.needs_uncompressed_length() {
            group.bench_with_input(BenchmarkId::new("unknown_length", t), &compressed, |b, input| {
                b.iter(|| codec.uncompress(input, None).unwrap())
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_compress, bench_uncompress);
criterion_main!(benches);
