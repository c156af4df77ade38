use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use stbcomp::{
    compress_bytes, compress_with, embed_bytes, CompressOptions, EmbedOptions, SourceEncoding,
};
use std::hint::black_box;
use std::time::Duration;

fn generate_test_data(size: usize, pattern: &str) -> Vec<u8> {
    match pattern {
        "text" => {
            // Generate Lorem ipsum style text data
            let base = b"Lorem ipsum dolor sit amet, consectetur adipiscing elit. ";
            let mut data = Vec::with_capacity(size);
            while data.len() < size {
                data.extend_from_slice(base);
            }
            data.truncate(size);
            data
        }
        "binary" => {
            // Generate binary data with some patterns
            (0..size).map(|i| ((i * 17 + 11) % 256) as u8).collect()
        }
        "repetitive" => {
            // Highly repetitive data that compresses well
            let pattern = b"ABCDEFGHIJ";
            let mut data = Vec::with_capacity(size);
            while data.len() < size {
                data.extend_from_slice(pattern);
            }
            data.truncate(size);
            data
        }
        "random" => {
            // Pseudo-random data that compresses poorly
            let mut x = 1u32;
            (0..size)
                .map(|_| {
                    x = x.wrapping_mul(1103515245).wrapping_add(12345);
                    (x >> 16) as u8
                })
                .collect()
        }
        _ => panic!("Unknown pattern: {}", pattern),
    }
}

fn compression_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("compression_throughput");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(50);

    for size in [1024, 10240, 102400, 1048576].iter() {
        let size_label = match *size {
            1024 => "1KB",
            10240 => "10KB",
            102400 => "100KB",
            1048576 => "1MB",
            _ => "unknown",
        };

        for pattern in ["text", "binary", "repetitive", "random"].iter() {
            let data = generate_test_data(*size, pattern);
            let benchmark_id = BenchmarkId::from_parameter(format!("{size_label}/{pattern}"));

            group.throughput(Throughput::Bytes(*size as u64));
            group.bench_with_input(benchmark_id, &data, |b, data| {
                b.iter(|| compress_bytes(black_box(data)).expect("Compression failed"));
            });
        }
    }

    group.finish();
}

fn hash_table_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash_table_size");
    group.measurement_time(Duration::from_secs(5));

    let data = generate_test_data(102400, "text");

    for hash_size in [1024usize, 8192, 32768, 262144].iter() {
        let options = CompressOptions::default().with_hash_size(*hash_size);

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(hash_size), &data, |b, data| {
            b.iter(|| {
                compress_with(black_box(data), black_box(&options)).expect("Compression failed")
            });
        });
    }

    group.finish();
}

fn source_emission(c: &mut Criterion) {
    let mut group = c.benchmark_group("source_emission");
    group.measurement_time(Duration::from_secs(5));

    let data = generate_test_data(102400, "binary");

    for (encoding, label) in [
        (SourceEncoding::U8, "u8"),
        (SourceEncoding::U32, "u32"),
        (SourceEncoding::Base85, "base85"),
    ] {
        let options = EmbedOptions {
            encoding,
            ..EmbedOptions::default()
        };

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(label), &data, |b, data| {
            b.iter(|| {
                embed_bytes(black_box(data), "bench.bin", "bench", &options)
                    .expect("Embedding failed")
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    compression_throughput,
    hash_table_size,
    source_emission
);
criterion_main!(benches);
