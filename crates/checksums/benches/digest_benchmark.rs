//! crates/checksums/benches/digest_benchmark.rs
//!
//! Benchmarks for streaming MD5 throughput.
//!
//! Run with: `cargo bench -p checksums`

use std::hint::black_box;
use std::io::Cursor;
use std::sync::atomic::AtomicBool;

use checksums::{Md5, digest_reader};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

fn patterned_data(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 251) as u8).collect()
}

fn bench_one_shot(c: &mut Criterion) {
    let mut group = c.benchmark_group("md5_one_shot");
    for size in [4096, 65536, 1 << 20] {
        let data = patterned_data(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| black_box(Md5::digest(black_box(data))));
        });
    }
    group.finish();
}

fn bench_chunked_reader(c: &mut Criterion) {
    let mut group = c.benchmark_group("md5_chunked_reader");
    let cancel = AtomicBool::new(false);
    for size in [1 << 20, 8 << 20] {
        let data = patterned_data(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| black_box(digest_reader(Cursor::new(data), &cancel)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_one_shot, bench_chunked_reader);
criterion_main!(benches);
