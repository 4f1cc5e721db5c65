//! Benchmark – generic decode loops over the fixture forms.
#![allow(missing_docs)]

use cef::{
    FixedWidthDecoder, StreamingDecoder, VariableWidthDecoder,
    testing::{Be16, HighBitPair, produce_chunks},
};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

/// Produce a *deterministic* `HighBitPair` buffer of exactly `target_len`
/// code units, alternating single units and pairs.
fn make_payload(target_len: usize) -> Vec<u8> {
    let mut units = Vec::with_capacity(target_len);
    let mut i = 0u8;
    while units.len() < target_len {
        if i % 3 == 0 && units.len() + 2 <= target_len {
            units.extend([0x80 | (i & 0x7F), i & 0x7F]);
        } else {
            units.push(i & 0x7F);
        }
        i = i.wrapping_add(1);
    }
    units
}

fn bench_one_shot(c: &mut Criterion) {
    let mut group = c.benchmark_group("one_shot");
    for &len in &[1_000usize, 100_000] {
        let payload = make_payload(len);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::new("variable", len), &payload, |b, units| {
            b.iter(|| {
                let sum: u32 = VariableWidthDecoder::<HighBitPair>::new(black_box(units))
                    .map(|d| d.map_or(0, |d| d.value))
                    .fold(0, u32::wrapping_add);
                black_box(sum);
            });
        });
        group.bench_with_input(BenchmarkId::new("fixed", len), &payload, |b, units| {
            b.iter(|| {
                let decoder = FixedWidthDecoder::<Be16>::new(black_box(units)).expect("even length");
                let sum: u32 = decoder
                    .map(|d| d.map_or(0, |d| d.value))
                    .fold(0, u32::wrapping_add);
                black_box(sum);
            });
        });
    }
    group.finish();
}

fn bench_streaming(c: &mut Criterion) {
    let payload = make_payload(10_000);
    let mut group = c.benchmark_group("streaming_split");
    for &parts in &[1usize, 100, 1_000, 5_000] {
        group.bench_with_input(BenchmarkId::from_parameter(parts), &parts, |b, &parts| {
            b.iter(|| {
                let mut decoder = StreamingDecoder::<HighBitPair>::new();
                let mut produced = 0usize;
                for chunk in produce_chunks(black_box(&payload), parts) {
                    produced += decoder.feed(chunk).len();
                }
                decoder.finish().expect("payload is well-formed");
                black_box(produced);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_one_shot, bench_streaming);
criterion_main!(benches);
