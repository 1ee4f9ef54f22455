use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

#[path = "../tests/common/mod.rs"]
mod common;

use common::{driver, ReplayWriter};

fn synthetic_replay() -> Vec<u8> {
    let drivers: Vec<_> = (0..20).map(|i| driver(i, "Driver")).collect();
    let mut writer = ReplayWriter::new(1.0);
    writer
        .metadata(0x0a)
        .drivers(&drivers)
        .events_header(2000, 2000 * 41, 0.0, 400.0);

    for slice in 0..2000u32 {
        writer.slice(slice as f32 * 0.2, 41);
        for i in 0..20u8 {
            writer
                .telemetry(i, slice % 64, 7000, (slice % 64) as u8)
                .unrecognized(i, 24);
        }
        writer.checkpoint((slice % 20) as u8, slice as f32 * 0.2, (slice / 100) as u8, 1);
    }

    writer.finish()
}

fn bench_decode_metadata(c: &mut Criterion) {
    let data = synthetic_replay();
    c.bench_function("bench_decode_metadata", |b| {
        b.iter(|| black_box(rf2vcr::decode(&data).is_ok()))
    });
}

fn bench_decode_events(c: &mut Criterion) {
    let data = synthetic_replay();
    c.bench_function("bench_decode_events", |b| {
        b.iter(|| {
            let replay = rf2vcr::decode(&data).unwrap();
            black_box(replay.events().filter(|x| x.is_ok()).count())
        })
    });
}

fn bench_aggregate_laps(c: &mut Criterion) {
    let data = synthetic_replay();
    c.bench_function("bench_aggregate_laps", |b| {
        b.iter(|| {
            let replay = rf2vcr::decode(&data).unwrap();
            black_box(rf2vcr::laps::aggregate(replay.events()).unwrap().len())
        })
    });
}

criterion_group!(
    benches,
    bench_decode_metadata,
    bench_decode_events,
    bench_aggregate_laps
);
criterion_main!(benches);
