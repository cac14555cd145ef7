//! Benchmarks for tick/second conversion.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use jamstage::{io::TempoEvent, timing::TimeBase};

/// A tempo map with a change every bar
fn tempo_map(changes: u64) -> TimeBase {
    let tempos: Vec<TempoEvent> = (0..changes)
        .map(|i| TempoEvent::from_bpm(i * 1920, 90.0 + (i % 7) as f64 * 10.0))
        .collect();
    TimeBase::new(480, &tempos).expect("valid tempo map")
}

pub fn bench_time_base(c: &mut Criterion) {
    let mut group = c.benchmark_group("timing/time_base");

    for &changes in &[1u64, 64, 1024] {
        let time_base = tempo_map(changes);
        let last_tick = changes * 1920;

        group.bench_with_input(
            BenchmarkId::new("seconds_at", changes),
            &changes,
            |b, _| {
                let mut tick = 0;
                b.iter(|| {
                    tick = (tick + 7919) % last_tick.max(1);
                    black_box(time_base.seconds_at(black_box(tick)))
                })
            },
        );

        let end = time_base.seconds_at(last_tick);
        group.bench_with_input(BenchmarkId::new("tick_at", changes), &changes, |b, _| {
            let mut seconds = 0.0;
            b.iter(|| {
                seconds = (seconds + 0.37) % end.max(1.0);
                black_box(time_base.tick_at(black_box(seconds)))
            })
        });
    }

    group.finish();
}
