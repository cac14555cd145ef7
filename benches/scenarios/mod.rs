//! Benchmarks for whole-song scenarios.
//!
//! These build a band-sized arrangement (drums, bass, keys, mallets, with
//! program changes along the way) and measure loading and playing it.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use jamstage::{
    config::StageConfig,
    engine::Stage,
    io::{ChannelEvent, MidiSequence, TempoEvent},
    resolve::{partition, resolve_channel},
    timing::FrameTime,
};

use crate::SONG_BARS;

const PPQ: u64 = 480;
const BAR: u64 = PPQ * 4;

/// Drums in eighths, bass in quarters, keys in chords, mallets in sixteenths,
/// keys switching program every eight bars
fn arrangement(bars: u64) -> MidiSequence {
    let mut seq = MidiSequence::new(PPQ as u16);
    seq.tempos.push(TempoEvent::from_bpm(0, 120.0));
    seq.tempos.push(TempoEvent::from_bpm(bars / 2 * BAR, 132.0));

    for bar in 0..bars {
        let start = bar * BAR;
        if bar % 8 == 0 {
            seq.events
                .push(ChannelEvent::program_change(start, 1, [0, 4, 6][(bar / 8 % 3) as usize]));
        }
        for eighth in 0..8 {
            let t = start + eighth * PPQ / 2;
            seq.events.push(ChannelEvent::note_on(t, 9, 42, 80));
            if eighth % 4 == 0 {
                seq.events.push(ChannelEvent::note_on(t, 9, 36, 110));
            }
            if eighth % 4 == 2 {
                seq.events.push(ChannelEvent::note_on(t, 9, 38, 100));
            }
        }
        for beat in 0..4 {
            let t = start + beat * PPQ;
            seq.events.push(ChannelEvent::note_on(t, 0, 40, 100));
            for note in [60, 64, 67] {
                seq.events.push(ChannelEvent::note_on(t, 1, note, 70));
            }
        }
        for sixteenth in 0..16 {
            seq.events.push(ChannelEvent::note_on(
                start + sixteenth * PPQ / 4,
                2,
                72 + (sixteenth % 5) as u8,
                90,
            ));
        }
    }
    seq.events
        .insert(0, ChannelEvent::program_change(0, 0, 33));
    seq.events
        .insert(0, ChannelEvent::program_change(0, 2, 12));
    seq
}

pub fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/resolve");

    for &bars in SONG_BARS {
        let seq = arrangement(bars);

        group.bench_with_input(BenchmarkId::new("partition", bars), &bars, |b, _| {
            b.iter(|| black_box(partition(black_box(&seq.events))))
        });

        let channels = partition(&seq.events);
        group.bench_with_input(BenchmarkId::new("resolve_keys", bars), &bars, |b, _| {
            b.iter(|| black_box(resolve_channel(black_box(&channels[1]))))
        });

        group.bench_with_input(BenchmarkId::new("build_stage", bars), &bars, |b, _| {
            b.iter(|| {
                black_box(Stage::from_sequence(black_box(&seq), &StageConfig::default()))
            })
        });
    }

    group.finish();
}

pub fn bench_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/frames");
    let delta = 1.0 / 60.0;

    for &bars in SONG_BARS {
        let seq = arrangement(bars);
        let config = StageConfig::default();

        // One second of playback at 60 fps, from a fresh stage each time
        group.bench_with_input(BenchmarkId::new("one_second", bars), &bars, |b, _| {
            b.iter_batched(
                || Stage::from_sequence(&seq, &config).expect("valid arrangement"),
                |mut stage| {
                    let mut time = 0.0;
                    for _ in 0..60 {
                        time += delta;
                        black_box(stage.sample(FrameTime::new(time, delta)));
                    }
                    stage
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}
