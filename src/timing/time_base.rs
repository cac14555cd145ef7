use thiserror::Error;

use crate::io::midi::TempoEvent;

/*
Time Base
=========

Converts MIDI tick positions into seconds using a piecewise-constant tempo map.

  seconds
     ↑
     │                    ╱   slope = m₂ / R
     │              ╱────╱
     │        ╱────╱          slope = m₁ / R
     │   ╱───╱
     │  ╱                     slope = m₀ / R
     └─┴──────┴──────┴────────→ ticks
       t₀     t₁     t₂

Each segment [tᵢ, tᵢ₊₁) runs at mᵢ microseconds per quarter note. With R ticks
per quarter note, the segment lasts (tᵢ₊₁ - tᵢ) · mᵢ / R microseconds.

We integrate once at construction and store the elapsed seconds at every
segment start. A query is then a binary search for the segment plus one
multiply-add inside it.
*/

/// MIDI default tempo when a file does not set one: 120 BPM
pub const DEFAULT_MICROS_PER_QUARTER: u32 = 500_000;

const MICROS_PER_SECOND: f64 = 1_000_000.0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimingError {
    #[error("resolution must be at least one tick per quarter note")]
    ZeroResolution,
    #[error("tempo at tick {tick} has zero microseconds per quarter note")]
    ZeroTempo { tick: u64 },
    #[error("tempo event at tick {tick} comes after tick {previous}")]
    NonMonotonic { previous: u64, tick: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Segment {
    tick: u64,
    micros_per_quarter: u32,
    start_seconds: f64,
}

/// Tick ↔ seconds conversion against a tempo map
#[derive(Debug, Clone)]
pub struct TimeBase {
    resolution: u16,
    segments: Vec<Segment>,
}

impl TimeBase {
    /// Build a time base from a resolution (ticks per quarter note) and
    /// tempo events ascending by tick.
    ///
    /// Several tempo events on one tick collapse to the last one. Ticks before
    /// the first tempo event run at the MIDI default of 120 BPM.
    pub fn new(resolution: u16, tempos: &[TempoEvent]) -> Result<Self, TimingError> {
        if resolution == 0 {
            return Err(TimingError::ZeroResolution);
        }

        let mut points: Vec<(u64, u32)> = Vec::with_capacity(tempos.len() + 1);
        for tempo in tempos {
            if tempo.micros_per_quarter == 0 {
                return Err(TimingError::ZeroTempo { tick: tempo.time });
            }
            match points.last_mut() {
                Some(last) if tempo.time < last.0 => {
                    return Err(TimingError::NonMonotonic {
                        previous: last.0,
                        tick: tempo.time,
                    });
                }
                // Last one wins at a tick
                Some(last) if tempo.time == last.0 => last.1 = tempo.micros_per_quarter,
                _ => points.push((tempo.time, tempo.micros_per_quarter)),
            }
        }

        if points.first().map_or(true, |&(tick, _)| tick > 0) {
            points.insert(0, (0, DEFAULT_MICROS_PER_QUARTER));
        }

        let mut segments = Vec::with_capacity(points.len());
        let mut elapsed = 0.0;
        let mut previous: Option<(u64, u32)> = None;
        for (tick, micros_per_quarter) in points {
            if let Some((prev_tick, prev_tempo)) = previous {
                elapsed += segment_seconds(tick - prev_tick, prev_tempo, resolution);
            }
            segments.push(Segment {
                tick,
                micros_per_quarter,
                start_seconds: elapsed,
            });
            previous = Some((tick, micros_per_quarter));
        }

        Ok(Self {
            resolution,
            segments,
        })
    }

    /// A constant-tempo time base
    pub fn constant(resolution: u16, bpm: f64) -> Result<Self, TimingError> {
        Self::new(resolution, &[TempoEvent::from_bpm(0, bpm)])
    }

    /// Ticks per quarter note
    pub fn resolution(&self) -> u16 {
        self.resolution
    }

    /// Elapsed seconds at a tick position
    pub fn seconds_at(&self, tick: u64) -> f64 {
        let segment = self.segment_for_tick(tick);
        segment.start_seconds
            + segment_seconds(tick - segment.tick, segment.micros_per_quarter, self.resolution)
    }

    /// Tick position at an elapsed time (floored). Negative times map to tick 0.
    pub fn tick_at(&self, seconds: f64) -> u64 {
        if seconds.is_nan() || seconds <= 0.0 {
            return 0;
        }
        let idx = self
            .segments
            .partition_point(|s| s.start_seconds <= seconds)
            .saturating_sub(1);
        let segment = &self.segments[idx];
        let micros = (seconds - segment.start_seconds) * MICROS_PER_SECOND;
        let ticks = micros * self.resolution as f64 / segment.micros_per_quarter as f64;
        // Guard against 0.4999999 style rounding right on a tick boundary
        segment.tick + (ticks + 1e-9).floor() as u64
    }

    /// Microseconds per quarter note active at a tick
    pub fn tempo_at(&self, tick: u64) -> u32 {
        self.segment_for_tick(tick).micros_per_quarter
    }

    /// Beats per minute active at a tick
    pub fn bpm_at(&self, tick: u64) -> f64 {
        micros_to_bpm(self.tempo_at(tick))
    }

    /// Tempo the sequence starts with
    pub fn first_tempo_bpm(&self) -> f64 {
        micros_to_bpm(self.segments[0].micros_per_quarter)
    }

    /// Tempo changes after the opening tempo, as (tick, bpm)
    pub fn changes(&self) -> Vec<(u64, f64)> {
        self.segments
            .iter()
            .skip(1)
            .map(|s| (s.tick, micros_to_bpm(s.micros_per_quarter)))
            .collect()
    }

    fn segment_for_tick(&self, tick: u64) -> &Segment {
        // segments[0] always starts at tick 0, so the index never underflows
        let idx = self.segments.partition_point(|s| s.tick <= tick) - 1;
        &self.segments[idx]
    }
}

fn segment_seconds(ticks: u64, micros_per_quarter: u32, resolution: u16) -> f64 {
    ticks as f64 * micros_per_quarter as f64 / resolution as f64 / MICROS_PER_SECOND
}

fn micros_to_bpm(micros_per_quarter: u32) -> f64 {
    60.0 * MICROS_PER_SECOND / micros_per_quarter as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    const PPQ: u16 = 480;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_single_tempo() {
        let tb = TimeBase::constant(PPQ, 120.0).unwrap();
        assert!(approx(tb.seconds_at(0), 0.0));
        assert!(approx(tb.seconds_at(480), 0.5));
        assert!(approx(tb.seconds_at(240), 0.25));
        assert!(approx(tb.first_tempo_bpm(), 120.0));
    }

    #[test]
    fn test_tempo_change() {
        let tb = TimeBase::new(
            PPQ,
            &[TempoEvent::from_bpm(0, 120.0), TempoEvent::from_bpm(480, 60.0)],
        )
        .unwrap();

        assert!(approx(tb.seconds_at(480), 0.5));
        assert!(approx(tb.seconds_at(960), 1.5));
        assert!(approx(tb.seconds_at(720), 1.0));
        assert!(approx(tb.bpm_at(479), 120.0));
        assert!(approx(tb.bpm_at(480), 60.0));
        assert_eq!(tb.changes(), vec![(480, 60.0)]);
    }

    #[test]
    fn test_default_tempo_before_first_event() {
        let tb = TimeBase::new(PPQ, &[TempoEvent::from_bpm(960, 60.0)]).unwrap();
        // Two quarters at the 120 BPM default, then one at 60 BPM
        assert!(approx(tb.seconds_at(960), 1.0));
        assert!(approx(tb.seconds_at(1440), 2.0));
        assert!(approx(tb.first_tempo_bpm(), 120.0));

        let empty = TimeBase::new(PPQ, &[]).unwrap();
        assert!(approx(empty.seconds_at(480), 0.5));
    }

    #[test]
    fn test_duplicate_tick_last_wins() {
        let tb = TimeBase::new(
            PPQ,
            &[TempoEvent::from_bpm(0, 120.0), TempoEvent::from_bpm(0, 60.0)],
        )
        .unwrap();
        assert!(approx(tb.first_tempo_bpm(), 60.0));
        assert!(approx(tb.seconds_at(480), 1.0));
        assert!(tb.changes().is_empty());
    }

    #[test]
    fn test_tick_at_inverts_seconds_at() {
        let tb = TimeBase::new(
            PPQ,
            &[
                TempoEvent::from_bpm(0, 120.0),
                TempoEvent::from_bpm(480, 60.0),
                TempoEvent::from_bpm(1000, 180.0),
            ],
        )
        .unwrap();

        for tick in [0, 1, 100, 479, 480, 481, 999, 1000, 1001, 5000] {
            assert_eq!(tb.tick_at(tb.seconds_at(tick)), tick);
        }
        assert_eq!(tb.tick_at(-1.0), 0);
    }

    #[test]
    fn test_construction_errors() {
        assert_eq!(
            TimeBase::new(0, &[]).unwrap_err(),
            TimingError::ZeroResolution
        );
        assert_eq!(
            TimeBase::new(PPQ, &[TempoEvent::new(10, 0)]).unwrap_err(),
            TimingError::ZeroTempo { tick: 10 }
        );
        assert_eq!(
            TimeBase::new(
                PPQ,
                &[TempoEvent::from_bpm(100, 120.0), TempoEvent::from_bpm(50, 90.0)]
            )
            .unwrap_err(),
            TimingError::NonMonotonic {
                previous: 100,
                tick: 50
            }
        );
    }
}
