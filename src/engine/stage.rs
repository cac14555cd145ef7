use thiserror::Error;

use super::lineup::Lineup;
use crate::config::StageConfig;
use crate::instrument::{Instrument, InstrumentPose};
use crate::io::midi::MidiSequence;
use crate::resolve::{partition, resolve_channel};
use crate::timing::{FrameTime, TimeBase, TimingError};
use crate::PERCUSSION_CHANNEL;

#[derive(Debug, Error)]
pub enum StageError {
    #[error("invalid tempo map: {0}")]
    Timing(#[from] TimingError),
}

/// Everything that is on stage for one sequence.
///
/// Built once from the event stream; afterwards the only mutation is
/// [`sample`](Self::sample), which ticks every instrument in order with the
/// same frame time.
pub struct Stage {
    time_base: TimeBase,
    instruments: Vec<Instrument>,
    lineup: Lineup,
    poses: Vec<InstrumentPose>,
    visible: Vec<bool>,
    config: StageConfig,
    duration: f64,
}

impl Stage {
    pub fn from_sequence(sequence: &MidiSequence, config: &StageConfig) -> Result<Self, StageError> {
        let time_base = TimeBase::new(sequence.resolution, &sequence.tempos)?;
        let channels = partition(&sequence.events);

        let mut instruments = Vec::new();
        for (channel, events) in channels.iter().enumerate() {
            let channel = channel as u8;
            if channel == PERCUSSION_CHANNEL {
                instruments.push(Instrument::percussion(events, &time_base));
                continue;
            }
            instruments.extend(
                resolve_channel(events)
                    .iter()
                    .filter_map(|a| Instrument::from_assignment(channel, a, &time_base)),
            );
        }
        for instrument in &mut instruments {
            instrument.set_visibility(config.visibility);
        }

        let duration = time_base.seconds_at(sequence.last_tick());
        log::info!(
            target: "stage",
            "{} instrument(s), {:.1}s, {} tempo change(s)",
            instruments.len(),
            duration,
            time_base.changes().len()
        );

        let lineup = Lineup::new(
            instruments.iter().map(Instrument::kind).collect(),
            config.transition,
        );
        let poses = vec![InstrumentPose::default(); instruments.len()];
        let visible = vec![false; instruments.len()];

        Ok(Self {
            time_base,
            instruments,
            lineup,
            poses,
            visible,
            config: config.clone(),
            duration,
        })
    }

    /// Tick every instrument, then restack them
    pub fn sample(&mut self, time: FrameTime) -> &[InstrumentPose] {
        for (instrument, pose) in self.instruments.iter_mut().zip(&mut self.poses) {
            instrument.tick_into(time, pose);
        }

        for (flag, pose) in self.visible.iter_mut().zip(&self.poses) {
            *flag = pose.visible;
        }
        self.lineup.update(&self.visible, time.delta);
        for (pose, slot) in self.poses.iter_mut().zip(self.lineup.slots()) {
            pose.stack_index = *slot;
        }

        &self.poses
    }

    pub fn time_base(&self) -> &TimeBase {
        &self.time_base
    }

    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    /// Poses from the last [`sample`](Self::sample)
    pub fn poses(&self) -> &[InstrumentPose] {
        &self.poses
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    /// Seconds from start to the last event
    pub fn duration(&self) -> f64 {
        self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instrument::InstrumentKind;
    use crate::io::midi::{ChannelEvent, TempoEvent};

    fn sequence() -> MidiSequence {
        let mut seq = MidiSequence::new(480);
        seq.tempos.push(TempoEvent::from_bpm(0, 120.0));
        seq.events = vec![
            ChannelEvent::program_change(0, 0, 0),
            ChannelEvent::note_on(0, 0, 60, 100),
            ChannelEvent::program_change(0, 1, 0),
            ChannelEvent::note_on(480, 1, 64, 100),
            ChannelEvent::note_on(240, 9, 38, 100),
            // Channel with program changes but nothing to play
            ChannelEvent::program_change(0, 5, 40),
            // Unmapped program
            ChannelEvent::program_change(0, 6, 70),
            ChannelEvent::note_on(0, 6, 60, 100),
        ];
        seq
    }

    #[test]
    fn test_instruments_in_channel_order() {
        let stage = Stage::from_sequence(&sequence(), &StageConfig::default()).unwrap();
        let channels: Vec<u8> = stage.instruments().iter().map(|i| i.channel()).collect();
        assert_eq!(channels, vec![0, 1, 9]);
        assert_eq!(stage.instruments()[2].kind(), InstrumentKind::Percussion);
        assert!((stage.duration() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_percussion_always_present() {
        let mut seq = MidiSequence::new(96);
        seq.events.push(ChannelEvent::note_on(0, 0, 60, 100));
        let stage = Stage::from_sequence(&seq, &StageConfig::default()).unwrap();
        assert!(stage
            .instruments()
            .iter()
            .any(|i| i.kind() == InstrumentKind::Percussion));
    }

    #[test]
    fn test_same_kind_instruments_stack() {
        let config = StageConfig {
            transition: crate::config::TransitionSpeed::None,
            ..StageConfig::default()
        };
        let mut stage = Stage::from_sequence(&sequence(), &config).unwrap();
        let poses = stage.sample(FrameTime::new(0.0, 0.016));
        // Both pianos are within a second of a hit
        assert!(poses[0].visible && poses[1].visible);
        assert_eq!(poses[0].stack_index, 0.0);
        assert_eq!(poses[1].stack_index, 1.0);
        assert_eq!(poses[2].stack_index, 0.0);
    }

    #[test]
    fn test_bad_tempo_map_is_an_error() {
        let mut seq = sequence();
        seq.tempos = vec![TempoEvent::from_bpm(100, 120.0), TempoEvent::from_bpm(10, 60.0)];
        assert!(matches!(
            Stage::from_sequence(&seq, &StageConfig::default()),
            Err(StageError::Timing(TimingError::NonMonotonic { .. }))
        ));
    }
}
