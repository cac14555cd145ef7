/// Payload of a channel event. Only note-ons and program changes drive the stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelPayload {
    NoteOn { note: u8, velocity: u8 },
    ProgramChange { program: u8 },
    Other,
}

/// A channel-specific MIDI event at an absolute tick position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelEvent {
    /// Absolute position in ticks
    pub time: u64,
    /// MIDI channel (0-15)
    pub channel: u8,
    pub payload: ChannelPayload,
}

impl ChannelEvent {
    pub fn note_on(time: u64, channel: u8, note: u8, velocity: u8) -> Self {
        Self {
            time,
            channel,
            payload: ChannelPayload::NoteOn { note, velocity },
        }
    }

    pub fn program_change(time: u64, channel: u8, program: u8) -> Self {
        Self {
            time,
            channel,
            payload: ChannelPayload::ProgramChange { program },
        }
    }

    pub fn other(time: u64, channel: u8) -> Self {
        Self {
            time,
            channel,
            payload: ChannelPayload::Other,
        }
    }

    pub fn is_note_on(&self) -> bool {
        matches!(self.payload, ChannelPayload::NoteOn { .. })
    }
}

/// A tempo change (MIDI "set tempo" meta event)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TempoEvent {
    /// Absolute position in ticks
    pub time: u64,
    /// Microseconds per quarter note
    pub micros_per_quarter: u32,
}

impl TempoEvent {
    pub fn new(time: u64, micros_per_quarter: u32) -> Self {
        Self {
            time,
            micros_per_quarter,
        }
    }

    /// Build a tempo event from beats per minute
    pub fn from_bpm(time: u64, bpm: f64) -> Self {
        Self {
            time,
            micros_per_quarter: (60_000_000.0 / bpm).round() as u32,
        }
    }

    pub fn bpm(&self) -> f64 {
        60_000_000.0 / self.micros_per_quarter as f64
    }
}

/// Everything the stage needs from a parsed MIDI file.
#[derive(Debug, Clone, Default)]
pub struct MidiSequence {
    /// Ticks per quarter note
    pub resolution: u16,
    /// Channel events, time-ordered within each source track
    pub events: Vec<ChannelEvent>,
    /// Tempo changes, ascending by tick
    pub tempos: Vec<TempoEvent>,
}

impl MidiSequence {
    pub fn new(resolution: u16) -> Self {
        Self {
            resolution,
            events: Vec::new(),
            tempos: Vec::new(),
        }
    }

    /// Tick of the last channel event (0 for an empty sequence)
    pub fn last_tick(&self) -> u64 {
        self.events.iter().map(|e| e.time).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tempo_bpm_conversion() {
        let tempo = TempoEvent::from_bpm(0, 120.0);
        assert_eq!(tempo.micros_per_quarter, 500_000);
        assert!((tempo.bpm() - 120.0).abs() < 1e-9);

        let tempo = TempoEvent::new(0, 1_000_000);
        assert!((tempo.bpm() - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_last_tick() {
        let mut seq = MidiSequence::new(480);
        assert_eq!(seq.last_tick(), 0);

        seq.events.push(ChannelEvent::note_on(200, 0, 60, 100));
        seq.events.push(ChannelEvent::note_on(100, 1, 60, 100));
        assert_eq!(seq.last_tick(), 200);
    }
}
