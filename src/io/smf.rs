//! Standard MIDI File loading
//!
//! Flattens every track of a `.mid` file into absolute-tick channel events and
//! a global tempo list. Only metrical (ticks per quarter note) timing is
//! supported; timecode-based files are rejected.

use std::path::Path;

use midly::{MetaMessage, MidiMessage, Smf, Timing, TrackEventKind};
use thiserror::Error;

use super::midi::{ChannelEvent, ChannelPayload, MidiSequence, TempoEvent};

#[derive(Debug, Error)]
pub enum SmfError {
    #[error("failed to read MIDI file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse MIDI file: {0}")]
    Parse(#[from] midly::Error),
    #[error("timecode (SMPTE) division is not supported")]
    UnsupportedTiming,
}

/// Read and parse a MIDI file from disk
pub fn load(path: &Path) -> Result<MidiSequence, SmfError> {
    let data = std::fs::read(path)?;
    let sequence = parse(&data)?;
    log::info!(
        target: "smf",
        "loaded {}: {} channel events, {} tempo events, resolution {}",
        path.display(),
        sequence.events.len(),
        sequence.tempos.len(),
        sequence.resolution
    );
    Ok(sequence)
}

/// Parse an in-memory MIDI file
pub fn parse(data: &[u8]) -> Result<MidiSequence, SmfError> {
    let smf = Smf::parse(data)?;

    let resolution = match smf.header.timing {
        Timing::Metrical(tpq) => tpq.as_int(),
        Timing::Timecode(fps, subframes) => {
            log::warn!(
                target: "smf",
                "timecode division ({} fps, {} subframes) is not supported",
                fps.as_f32(),
                subframes
            );
            return Err(SmfError::UnsupportedTiming);
        }
    };

    let mut sequence = MidiSequence::new(resolution);

    for track in &smf.tracks {
        let mut tick: u64 = 0;
        for event in track {
            tick += event.delta.as_int() as u64;
            match event.kind {
                TrackEventKind::Midi { channel, message } => {
                    let payload = match message {
                        MidiMessage::NoteOn { key, vel } if vel.as_int() > 0 => {
                            ChannelPayload::NoteOn {
                                note: key.as_int(),
                                velocity: vel.as_int(),
                            }
                        }
                        MidiMessage::ProgramChange { program } => ChannelPayload::ProgramChange {
                            program: program.as_int(),
                        },
                        // Note-on with zero velocity is a note-off
                        _ => ChannelPayload::Other,
                    };
                    sequence.events.push(ChannelEvent {
                        time: tick,
                        channel: channel.as_int(),
                        payload,
                    });
                }
                TrackEventKind::Meta(MetaMessage::Tempo(tempo)) => {
                    sequence.tempos.push(TempoEvent::new(tick, tempo.as_int()));
                }
                _ => {}
            }
        }
    }

    // Tempo events may live in several tracks; stable sort keeps file order at equal ticks
    sequence.tempos.sort_by_key(|t| t.time);

    Ok(sequence)
}
