//! Instruments: a kind plus the voices that animate it
//!
//! A melodic instrument is one voice over all of its note-ons; the drum kit
//! is one voice per kit piece. Which motion models a voice composes follows
//! from the instrument's [`Articulation`].

pub mod kind;
pub mod percussion;

pub use kind::{
    Articulation, BassStyle, GuitarType, InstrumentKind, KeyboardSkin, MalletType, PipeSkin,
    TrumpetType,
};
pub use percussion::{DrumVoice, TomPitch};

use crate::animation::{
    Hit, HitQueue, Pose, Presence, RecoilParams, SwingParams, Voice, WobbleParams,
};
use crate::config::VisibilityConfig;
use crate::io::midi::ChannelEvent;
use crate::resolve::{drum_for_note, instrument_for_program, ProgramAssignment};
use crate::timing::{FrameTime, TimeBase};
use crate::PERCUSSION_CHANNEL;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One instrument's frame output
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InstrumentPose {
    pub visible: bool,
    /// Slot among visible instruments of the same family (eased, fractional)
    pub stack_index: f64,
    /// One pose per voice, in voice order
    pub voices: Vec<Pose>,
}

#[derive(Debug, Clone)]
pub struct Instrument {
    kind: InstrumentKind,
    channel: u8,
    program: Option<u8>,
    start_time: u64,
    voices: Vec<Voice>,
    /// `None` for instruments that never leave the stage
    presence: Option<Presence>,
    hit_count: usize,
}

impl Instrument {
    /// The instrument for one program assignment of a melodic channel.
    ///
    /// Returns `None` when the program has no stage instrument or the
    /// assignment is empty.
    pub fn from_assignment(
        channel: u8,
        assignment: &ProgramAssignment,
        time_base: &TimeBase,
    ) -> Option<Self> {
        if assignment.events.is_empty() {
            return None;
        }
        let Some(kind) = instrument_for_program(assignment.program) else {
            log::debug!(
                target: "resolve",
                "channel {}: program {} has no instrument, skipped",
                channel,
                assignment.program
            );
            return None;
        };

        let hits: Vec<Hit> = assignment
            .events
            .iter()
            .filter_map(|e| Hit::from_event(e, time_base))
            .collect();
        let hit_count = hits.len();
        let presence = Presence::new(hits.iter().map(|h| h.seconds), VisibilityConfig::default());
        let voice = melodic_voice(kind, HitQueue::new(hits));

        Some(Self {
            kind,
            channel,
            program: Some(assignment.program),
            start_time: assignment.start_time,
            voices: vec![voice],
            presence: Some(presence),
            hit_count,
        })
    }

    /// The drum kit over the whole percussion channel. Program changes are
    /// ignored and notes without a kit piece are not animated.
    pub fn percussion(events: &[ChannelEvent], time_base: &TimeBase) -> Self {
        let mut buckets: Vec<Vec<Hit>> = vec![Vec::new(); DrumVoice::KIT.len()];
        let mut hit_count = 0;

        for event in events {
            let Some(hit) = Hit::from_event(event, time_base) else {
                continue;
            };
            let slot = drum_for_note(hit.note)
                .and_then(|drum| DrumVoice::KIT.iter().position(|d| *d == drum));
            if let Some(slot) = slot {
                buckets[slot].push(hit);
                hit_count += 1;
            }
        }

        let voices = DrumVoice::KIT
            .iter()
            .zip(buckets)
            .map(|(drum, hits)| drum.voice(HitQueue::new(hits)))
            .collect();

        Self {
            kind: InstrumentKind::Percussion,
            channel: PERCUSSION_CHANNEL,
            program: None,
            start_time: 0,
            voices,
            presence: None,
            hit_count,
        }
    }

    pub fn set_visibility(&mut self, config: VisibilityConfig) {
        if let Some(presence) = &mut self.presence {
            presence.set_config(config);
        }
    }

    pub fn kind(&self) -> InstrumentKind {
        self.kind
    }

    pub fn channel(&self) -> u8 {
        self.channel
    }

    /// Program this instrument was resolved from (`None` for the drum kit)
    pub fn program(&self) -> Option<u8> {
        self.program
    }

    pub fn start_time(&self) -> u64 {
        self.start_time
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    /// Animated hits at construction
    pub fn hit_count(&self) -> usize {
        self.hit_count
    }

    /// Hits not yet consumed, over all voices
    pub fn pending_hits(&self) -> usize {
        self.voices.iter().map(|v| v.queue().len()).sum()
    }

    pub fn is_visible(&self, now: f64) -> bool {
        self.presence.as_ref().map_or(true, |p| p.is_visible(now))
    }

    pub fn tick(&mut self, time: FrameTime) -> InstrumentPose {
        let mut pose = InstrumentPose::default();
        self.tick_into(time, &mut pose);
        pose
    }

    /// Sample every voice into an existing pose buffer. The stack index is
    /// left alone; it belongs to the stage lineup.
    pub fn tick_into(&mut self, time: FrameTime, pose: &mut InstrumentPose) {
        let visible = self.is_visible(time.time);
        pose.visible = visible;
        pose.voices.clear();
        pose.voices.extend(self.voices.iter_mut().map(|voice| Pose {
            visible,
            ..voice.tick(time)
        }));
    }
}

fn melodic_voice(kind: InstrumentKind, queue: HitQueue) -> Voice {
    let voice = Voice::new(kind.name(), queue);
    match kind.articulation() {
        Articulation::Struck => {
            let stick = match kind {
                InstrumentKind::Mallets(_) => SwingParams::MALLET,
                _ => SwingParams::DRUM_STICK,
            };
            voice
                .with_swing(stick)
                .with_recoil(RecoilParams::DEFAULT)
        }
        Articulation::Rung => voice
            .with_wobble(WobbleParams::CYMBAL)
            .with_swing(SwingParams::MALLET),
        Articulation::Pressed => voice.with_recoil(RecoilParams::DEFAULT),
    }
}
