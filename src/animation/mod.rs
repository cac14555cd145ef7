//! Animation: turning queued hits into continuous motion
//!
//! # How It Works
//!
//! Each [`voice::Voice`] owns a [`queue::HitQueue`] and a few small motion
//! models. Once per frame the voice pops every hit that is due, then hands
//! each model the same [`Frame`]: the frame time, the hit struck this frame
//! (if any) and the next hit still waiting.
//!
//! ```text
//!            ┌─────────────── Frame ───────────────┐
//! HitQueue ─►│ time, delta, struck, upcoming       │─► Recoil  ─► offset
//!            │                                     │─► Swing   ─► stick angle
//!            └─────────────────────────────────────┘─► Wobble  ─► rotation
//! ```
//!
//! The models never look at each other. An instrument is whichever subset of
//! them it composes.

pub mod presence;
pub mod queue;
pub mod recoil;
pub mod swing;
pub mod voice;
pub mod wobble;

pub use presence::Presence;
pub use queue::HitQueue;
pub use recoil::{Recoil, RecoilParams};
pub use swing::{Swing, SwingParams};
pub use voice::{Phase, Pose, StickPose, Voice};
pub use wobble::{Wobble, WobbleParams};

use crate::io::midi::{ChannelEvent, ChannelPayload};
use crate::timing::TimeBase;

/// A note-on resolved against the tempo map
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub tick: u64,
    /// Seconds from playback start
    pub seconds: f64,
    pub note: u8,
    pub velocity: u8,
    /// Tempo active at `tick`
    pub bpm: f64,
}

impl Hit {
    /// Resolve a note-on; any other event gives `None`
    pub fn from_event(event: &ChannelEvent, time_base: &TimeBase) -> Option<Self> {
        match event.payload {
            ChannelPayload::NoteOn { note, velocity } => Some(Self {
                tick: event.time,
                seconds: time_base.seconds_at(event.time),
                note,
                velocity,
                bpm: time_base.bpm_at(event.time),
            }),
            _ => None,
        }
    }
}

/// What a motion model sees on one frame
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Seconds since playback start
    pub time: f64,
    /// Seconds since the previous frame
    pub delta: f64,
    /// The hit that fired this frame (the latest, when several were due)
    pub struck: Option<&'a Hit>,
    /// The next hit still queued
    pub upcoming: Option<&'a Hit>,
}

/// A motion model driven by hits
pub trait Motion {
    fn advance(&mut self, frame: &Frame);

    /// At rest: nothing moves until the next hit
    fn is_settled(&self) -> bool;
}
