use crate::animation::{HitQueue, RecoilParams, SwingParams, Voice, WobbleParams};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TomPitch {
    LowFloor,
    HighFloor,
    Low,
    LowMid,
    HighMid,
    High,
}

/// One piece of the drum kit
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrumVoice {
    Snare,
    BassDrum,
    Tom(TomPitch),
    CrashOne,
    CrashTwo,
    Splash,
    HiHat,
}

impl DrumVoice {
    /// Kit pieces in the order they are sampled and reported
    pub const KIT: [DrumVoice; 12] = [
        DrumVoice::Snare,
        DrumVoice::BassDrum,
        DrumVoice::Tom(TomPitch::LowFloor),
        DrumVoice::Tom(TomPitch::HighFloor),
        DrumVoice::Tom(TomPitch::Low),
        DrumVoice::Tom(TomPitch::LowMid),
        DrumVoice::Tom(TomPitch::HighMid),
        DrumVoice::Tom(TomPitch::High),
        DrumVoice::CrashOne,
        DrumVoice::CrashTwo,
        DrumVoice::Splash,
        DrumVoice::HiHat,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DrumVoice::Snare => "Snare",
            DrumVoice::BassDrum => "Bass Drum",
            DrumVoice::Tom(TomPitch::LowFloor) => "Low Floor Tom",
            DrumVoice::Tom(TomPitch::HighFloor) => "High Floor Tom",
            DrumVoice::Tom(TomPitch::Low) => "Low Tom",
            DrumVoice::Tom(TomPitch::LowMid) => "Low-Mid Tom",
            DrumVoice::Tom(TomPitch::HighMid) => "High-Mid Tom",
            DrumVoice::Tom(TomPitch::High) => "High Tom",
            DrumVoice::CrashOne => "Crash 1",
            DrumVoice::CrashTwo => "Crash 2",
            DrumVoice::Splash => "Splash",
            DrumVoice::HiHat => "Hi-Hat",
        }
    }

    /// Build this kit piece's voice over its hits
    pub fn voice(&self, queue: HitQueue) -> Voice {
        let voice = Voice::new(self.name(), queue);
        match self {
            DrumVoice::Snare | DrumVoice::BassDrum | DrumVoice::Tom(_) => voice
                .with_swing(SwingParams::DRUM_STICK)
                .with_recoil(RecoilParams::DEFAULT),
            DrumVoice::CrashOne | DrumVoice::CrashTwo | DrumVoice::Splash => voice
                .with_wobble(WobbleParams::CYMBAL)
                .with_swing(SwingParams::MALLET),
            DrumVoice::HiHat => voice
                .with_recoil(RecoilParams::DEFAULT)
                .with_swing(SwingParams::MALLET),
        }
    }
}
