use super::{
    queue::HitQueue,
    recoil::{Recoil, RecoilParams},
    swing::{Swing, SwingParams},
    wobble::{Wobble, WobbleParams},
    Frame, Motion,
};
use crate::timing::FrameTime;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,      // Nothing moving
    Triggered, // Struck this frame
    Decaying,  // Settling after a hit
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StickPose {
    /// Degrees above the strike position
    pub angle: f64,
    pub visible: bool,
}

/// What the renderer draws for one voice on one frame
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    /// Wobble rotation
    pub rotation: f64,
    /// Recoil displacement, never positive
    pub offset: f64,
    pub stick: Option<StickPose>,
    pub visible: bool,
}

/// One independently animated part: a whole melodic instrument, or one drum
/// of the kit.
#[derive(Debug, Clone)]
pub struct Voice {
    name: &'static str,
    queue: HitQueue,
    recoil: Option<Recoil>,
    swing: Option<Swing>,
    wobble: Option<Wobble>,
    phase: Phase,
}

impl Voice {
    pub fn new(name: &'static str, queue: HitQueue) -> Self {
        Self {
            name,
            queue,
            recoil: None,
            swing: None,
            wobble: None,
            phase: Phase::Idle,
        }
    }

    pub fn with_recoil(mut self, params: RecoilParams) -> Self {
        self.recoil = Some(Recoil::new(params));
        self
    }

    pub fn with_swing(mut self, params: SwingParams) -> Self {
        self.swing = Some(Swing::new(params));
        self
    }

    pub fn with_wobble(mut self, params: WobbleParams) -> Self {
        self.wobble = Some(Wobble::new(params));
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn queue(&self) -> &HitQueue {
        &self.queue
    }

    /// Consume due hits and advance every model with the same frame
    pub fn tick(&mut self, time: FrameTime) -> Pose {
        let struck = self.queue.drain_due(time.time);
        let frame = Frame {
            time: time.time,
            delta: time.delta,
            struck: struck.as_ref(),
            upcoming: self.queue.peek(),
        };

        if let Some(recoil) = &mut self.recoil {
            recoil.advance(&frame);
        }
        if let Some(swing) = &mut self.swing {
            swing.advance(&frame);
        }
        if let Some(wobble) = &mut self.wobble {
            wobble.advance(&frame);
        }

        self.phase = if struck.is_some() {
            Phase::Triggered
        } else if self.is_settled() {
            Phase::Idle
        } else {
            Phase::Decaying
        };

        self.pose()
    }

    fn is_settled(&self) -> bool {
        self.recoil.as_ref().map_or(true, Motion::is_settled)
            && self.swing.as_ref().map_or(true, Motion::is_settled)
            && self.wobble.as_ref().map_or(true, Motion::is_settled)
    }

    /// Current pose without advancing
    pub fn pose(&self) -> Pose {
        Pose {
            rotation: self.wobble.as_ref().map_or(0.0, Wobble::rotation),
            offset: self.recoil.as_ref().map_or(0.0, Recoil::offset),
            stick: self.swing.as_ref().map(|swing| StickPose {
                angle: swing.angle(),
                visible: swing.is_visible(),
            }),
            visible: true,
        }
    }
}
