use std::f64::consts::PI;

use super::{Frame, Motion};

/*
Anticipatory Swing
==================

A stick hovers raised, comes down on a ramp that lands exactly on the hit,
then eases back up.

  angle
  max ┤──────╲             ╱──────    (hidden while angle == max)
      │       ╲          ╱
      │        ╲       ╱   slope = return_speed
      │         ╲    ╱
  min ┤──────────●─╱──────────────→ t
                hit

The descent is proposed = -strike_speed · bpm · (now - hit), so a faster tempo
gives a steeper ramp. When the proposal is above max_angle the stick is not
yet due to come down; instead of snapping it eases up at return_speed.
*/

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwingParams {
    /// Degrees per beat-per-minute-second of the descent ramp
    pub strike_speed: f64,
    /// Raised angle in degrees
    pub max_angle: f64,
    /// Strike angle in degrees
    pub min_angle: f64,
    /// Easing speed back to raised, in degrees per second
    pub return_speed: f64,
}

impl SwingParams {
    /// 5 rad/s
    const RETURN_SPEED: f64 = 5.0 * 180.0 / PI;

    /// Drum sticks
    pub const DRUM_STICK: Self = Self {
        strike_speed: 2.0,
        max_angle: 50.0,
        min_angle: 0.0,
        return_speed: Self::RETURN_SPEED,
    };

    /// Cymbal sticks and mallets
    pub const MALLET: Self = Self {
        strike_speed: 4.0,
        max_angle: 50.0,
        min_angle: 0.0,
        return_speed: Self::RETURN_SPEED,
    };
}

/// Stick or mallet that anticipates the next hit
#[derive(Debug, Clone)]
pub struct Swing {
    params: SwingParams,
    angle: f64,
}

impl Swing {
    /// Starts raised
    pub fn new(params: SwingParams) -> Self {
        Self {
            params,
            angle: params.max_angle,
        }
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Fully raised sticks are not drawn
    pub fn is_visible(&self) -> bool {
        self.angle < self.params.max_angle
    }

    fn ease_up(&mut self, delta: f64) {
        self.angle = (self.angle + self.params.return_speed * delta).min(self.params.max_angle);
    }
}

impl Motion for Swing {
    fn advance(&mut self, frame: &Frame) {
        let Some(hit) = frame.struck.or(frame.upcoming) else {
            self.ease_up(frame.delta);
            return;
        };

        let proposed = -self.params.strike_speed * hit.bpm * (frame.time - hit.seconds);
        if proposed > self.params.max_angle {
            self.ease_up(frame.delta);
        } else {
            self.angle = proposed.clamp(self.params.min_angle, self.params.max_angle);
        }
    }

    fn is_settled(&self) -> bool {
        self.angle >= self.params.max_angle
    }
}
