use super::{Frame, Motion};

/*
Recoil
======

  offset
    0 ┤────┐      ╱────────          ╱──────
      │    │    ╱                  ╱
      │    │  ╱  slope = rate    ╱
      │    │╱                  │
 -vel·d┤    ▼                  ▼
      └────┴───────────────────┴──────────→ t
          hit                 hit

A hit snaps the offset down in proportion to velocity; the offset then climbs
back linearly and stops at zero.
*/

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecoilParams {
    /// Offset at full velocity
    pub max_distance: f64,
    /// Recovery in units per second
    pub recovery_rate: f64,
}

impl RecoilParams {
    pub const DEFAULT: Self = Self {
        max_distance: 2.0,
        recovery_rate: 22.0,
    };
}

impl Default for RecoilParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Struck-and-spring-back displacement, always within `[-max_distance, 0]`
#[derive(Debug, Clone)]
pub struct Recoil {
    params: RecoilParams,
    offset: f64,
}

impl Recoil {
    pub fn new(params: RecoilParams) -> Self {
        Self {
            params,
            offset: 0.0,
        }
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }
}

impl Default for Recoil {
    fn default() -> Self {
        Self::new(RecoilParams::DEFAULT)
    }
}

impl Motion for Recoil {
    fn advance(&mut self, frame: &Frame) {
        self.offset = match frame.struck {
            Some(hit) => -(hit.velocity.min(127) as f64 / 127.0) * self.params.max_distance,
            None => (self.offset + self.params.recovery_rate * frame.delta).min(0.0),
        };
    }

    fn is_settled(&self) -> bool {
        self.offset >= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Hit;

    fn hit(velocity: u8) -> Hit {
        Hit {
            tick: 0,
            seconds: 0.0,
            note: 38,
            velocity,
            bpm: 120.0,
        }
    }

    fn frame(delta: f64, struck: Option<&Hit>) -> Frame<'_> {
        Frame {
            time: 0.0,
            delta,
            struck,
            upcoming: None,
        }
    }

    #[test]
    fn test_trigger_scales_with_velocity() {
        let mut recoil = Recoil::default();
        let full = hit(127);
        recoil.advance(&frame(0.0, Some(&full)));
        assert!((recoil.offset() + 2.0).abs() < 1e-12);

        let half = hit(64);
        recoil.advance(&frame(0.0, Some(&half)));
        assert!((recoil.offset() + 64.0 / 127.0 * 2.0).abs() < 1e-12);
        assert!(!recoil.is_settled());
    }

    #[test]
    fn test_offset_stays_clamped_and_settles() {
        let mut recoil = Recoil::default();
        let strike = hit(127);
        recoil.advance(&frame(0.016, Some(&strike)));

        for _ in 0..120 {
            recoil.advance(&frame(0.016, None));
            assert!(recoil.offset() >= -RecoilParams::DEFAULT.max_distance);
            assert!(recoil.offset() <= 0.0);
        }
        assert_eq!(recoil.offset(), 0.0);
        assert!(recoil.is_settled());

        // Stays at rest with nothing to play
        recoil.advance(&frame(5.0, None));
        assert_eq!(recoil.offset(), 0.0);
    }
}
