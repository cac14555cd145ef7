use std::f64::consts::PI;

use super::{Frame, Motion};

/// Damped cosine: `A(t) = amplitude · cos(t·ω) / (offset + t³·ω·damping)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WobbleParams {
    pub amplitude: f64,
    /// Angular frequency ω in radians per second
    pub frequency: f64,
    pub offset: f64,
    pub damping: f64,
    /// Seconds after which the wobble is cut to zero
    pub cutoff: f64,
}

impl WobbleParams {
    pub const CYMBAL: Self = Self {
        amplitude: 1.5,
        frequency: 7.0 * PI,
        offset: 3.0,
        damping: 1.0,
        cutoff: 4.5,
    };

    pub fn amplitude_at(&self, t: f64) -> f64 {
        if t < 0.0 || t >= self.cutoff {
            return 0.0;
        }
        self.amplitude * (t * self.frequency).cos()
            / (self.offset + t * t * t * self.frequency * self.damping)
    }
}

impl Default for WobbleParams {
    fn default() -> Self {
        Self::CYMBAL
    }
}

/// Decaying oscillation after a hit (cymbals, bells)
#[derive(Debug, Clone)]
pub struct Wobble {
    params: WobbleParams,
    /// None until the first hit
    elapsed: Option<f64>,
    rotation: f64,
}

impl Wobble {
    pub fn new(params: WobbleParams) -> Self {
        Self {
            params,
            elapsed: None,
            rotation: 0.0,
        }
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }
}

impl Default for Wobble {
    fn default() -> Self {
        Self::new(WobbleParams::CYMBAL)
    }
}

impl Motion for Wobble {
    fn advance(&mut self, frame: &Frame) {
        self.elapsed = match (frame.struck, self.elapsed) {
            (Some(_), _) => Some(0.0),
            (None, Some(t)) => Some(t + frame.delta),
            (None, None) => None,
        };
        self.rotation = self
            .elapsed
            .map_or(0.0, |t| self.params.amplitude_at(t));
    }

    fn is_settled(&self) -> bool {
        self.elapsed.map_or(true, |t| t >= self.params.cutoff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Hit;

    #[test]
    fn test_curve_shape() {
        let params = WobbleParams::CYMBAL;
        assert!((params.amplitude_at(0.0) - 0.5).abs() < 1e-12);
        assert_eq!(params.amplitude_at(4.5), 0.0);
        assert_eq!(params.amplitude_at(10.0), 0.0);

        // Peaks shrink over time
        let first = params.amplitude_at(2.0 / 7.0).abs();
        let later = params.amplitude_at(6.0 / 7.0).abs();
        assert!(later < first);
    }

    #[test]
    fn test_idle_until_struck() {
        let mut wobble = Wobble::default();
        let frame = Frame {
            time: 1.0,
            delta: 0.1,
            struck: None,
            upcoming: None,
        };
        wobble.advance(&frame);
        assert_eq!(wobble.rotation(), 0.0);
        assert!(wobble.is_settled());
    }

    #[test]
    fn test_retrigger_resets_timer() {
        let hit = Hit {
            tick: 0,
            seconds: 0.0,
            note: 49,
            velocity: 100,
            bpm: 120.0,
        };
        let mut wobble = Wobble::default();
        let struck = Frame {
            time: 0.0,
            delta: 0.016,
            struck: Some(&hit),
            upcoming: None,
        };
        let quiet = Frame {
            struck: None,
            ..struck
        };

        wobble.advance(&struck);
        assert!((wobble.rotation() - 0.5).abs() < 1e-12);
        for _ in 0..10 {
            wobble.advance(&quiet);
        }
        assert!(!wobble.is_settled());

        wobble.advance(&struck);
        assert!((wobble.rotation() - 0.5).abs() < 1e-12);
    }
}
