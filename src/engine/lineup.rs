use crate::config::TransitionSpeed;
use crate::instrument::InstrumentKind;

/// Stacks visible instruments of the same family side by side.
///
/// Families ignore skin and type, so a piano and a synth keyboard share one
/// stack. Each instrument's target slot is its rank among the visible
/// instruments of its family. Hidden ones park on the last visible slot, or
/// on slot 0 when none of the family is visible; slots never go below 0.
/// Slots ease toward their targets rather than jumping, unless the speed is
/// `None`.
#[derive(Debug, Clone)]
pub struct Lineup {
    kinds: Vec<InstrumentKind>,
    slots: Vec<f64>,
    speed: TransitionSpeed,
}

impl Lineup {
    pub fn new(kinds: Vec<InstrumentKind>, speed: TransitionSpeed) -> Self {
        let slots = vec![0.0; kinds.len()];
        Self {
            kinds,
            slots,
            speed,
        }
    }

    /// Move every slot one frame toward its target. `visible` is indexed like
    /// the kinds passed at construction.
    pub fn update(&mut self, visible: &[bool], delta: f64) {
        let step = match self.speed.divisor() {
            Some(divisor) => (delta.max(0.0) * 2500.0 / divisor).min(1.0),
            None => 1.0,
        };

        for i in 0..self.kinds.len() {
            let kind = self.kinds[i];
            let mut family = 0usize;
            let mut visible_count = 0usize;
            let mut rank = 0usize;
            for (j, other) in self.kinds.iter().enumerate() {
                if !other.same_family(&kind) {
                    continue;
                }
                family += 1;
                let shown = visible.get(j).copied().unwrap_or(false);
                if shown {
                    visible_count += 1;
                    if j < i {
                        rank += 1;
                    }
                }
            }

            let target = if visible.get(i).copied().unwrap_or(false) {
                rank as f64
            } else {
                visible_count.saturating_sub(1) as f64
            };

            let slot = &mut self.slots[i];
            *slot += step * (target - *slot);
            *slot = slot.clamp(0.0, family as f64);
        }
    }

    pub fn slot(&self, index: usize) -> f64 {
        self.slots.get(index).copied().unwrap_or(0.0)
    }

    pub fn slots(&self) -> &[f64] {
        &self.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instrument::{GuitarType, KeyboardSkin, MalletType};

    const PIANO: InstrumentKind = InstrumentKind::Keyboard(KeyboardSkin::Piano);
    const GUITAR: InstrumentKind = InstrumentKind::Guitar(GuitarType::Acoustic);

    #[test]
    fn test_snap_to_rank() {
        let mut lineup = Lineup::new(vec![PIANO, GUITAR, PIANO, PIANO], TransitionSpeed::None);
        lineup.update(&[true, true, true, true], 0.016);
        assert_eq!(lineup.slots(), &[0.0, 0.0, 1.0, 2.0]);

        // First piano leaves: the others move down, it parks on the last slot
        lineup.update(&[false, true, true, true], 0.016);
        assert_eq!(lineup.slots(), &[1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_eases_toward_target() {
        let mut lineup = Lineup::new(vec![PIANO, PIANO], TransitionSpeed::Normal);
        lineup.update(&[true, true], 0.016);
        // 0.016 * 2500 / 500 = 0.08 of the way per frame
        assert!((lineup.slot(1) - 0.08).abs() < 1e-9);

        for _ in 0..200 {
            lineup.update(&[true, true], 0.016);
        }
        assert!((lineup.slot(1) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_long_frame_does_not_overshoot() {
        let mut lineup = Lineup::new(vec![PIANO, PIANO, PIANO], TransitionSpeed::Fast);
        lineup.update(&[true, true, true], 5.0);
        assert_eq!(lineup.slots(), &[0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_skins_share_a_stack() {
        let synth = InstrumentKind::Keyboard(KeyboardSkin::Synth);
        let electric = InstrumentKind::Guitar(GuitarType::Electric);
        let vibes = InstrumentKind::Mallets(MalletType::Vibes);
        let mut lineup = Lineup::new(
            vec![PIANO, synth, GUITAR, electric, vibes],
            TransitionSpeed::None,
        );
        lineup.update(&[true, true, true, true, true], 0.016);
        assert_eq!(lineup.slots(), &[0.0, 1.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_hidden_family_parks_at_front() {
        let mut lineup = Lineup::new(vec![PIANO, PIANO], TransitionSpeed::None);
        lineup.update(&[false, false], 0.016);
        assert_eq!(lineup.slots(), &[0.0, 0.0]);
    }
}
