use crate::config::VisibilityConfig;

/// Whether an instrument is on stage, from the times of its hits.
///
/// An instrument shows up shortly before it plays, lingers after, and stays
/// through short rests instead of flickering off and on.
#[derive(Debug, Clone)]
pub struct Presence {
    /// Hit times in seconds, ascending
    times: Vec<f64>,
    config: VisibilityConfig,
}

impl Presence {
    pub fn new(times: impl IntoIterator<Item = f64>, config: VisibilityConfig) -> Self {
        let mut times: Vec<f64> = times.into_iter().filter(|t| t.is_finite()).collect();
        times.sort_by(f64::total_cmp);
        Self { times, config }
    }

    pub fn set_config(&mut self, config: VisibilityConfig) {
        self.config = config;
    }

    pub fn is_visible(&self, now: f64) -> bool {
        let idx = self.times.partition_point(|&t| t <= now);
        let previous = idx.checked_sub(1).map(|i| self.times[i]);
        let next = self.times.get(idx).copied();

        if next.is_some_and(|next| next - now <= self.config.lead) {
            return true;
        }
        if previous.is_some_and(|previous| now - previous <= self.config.tail) {
            return true;
        }
        match (previous, next) {
            (Some(previous), Some(next)) => next - previous < self.config.bridge,
            _ => false,
        }
    }
}
