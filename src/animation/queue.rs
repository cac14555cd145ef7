use std::collections::VecDeque;

use super::Hit;

/// Pending hits of one voice, consumed front to back as time advances.
///
/// Filled once at construction. The only way out is [`drain_due`](Self::drain_due),
/// so a hit can never fire twice.
#[derive(Debug, Clone, Default)]
pub struct HitQueue {
    hits: VecDeque<Hit>,
}

impl HitQueue {
    /// Hits must already be in time order
    pub fn new(hits: impl IntoIterator<Item = Hit>) -> Self {
        Self {
            hits: hits.into_iter().collect(),
        }
    }

    /// Pop every hit due at `now` and return the latest of them.
    ///
    /// Earlier hits due in the same frame are dropped: only the most recent
    /// one sets the pose.
    pub fn drain_due(&mut self, now: f64) -> Option<Hit> {
        let mut latest = None;
        while self.hits.front().is_some_and(|hit| hit.seconds <= now) {
            latest = self.hits.pop_front();
        }
        latest
    }

    pub fn peek(&self) -> Option<&Hit> {
        self.hits.front()
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}
