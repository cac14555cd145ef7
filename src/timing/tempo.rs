//! Tempo following - push the tempo map into a transport exactly once per change

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use super::{time_base::TimeBase, transport::Transport};

/// Applies tempo changes to a transport once their tick has been reached.
///
/// Progress is an atomic cursor into the change list, shared by every clone.
/// A fine-grained transport poller and the frame loop can both call
/// [`follow`](Self::follow) and each change is still applied only once.
/// The opening tempo is not part of the list; the driver sets it when it
/// starts the transport.
#[derive(Debug, Clone)]
pub struct TempoFollower {
    changes: Arc<[(u64, f64)]>,
    cursor: Arc<AtomicUsize>,
}

impl TempoFollower {
    pub fn new(time_base: &TimeBase) -> Self {
        Self::from_changes(time_base.changes())
    }

    /// Build from (tick, bpm) pairs ascending by tick
    pub fn from_changes(changes: Vec<(u64, f64)>) -> Self {
        Self {
            changes: changes.into(),
            cursor: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Apply every change whose tick the transport has reached.
    ///
    /// When several changes are due at once only the latest tempo is sent.
    /// Returns the tempo that was applied, if any.
    pub fn follow<T: Transport + ?Sized>(&self, transport: &mut T) -> Option<f64> {
        if !transport.is_running() {
            return None;
        }
        let tick = transport.current_tick();

        loop {
            let start = self.cursor.load(Ordering::Acquire);
            let due = self.changes[start..].partition_point(|&(t, _)| t <= tick);
            if due == 0 {
                return None;
            }
            let end = start + due;
            // Claim the whole batch; losing the race means someone else applied it
            if self
                .cursor
                .compare_exchange(start, end, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                let bpm = self.changes[end - 1].1;
                log::debug!(target: "tempo", "tick {}: tempo -> {:.2} BPM", tick, bpm);
                transport.set_tempo(bpm);
                return Some(bpm);
            }
        }
    }

    /// Number of changes not yet applied
    pub fn pending(&self) -> usize {
        self.changes.len() - self.cursor.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timing::transport::ClockTransport;

    #[derive(Default)]
    struct RecordingTransport {
        tick: u64,
        running: bool,
        tempos: Vec<f64>,
    }

    impl Transport for RecordingTransport {
        fn is_running(&self) -> bool {
            self.running
        }
        fn current_tick(&self) -> u64 {
            self.tick
        }
        fn set_tempo(&mut self, bpm: f64) {
            self.tempos.push(bpm);
        }
        fn start(&mut self) {
            self.running = true;
        }
        fn stop(&mut self) {
            self.running = false;
        }
    }

    #[test]
    fn test_applies_each_change_once() {
        let follower = TempoFollower::from_changes(vec![(100, 90.0), (200, 60.0)]);
        let mut transport = RecordingTransport {
            running: true,
            ..Default::default()
        };

        transport.tick = 99;
        assert_eq!(follower.follow(&mut transport), None);

        transport.tick = 100;
        assert_eq!(follower.follow(&mut transport), Some(90.0));
        // Polling again on the same tick does nothing
        assert_eq!(follower.follow(&mut transport), None);
        transport.tick = 150;
        assert_eq!(follower.follow(&mut transport), None);

        assert_eq!(transport.tempos, vec![90.0]);
        assert_eq!(follower.pending(), 1);
    }

    #[test]
    fn test_catch_up_applies_latest_only() {
        let follower = TempoFollower::from_changes(vec![(100, 90.0), (200, 60.0), (900, 30.0)]);
        let mut transport = RecordingTransport {
            running: true,
            tick: 500,
            ..Default::default()
        };

        assert_eq!(follower.follow(&mut transport), Some(60.0));
        assert_eq!(transport.tempos, vec![60.0]);
        assert_eq!(follower.pending(), 1);
    }

    #[test]
    fn test_clones_share_progress() {
        let poller = TempoFollower::from_changes(vec![(100, 90.0)]);
        let frame_loop = poller.clone();
        let mut transport = RecordingTransport {
            running: true,
            tick: 120,
            ..Default::default()
        };

        assert_eq!(poller.follow(&mut transport), Some(90.0));
        assert_eq!(frame_loop.follow(&mut transport), None);
        assert_eq!(transport.tempos, vec![90.0]);
    }

    #[test]
    fn test_stopped_transport_is_left_alone() {
        let follower = TempoFollower::from_changes(vec![(0, 90.0)]);
        let mut transport = ClockTransport::new(480, 120.0);
        assert_eq!(follower.follow(&mut transport), None);
        assert_eq!(transport.bpm(), 120.0);

        transport.start();
        assert_eq!(follower.follow(&mut transport), Some(90.0));
        assert_eq!(transport.bpm(), 90.0);
    }
}
