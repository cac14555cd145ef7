use crate::config::StageConfig;
use crate::timing::{FrameTime, PlaybackClock, TempoFollower, TimeBase, Transport};

/// Advances the playback clock and keeps the transport in step with it.
///
/// The only writer of the clock. Each call to [`advance`](Self::advance)
/// yields the one [`FrameTime`] every instrument samples that frame.
pub struct PlaybackDriver<T: Transport> {
    clock: PlaybackClock,
    transport: T,
    follower: TempoFollower,
    first_tempo_bpm: f64,
    started: bool,
    stopped: bool,
}

impl<T: Transport> PlaybackDriver<T> {
    pub fn new(transport: T, time_base: &TimeBase, config: &StageConfig) -> Self {
        Self::with_follower(transport, time_base, config, TempoFollower::new(time_base))
    }

    /// Share a tempo follower with a transport poller running elsewhere
    pub fn with_follower(
        transport: T,
        time_base: &TimeBase,
        config: &StageConfig,
        follower: TempoFollower,
    ) -> Self {
        Self {
            clock: PlaybackClock::new(
                config.pre_roll,
                config.latency_offset,
                config.stall_threshold,
            ),
            transport,
            follower,
            first_tempo_bpm: time_base.first_tempo_bpm(),
            started: false,
            stopped: false,
        }
    }

    /// Advance one frame.
    ///
    /// Starts the transport (at the opening tempo) on the first frame where
    /// frame time plus latency offset reaches zero, then applies any tempo
    /// change the transport has reached.
    pub fn advance(&mut self, delta: f64) -> FrameTime {
        if self.stopped {
            return FrameTime::new(self.clock.now(), 0.0);
        }

        let frame = self.clock.advance(delta);

        if !self.started && self.clock.transport_due() {
            self.transport.set_tempo(self.first_tempo_bpm);
            self.transport.start();
            self.started = true;
            log::debug!(
                target: "playback",
                "transport started at {:.3}s, {:.2} BPM",
                frame.time,
                self.first_tempo_bpm
            );
        }

        if self.started {
            self.follower.follow(&mut self.transport);
        }
        frame
    }

    /// Stop the transport and freeze the clock
    pub fn stop(&mut self) {
        if !self.stopped {
            self.transport.stop();
            self.stopped = true;
            log::debug!(target: "playback", "stopped at {:.3}s", self.clock.now());
        }
    }

    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn follower(&self) -> &TempoFollower {
        &self.follower
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::midi::TempoEvent;
    use crate::timing::ClockTransport;

    fn config() -> StageConfig {
        StageConfig {
            pre_roll: 1.0,
            latency_offset: 0.25,
            ..StageConfig::default()
        }
    }

    #[test]
    fn test_transport_starts_after_pre_roll_minus_latency() {
        let tb = TimeBase::constant(480, 90.0).unwrap();
        let mut driver = PlaybackDriver::new(ClockTransport::new(480, 120.0), &tb, &config());

        driver.advance(0.5);
        assert!(!driver.transport().is_running());

        // -0.25 + 0.25 latency = 0: due
        driver.advance(0.25);
        assert!(driver.transport().is_running());
        assert!((driver.transport().bpm() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_tempo_change_applied_once_reached() {
        let tb = TimeBase::new(
            480,
            &[TempoEvent::from_bpm(0, 120.0), TempoEvent::from_bpm(960, 60.0)],
        )
        .unwrap();
        let mut driver = PlaybackDriver::new(ClockTransport::new(480, 120.0), &tb, &config());

        let mut frames = 0;
        while driver.transport().current_tick() < 960 && frames < 1000 {
            let frame = driver.advance(0.01);
            driver.transport_mut().advance(frame.delta);
            frames += 1;
        }
        assert!(driver.transport().current_tick() >= 960);
        // The change is picked up on the next frame
        driver.advance(0.01);
        assert!((driver.transport().bpm() - 60.0).abs() < 1e-9);
        assert_eq!(driver.follower().pending(), 0);
    }

    #[test]
    fn test_stop_freezes_clock() {
        let tb = TimeBase::constant(480, 120.0).unwrap();
        let mut driver = PlaybackDriver::new(ClockTransport::new(480, 120.0), &tb, &config());
        driver.advance(2.0);
        driver.advance(0.5);
        driver.stop();
        assert!(!driver.transport().is_running());

        let now = driver.now();
        let frame = driver.advance(1.0);
        assert_eq!(frame.time, now);
        assert_eq!(frame.delta, 0.0);
    }
}
