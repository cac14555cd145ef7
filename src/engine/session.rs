use super::{driver::PlaybackDriver, stage::Stage};
use crate::instrument::InstrumentPose;
use crate::timing::{FrameTime, TempoFollower, Transport};

/// Result of one frame of a session
#[derive(Debug)]
pub struct FrameReport<'a> {
    pub time: FrameTime,
    /// Transport position
    pub tick: u64,
    /// Tempo at the frame time
    pub bpm: f64,
    /// Past the last event plus the end padding; the transport has been stopped
    pub finished: bool,
    pub poses: &'a [InstrumentPose],
}

/// A stage driven by a transport, frame by frame
pub struct Session<T: Transport> {
    stage: Stage,
    driver: PlaybackDriver<T>,
}

impl<T: Transport> Session<T> {
    pub fn new(stage: Stage, transport: T) -> Self {
        let driver = PlaybackDriver::new(transport, stage.time_base(), stage.config());
        Self { stage, driver }
    }

    /// Share the tempo follower with a transport worker
    pub fn with_follower(stage: Stage, transport: T, follower: TempoFollower) -> Self {
        let driver =
            PlaybackDriver::with_follower(transport, stage.time_base(), stage.config(), follower);
        Self { stage, driver }
    }

    pub fn frame(&mut self, delta: f64) -> FrameReport<'_> {
        let time = self.driver.advance(delta);
        let tick = self.driver.transport().current_tick();

        let time_base = self.stage.time_base();
        let bpm = time_base.bpm_at(time_base.tick_at(time.time));

        let finished = time.time > self.stage.duration() + self.stage.config().end_padding;
        if finished && !self.driver.is_stopped() {
            log::info!(target: "playback", "finished at {:.1}s", time.time);
            self.driver.stop();
        }

        let poses = self.stage.sample(time);
        FrameReport {
            time,
            tick,
            bpm,
            finished,
            poses,
        }
    }

    pub fn stop(&mut self) {
        self.driver.stop();
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn driver(&self) -> &PlaybackDriver<T> {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut PlaybackDriver<T> {
        &mut self.driver
    }
}
