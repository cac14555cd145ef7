//! State types for the UI
//!
//! Static stage layout is captured once; the per-frame part is refreshed from
//! each [`FrameReport`] without reallocating once warmed up.

use jamstage::{
    engine::{FrameReport, Stage},
    instrument::InstrumentPose,
};

/// Stage layout, captured once before playback
#[derive(Clone, Debug)]
pub struct StageInfo {
    /// Seconds to the last event
    pub duration: f64,
    pub resolution: u16,
    pub instruments: Vec<InstrumentInfo>,
}

#[derive(Clone, Debug)]
pub struct InstrumentInfo {
    pub name: &'static str,
    pub channel: u8,
    pub program: Option<u8>,
    pub voices: Vec<&'static str>,
}

impl StageInfo {
    pub fn from_stage(stage: &Stage) -> Self {
        let instruments = stage
            .instruments()
            .iter()
            .map(|instrument| InstrumentInfo {
                name: instrument.kind().name(),
                channel: instrument.channel(),
                program: instrument.program(),
                voices: instrument.voices().iter().map(|v| v.name()).collect(),
            })
            .collect();

        Self {
            duration: stage.duration(),
            resolution: stage.time_base().resolution(),
            instruments,
        }
    }
}

/// Latest frame
#[derive(Clone, Debug, Default)]
pub struct FrameState {
    pub time: f64,
    pub tick: u64,
    pub bpm: f64,
    pub running: bool,
    pub finished: bool,
    pub poses: Vec<InstrumentPose>,
}

impl FrameState {
    pub fn update(&mut self, report: &FrameReport) {
        self.time = report.time.time;
        self.tick = report.tick;
        self.bpm = report.bpm;
        self.finished = report.finished;
        self.poses
            .resize_with(report.poses.len(), InstrumentPose::default);
        for (pose, latest) in self.poses.iter_mut().zip(report.poses) {
            pose.visible = latest.visible;
            pose.stack_index = latest.stack_index;
            pose.voices.clone_from(&latest.voices);
        }
    }
}
