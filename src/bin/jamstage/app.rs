//! Jamstage - application setup and runners

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
    time::{Duration, Instant},
};

use color_eyre::eyre::{eyre, Result as EyreResult};

use jamstage::{
    config::StageConfig,
    engine::{Session, Stage},
    io::MidiSequence,
    timing::{remote_transport, ClockTransport, TempoFollower, TransportWorker},
};

use super::ui::{StageInfo, UiApp};

/// Commands in flight between the UI and the transport thread
const COMMAND_CAPACITY: usize = 64;
/// Transport thread granularity
const TRANSPORT_STEP: Duration = Duration::from_millis(1);
/// Simulated frame length when running headless
const HEADLESS_FRAME: f64 = 1.0 / 60.0;

pub struct Jamstage {
    stage: Stage,
}

impl Jamstage {
    pub fn new(sequence: MidiSequence, config: StageConfig) -> EyreResult<Self> {
        let stage = Stage::from_sequence(&sequence, &config)?;
        Ok(Self { stage })
    }

    fn software_transport(&self) -> ClockTransport {
        let time_base = self.stage.time_base();
        ClockTransport::new(time_base.resolution(), time_base.first_tempo_bpm())
    }

    /// Run with the terminal UI, transport on its own thread
    pub fn run(self) -> EyreResult<()> {
        let follower = TempoFollower::new(self.stage.time_base());
        let (remote, worker) = remote_transport(
            self.software_transport(),
            Some(follower.clone()),
            COMMAND_CAPACITY,
        );

        let alive = Arc::new(AtomicBool::new(true));
        let transport_thread = spawn_transport(worker, alive.clone())?;

        let info = StageInfo::from_stage(&self.stage);
        let session = Session::with_follower(self.stage, remote, follower);
        let mut ui = UiApp::new(session, info);

        let mut terminal = ratatui::init();
        let result = ui.run(&mut terminal);
        ratatui::restore();

        alive.store(false, Ordering::Release);
        transport_thread
            .join()
            .map_err(|_| eyre!("transport thread panicked"))?;
        result
    }

    /// Run as fast as possible against a software transport, printing a
    /// line per second of playback.
    pub fn run_headless(self) -> EyreResult<()> {
        let transport = self.software_transport();
        let instruments = self.stage.instruments().len();
        println!(
            "=== jamstage === {} instrument(s), {:.1}s",
            instruments,
            self.stage.duration()
        );

        let mut session = Session::new(self.stage, transport);
        let mut next_line = f64::NEG_INFINITY;
        loop {
            let report = session.frame(HEADLESS_FRAME);
            let time = report.time.time;
            let (tick, bpm, finished) = (report.tick, report.bpm, report.finished);
            let visible = report.poses.iter().filter(|p| p.visible).count();

            session
                .driver_mut()
                .transport_mut()
                .advance(HEADLESS_FRAME);

            if time >= next_line {
                let pending: usize = session
                    .stage()
                    .instruments()
                    .iter()
                    .map(|i| i.pending_hits())
                    .sum();
                println!(
                    "{:>7.2}s  tick {:>7}  {:>6.1} BPM  visible {}/{}  pending {}",
                    time, tick, bpm, visible, instruments, pending
                );
                next_line = time.floor() + 1.0;
            }
            if finished {
                break;
            }
        }
        println!("done");
        Ok(())
    }
}

fn spawn_transport(
    mut worker: TransportWorker,
    alive: Arc<AtomicBool>,
) -> EyreResult<thread::JoinHandle<()>> {
    let handle = thread::Builder::new()
        .name("transport".into())
        .spawn(move || {
            let mut last = Instant::now();
            while alive.load(Ordering::Acquire) {
                thread::sleep(TRANSPORT_STEP);
                let now = Instant::now();
                worker.step(now.duration_since(last).as_secs_f64());
                last = now;
            }
        })?;
    Ok(handle)
}
