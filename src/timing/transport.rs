//! Transports - the external clock that the stage follows
//!
//! A transport is whatever actually plays the sequence (a synthesizer's
//! sequencer, a DAW, or the software [`ClockTransport`]). The stage only ever
//! asks it where it is and tells it to start, stop, or change tempo.

#[cfg(feature = "rtrb")]
use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc,
};

#[cfg(feature = "rtrb")]
use rtrb::{Consumer, Producer, RingBuffer};

#[cfg(feature = "rtrb")]
use super::tempo::TempoFollower;

/// The sequencer-side clock the stage is synchronized to
pub trait Transport {
    fn is_running(&self) -> bool;

    /// Current playback position in ticks
    fn current_tick(&self) -> u64;

    fn set_tempo(&mut self, bpm: f64);

    fn start(&mut self);

    fn stop(&mut self);
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn is_running(&self) -> bool {
        (**self).is_running()
    }

    fn current_tick(&self) -> u64 {
        (**self).current_tick()
    }

    fn set_tempo(&mut self, bpm: f64) {
        (**self).set_tempo(bpm)
    }

    fn start(&mut self) {
        (**self).start()
    }

    fn stop(&mut self) {
        (**self).stop()
    }
}

/// Software transport: a tick counter driven by elapsed wall time and the
/// current tempo.
#[derive(Debug, Clone)]
pub struct ClockTransport {
    resolution: u16,
    bpm: f64,
    /// Fractional tick position (sub-tick accuracy)
    position: f64,
    running: bool,
}

impl ClockTransport {
    pub fn new(resolution: u16, bpm: f64) -> Self {
        Self {
            resolution,
            bpm,
            position: 0.0,
            running: false,
        }
    }

    /// Advance by elapsed seconds at the current tempo (no-op while stopped)
    pub fn advance(&mut self, seconds: f64) {
        if self.running && seconds > 0.0 {
            // ticks per second = (bpm / 60) * ppq
            self.position += seconds * (self.bpm / 60.0) * self.resolution as f64;
        }
    }

    pub fn bpm(&self) -> f64 {
        self.bpm
    }

    pub fn resolution(&self) -> u16 {
        self.resolution
    }
}

impl Transport for ClockTransport {
    fn is_running(&self) -> bool {
        self.running
    }

    fn current_tick(&self) -> u64 {
        self.position as u64
    }

    fn set_tempo(&mut self, bpm: f64) {
        if bpm.is_finite() && bpm > 0.0 {
            self.bpm = bpm;
        }
    }

    fn start(&mut self) {
        self.running = true;
    }

    fn stop(&mut self) {
        self.running = false;
    }
}

/// Commands sent to a transport running on its own thread
#[cfg(feature = "rtrb")]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransportCommand {
    Start,
    Stop,
    SetTempo(f64),
}

/// Position published by a [`TransportWorker`]
#[cfg(feature = "rtrb")]
#[derive(Debug, Default)]
pub struct TransportStatus {
    tick: AtomicU64,
    running: AtomicBool,
    bpm_bits: AtomicU64,
}

#[cfg(feature = "rtrb")]
impl TransportStatus {
    pub fn tick(&self) -> u64 {
        self.tick.load(Ordering::Acquire)
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub fn bpm(&self) -> f64 {
        f64::from_bits(self.bpm_bits.load(Ordering::Relaxed))
    }

    fn publish(&self, transport: &ClockTransport) {
        self.bpm_bits
            .store(transport.bpm().to_bits(), Ordering::Relaxed);
        self.running.store(transport.is_running(), Ordering::Release);
        self.tick.store(transport.current_tick(), Ordering::Release);
    }
}

/// Owns a [`ClockTransport`] on the transport thread.
///
/// Call [`step`](Self::step) at the transport's own granularity (typically
/// every millisecond). It applies pending commands, advances the clock,
/// follows the tempo map and publishes the new position.
#[cfg(feature = "rtrb")]
pub struct TransportWorker {
    transport: ClockTransport,
    rx: Consumer<TransportCommand>,
    status: Arc<TransportStatus>,
    follower: Option<TempoFollower>,
}

#[cfg(feature = "rtrb")]
impl TransportWorker {
    pub fn step(&mut self, elapsed: f64) {
        while let Ok(command) = self.rx.pop() {
            match command {
                TransportCommand::Start => self.transport.start(),
                TransportCommand::Stop => self.transport.stop(),
                TransportCommand::SetTempo(bpm) => self.transport.set_tempo(bpm),
            }
        }

        self.transport.advance(elapsed);

        if let Some(follower) = &self.follower {
            follower.follow(&mut self.transport);
        }

        self.status.publish(&self.transport);
    }

    pub fn status(&self) -> Arc<TransportStatus> {
        self.status.clone()
    }
}

/// Stage-side handle to a transport running on another thread
#[cfg(feature = "rtrb")]
pub struct RemoteTransport {
    tx: Producer<TransportCommand>,
    status: Arc<TransportStatus>,
}

#[cfg(feature = "rtrb")]
impl RemoteTransport {
    pub fn status(&self) -> &TransportStatus {
        &self.status
    }

    fn send(&mut self, command: TransportCommand) {
        // Only fails when the worker has stopped draining
        if self.tx.push(command).is_err() {
            log::warn!(target: "transport", "command queue full, dropped {:?}", command);
        }
    }
}

#[cfg(feature = "rtrb")]
impl Transport for RemoteTransport {
    fn is_running(&self) -> bool {
        self.status.is_running()
    }

    fn current_tick(&self) -> u64 {
        self.status.tick()
    }

    fn set_tempo(&mut self, bpm: f64) {
        self.send(TransportCommand::SetTempo(bpm));
    }

    fn start(&mut self) {
        self.send(TransportCommand::Start);
    }

    fn stop(&mut self) {
        self.send(TransportCommand::Stop);
    }
}

/// Split a software transport into a thread-side worker and a stage-side handle.
///
/// When `follower` is given, the worker applies tempo changes at its own
/// (finer) granularity. The follower is idempotent, so the playback driver may
/// hold a clone of it too.
#[cfg(feature = "rtrb")]
pub fn remote_transport(
    transport: ClockTransport,
    follower: Option<TempoFollower>,
    capacity: usize,
) -> (RemoteTransport, TransportWorker) {
    let (tx, rx) = RingBuffer::new(capacity);
    let status = Arc::new(TransportStatus::default());
    status.publish(&transport);

    let remote = RemoteTransport {
        tx,
        status: status.clone(),
    };
    let worker = TransportWorker {
        transport,
        rx,
        status,
        follower,
    };
    (remote, worker)
}
