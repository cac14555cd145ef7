//! The engine: a stage of instruments, a driver that owns the clock, and a
//! session tying them to a transport.
//!
//! # How It Works
//!
//! ```text
//! frame delta ─► PlaybackDriver ── FrameTime ──► Stage::sample ─► [InstrumentPose]
//!                    │   ▲                         (every instrument, in order)
//!          start/tempo   │ current tick
//!                    ▼   │
//!                  Transport
//! ```
//!
//! One frame produces exactly one [`FrameTime`](crate::timing::FrameTime);
//! every instrument samples against it.

pub mod driver;
pub mod lineup;
pub mod session;
pub mod stage;

pub use driver::PlaybackDriver;
pub use lineup::Lineup;
pub use session::{FrameReport, Session};
pub use stage::{Stage, StageError};
