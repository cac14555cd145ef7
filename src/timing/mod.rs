//! Musical time: tick/second conversion, the playback clock, and transports.

/// Frame clock with pre-roll and latency offset.
pub mod clock;
/// Idempotent tempo-map following.
pub mod tempo;
/// Piecewise-constant tempo map.
pub mod time_base;
/// External clock sources.
pub mod transport;

pub use clock::{FrameTime, PlaybackClock};
pub use tempo::TempoFollower;
pub use time_base::{TimeBase, TimingError};
pub use transport::{ClockTransport, Transport};

#[cfg(feature = "rtrb")]
pub use transport::{
    remote_transport, RemoteTransport, TransportCommand, TransportStatus, TransportWorker,
};
