pub mod animation; // Hit queues and motion models
pub mod config;
pub mod engine; // Stage, playback driver, session
pub mod instrument;
pub mod io;
pub mod resolve; // Channel partitioning and program resolution
pub mod timing; // Tempo map, clock, transports

/// MIDI channels per port
pub const CHANNEL_COUNT: usize = 16;
/// General MIDI drum channel (channel 10, zero-based)
pub const PERCUSSION_CHANNEL: u8 = 9;
