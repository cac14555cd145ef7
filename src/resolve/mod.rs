//! Instrument resolution: from a flat event stream to per-instrument tracks.
//!
//! # How It Works
//!
//! ```text
//! events ──► partition ──► 16 channel buckets
//!                            │
//!                            ├─ channel 9 ──────────► percussion kit
//!                            └─ others ─► resolve_channel ─► ProgramAssignment*
//!                                                              │
//!                                         instrument_for_program ─► InstrumentKind
//! ```

pub mod partition;
pub mod program;
pub mod table;

pub use partition::partition;
pub use program::{dedup_program_changes, resolve_channel, ProgramAssignment};
pub use table::{drum_for_note, instrument_for_program};
