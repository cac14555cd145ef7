// Purpose - external interfaces, file formats

pub mod midi;
pub mod smf;

pub use midi::{ChannelEvent, ChannelPayload, MidiSequence, TempoEvent};
