use crate::io::midi::{ChannelEvent, ChannelPayload};

/// One instrument's share of a channel: everything played under one program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramAssignment {
    pub program: u8,
    /// First tick this assignment owns (0 for the first assignment)
    pub start_time: u64,
    pub events: Vec<ChannelEvent>,
}

impl ProgramAssignment {
    /// Note-on events of this assignment, in order
    pub fn note_ons(&self) -> impl Iterator<Item = &ChannelEvent> {
        self.events.iter().filter(|e| e.is_note_on())
    }
}

/// Split one time-ordered, non-percussion channel into program assignments.
///
/// A channel without a single note-on yields nothing. A channel without
/// program changes plays program 0 throughout. Otherwise every program change
/// (after deduplication) opens an assignment that runs until the next one;
/// the first also owns whatever comes before it.
pub fn resolve_channel(events: &[ChannelEvent]) -> Vec<ProgramAssignment> {
    let Some(first) = events.first() else {
        return Vec::new();
    };
    if !events.iter().any(ChannelEvent::is_note_on) {
        log::debug!(target: "resolve", "channel {}: no note-ons, skipped", first.channel);
        return Vec::new();
    }

    let mut changes: Vec<(u64, u8)> = events
        .iter()
        .filter_map(|e| match e.payload {
            ChannelPayload::ProgramChange { program } => Some((e.time, program)),
            _ => None,
        })
        .collect();
    dedup_program_changes(&mut changes);

    if changes.is_empty() {
        changes.push((0, 0));
    }

    let mut assignments: Vec<ProgramAssignment> = changes
        .iter()
        .enumerate()
        .map(|(i, &(time, program))| ProgramAssignment {
            program,
            start_time: if i == 0 { 0 } else { time },
            events: Vec::new(),
        })
        .collect();

    for event in events {
        // Last change at or before the event; earlier events fall to the first
        let idx = changes
            .partition_point(|&(time, _)| time <= event.time)
            .saturating_sub(1);
        assignments[idx].events.push(*event);
    }

    log::debug!(
        target: "resolve",
        "channel {}: {} assignment(s), programs {:?}",
        first.channel,
        assignments.len(),
        assignments.iter().map(|a| a.program).collect::<Vec<_>>()
    );
    assignments
}

/// Collapse program changes, as (tick, program), until nothing changes.
///
/// Each scan walks adjacent pairs: on a shared tick the earlier change goes
/// and the one that slid into its place is compared again; on a repeated
/// program the later change goes and the scan moves on. Only adjacent pairs
/// are ever merged, so `5, 7, 5` keeps all three.
pub fn dedup_program_changes(changes: &mut Vec<(u64, u8)>) {
    while dedup_scan(changes) {}
}

fn dedup_scan(changes: &mut Vec<(u64, u8)>) -> bool {
    let mut removed = false;
    let mut i = 0;
    while i + 1 < changes.len() {
        let (current, next) = (changes[i], changes[i + 1]);
        if current.0 == next.0 {
            changes.remove(i);
            removed = true;
            continue;
        }
        if current.1 == next.1 {
            changes.remove(i + 1);
            removed = true;
        }
        i += 1;
    }
    removed
}
