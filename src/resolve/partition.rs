use crate::io::midi::ChannelEvent;
use crate::CHANNEL_COUNT;

/// Split a flat event stream into one time-ordered bucket per MIDI channel.
///
/// Arrival order is kept for events on the same tick (the sort is stable),
/// which the program resolver relies on for same-tick program changes.
pub fn partition(events: &[ChannelEvent]) -> [Vec<ChannelEvent>; CHANNEL_COUNT] {
    let mut buckets: [Vec<ChannelEvent>; CHANNEL_COUNT] = Default::default();

    for event in events {
        match buckets.get_mut(event.channel as usize) {
            Some(bucket) => bucket.push(*event),
            None => log::warn!(
                target: "resolve",
                "dropping event on out-of-range channel {}",
                event.channel
            ),
        }
    }

    for bucket in &mut buckets {
        bucket.sort_by_key(|e| e.time);
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::midi::ChannelPayload;

    #[test]
    fn test_every_event_lands_once() {
        let events: Vec<ChannelEvent> = (0..64u64)
            .map(|i| ChannelEvent::note_on(i * 7 % 31, (i % 16) as u8, 60 + (i % 12) as u8, 100))
            .collect();

        let buckets = partition(&events);
        let total: usize = buckets.iter().map(Vec::len).sum();
        assert_eq!(total, events.len());

        for (channel, bucket) in buckets.iter().enumerate() {
            assert!(bucket.iter().all(|e| e.channel as usize == channel));
            assert!(bucket.windows(2).all(|w| w[0].time <= w[1].time));
        }

        // Each input event appears in its bucket exactly as many times as in the input
        for event in &events {
            let expected = events.iter().filter(|e| *e == event).count();
            let found = buckets[event.channel as usize]
                .iter()
                .filter(|e| *e == event)
                .count();
            assert_eq!(found, expected);
        }
    }

    #[test]
    fn test_equal_times_keep_arrival_order() {
        let events = vec![
            ChannelEvent::program_change(10, 3, 5),
            ChannelEvent::note_on(0, 3, 60, 90),
            ChannelEvent::program_change(10, 3, 7),
            ChannelEvent::program_change(10, 3, 9),
        ];
        let buckets = partition(&events);
        let programs: Vec<u8> = buckets[3]
            .iter()
            .filter_map(|e| match e.payload {
                ChannelPayload::ProgramChange { program } => Some(program),
                _ => None,
            })
            .collect();
        assert_eq!(programs, vec![5, 7, 9]);
        assert_eq!(buckets[3][0].time, 0);
    }

    #[test]
    fn test_out_of_range_channel_dropped() {
        let events = vec![
            ChannelEvent::note_on(0, 16, 60, 90),
            ChannelEvent::note_on(0, 2, 60, 90),
        ];
        let buckets = partition(&events);
        assert_eq!(buckets.iter().map(Vec::len).sum::<usize>(), 1);
    }
}
