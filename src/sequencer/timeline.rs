// Event timeline - the per-pass NoteOn/NoteOff stream derived from a loop

use crate::sequencer::note::LoopNote;
use crate::sequencer::values::{Pitch, Velocity};
use std::cmp::Ordering;

/// What the sequencer dispatches to the sound sink.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventKind {
    NoteOn { pitch: Pitch, velocity: Velocity },
    NoteOff { pitch: Pitch },
}

impl EventKind {
    // At equal beats a NoteOff sorts before a NoteOn, so a pitch
    // retriggered exactly where another note ends is released before it is
    // struck again.
    fn dispatch_rank(&self) -> u8 {
        match self {
            EventKind::NoteOff { .. } => 0,
            EventKind::NoteOn { .. } => 1,
        }
    }
}

/// An event pinned to a beat within the loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedEvent {
    pub beat: f64,
    pub kind: EventKind,
}

/// Build the sorted event stream for one pass: a NoteOn at every note's
/// start beat and a NoteOff at its end beat, ordered by beat ascending.
///
/// Beat values are finite by construction (validated wrapper types), so the
/// comparison never sees NaN.
pub fn build_event_timeline(notes: &[LoopNote]) -> Vec<TimedEvent> {
    let mut events = Vec::with_capacity(notes.len() * 2);

    for note in notes {
        events.push(TimedEvent {
            beat: note.start_beat().value(),
            kind: EventKind::NoteOn {
                pitch: note.pitch(),
                velocity: note.velocity(),
            },
        });
        events.push(TimedEvent {
            beat: note.end_beat(),
            kind: EventKind::NoteOff {
                pitch: note.pitch(),
            },
        });
    }

    events.sort_by(|a, b| {
        a.beat
            .partial_cmp(&b.beat)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.kind.dispatch_rank().cmp(&b.kind.dispatch_rank()))
    });

    events
}
