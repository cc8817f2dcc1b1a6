// Loop note - a single note placed on the loop grid

use crate::sequencer::values::{BeatDuration, BeatPosition, Pitch, Velocity};
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for notes
pub type NoteId = u64;

/// Global note ID generator (atomic for thread-safety)
static NEXT_NOTE_ID: AtomicU64 = AtomicU64::new(1);

fn generate_note_id() -> NoteId {
    NEXT_NOTE_ID.fetch_add(1, Ordering::Relaxed)
}

/// A note in the loop: pitch, start beat, duration, and velocity.
///
/// Notes are immutable once created. Each carries a unique id assigned at
/// construction, so two notes with identical fields are still distinct
/// entities — removal from a loop targets the exact inserted instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopNote {
    id: NoteId,
    pitch: Pitch,
    start: BeatPosition,
    duration: BeatDuration,
    velocity: Velocity,
}

impl LoopNote {
    /// Creates a new note. All fields arrive pre-validated through their
    /// wrapper types.
    pub fn new(
        pitch: Pitch,
        start: BeatPosition,
        duration: BeatDuration,
        velocity: Velocity,
    ) -> Self {
        Self {
            id: generate_note_id(),
            pitch,
            start,
            duration,
            velocity,
        }
    }

    pub fn id(&self) -> NoteId {
        self.id
    }

    pub fn pitch(&self) -> Pitch {
        self.pitch
    }

    pub fn start_beat(&self) -> BeatPosition {
        self.start
    }

    pub fn duration_beats(&self) -> BeatDuration {
        self.duration
    }

    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    /// The beat at which this note ends (start + duration)
    pub fn end_beat(&self) -> f64 {
        self.start.value() + self.duration.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(pitch: u8, start: f64, duration: f64, velocity: u8) -> LoopNote {
        LoopNote::new(
            Pitch::new(pitch).unwrap(),
            BeatPosition::new(start).unwrap(),
            BeatDuration::new(duration).unwrap(),
            Velocity::new(velocity).unwrap(),
        )
    }

    #[test]
    fn test_note_creation() {
        let n = note(60, 1.0, 0.5, 100);

        assert_eq!(n.pitch().midi_number(), 60);
        assert_eq!(n.start_beat().value(), 1.0);
        assert_eq!(n.duration_beats().value(), 0.5);
        assert_eq!(n.velocity().value(), 100);
    }

    #[test]
    fn test_note_end_beat() {
        let n = note(60, 1.5, 1.0, 100);
        assert_eq!(n.end_beat(), 2.5);
    }

    #[test]
    fn test_equal_fields_are_distinct_notes() {
        let a = note(60, 0.0, 1.0, 100);
        let b = note(60, 0.0, 1.0, 100);

        assert_ne!(a.id(), b.id());
        assert_ne!(a, b);
    }
}
