// Loop document - measures, tempo, and an editable collection of notes

use crate::sequencer::note::{LoopNote, NoteId};
use crate::sequencer::values::{Measures, Tempo};

/// The mutable loop document edited by the user and read by the sequencer.
///
/// Notes are kept in insertion order; playback order is derived from the
/// event timeline, so the stored order only matters for UI stability.
#[derive(Debug, Clone)]
pub struct Loop {
    measures: Measures,
    tempo: Tempo,
    notes: Vec<LoopNote>,
}

impl Loop {
    /// Create an empty loop with the given measure count at 120 BPM.
    pub fn new(measures: Measures) -> Self {
        Self {
            measures,
            tempo: Tempo::default(),
            notes: Vec::new(),
        }
    }

    pub fn measures(&self) -> Measures {
        self.measures
    }

    pub fn tempo(&self) -> Tempo {
        self.tempo
    }

    /// Replace the measure count. Validation happened when the value was
    /// constructed.
    pub fn set_measures(&mut self, measures: Measures) {
        self.measures = measures;
    }

    /// Replace the tempo.
    pub fn set_tempo(&mut self, tempo: Tempo) {
        self.tempo = tempo;
    }

    /// Append a note to the loop.
    pub fn add_note(&mut self, note: LoopNote) {
        self.notes.push(note);
    }

    /// Remove the note with the given id. Returns the removed note, or
    /// `None` when no such note exists (the loop is left unchanged).
    pub fn remove_note(&mut self, note_id: NoteId) -> Option<LoopNote> {
        let index = self.notes.iter().position(|n| n.id() == note_id)?;
        Some(self.notes.remove(index))
    }

    /// Read-only view of the notes, in insertion order.
    pub fn notes(&self) -> &[LoopNote] {
        &self.notes
    }

    pub fn note_count(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Total loop length in beats for the given meter.
    pub fn total_beats(&self, beats_per_measure: u32) -> f64 {
        self.measures.value() as f64 * beats_per_measure as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequencer::values::{BeatDuration, BeatPosition, Pitch, Velocity};

    fn note(pitch: u8, start: f64) -> LoopNote {
        LoopNote::new(
            Pitch::new(pitch).unwrap(),
            BeatPosition::new(start).unwrap(),
            BeatDuration::new(1.0).unwrap(),
            Velocity::new(100).unwrap(),
        )
    }

    #[test]
    fn test_new_loop_defaults() {
        let song_loop = Loop::new(Measures::new(4).unwrap());

        assert_eq!(song_loop.measures().value(), 4);
        assert_eq!(song_loop.tempo().bpm(), 120.0);
        assert!(song_loop.is_empty());
    }

    #[test]
    fn test_add_and_remove_note() {
        let mut song_loop = Loop::new(Measures::new(1).unwrap());
        let n = note(60, 0.0);
        let id = n.id();

        song_loop.add_note(n);
        assert_eq!(song_loop.note_count(), 1);

        let removed = song_loop.remove_note(id);
        assert!(removed.is_some());
        assert_eq!(song_loop.note_count(), 0);
    }

    #[test]
    fn test_remove_unknown_note_is_noop() {
        let mut song_loop = Loop::new(Measures::new(1).unwrap());
        song_loop.add_note(note(60, 0.0));

        // A note that was never added to this loop
        let stranger = note(60, 0.0);
        assert!(song_loop.remove_note(stranger.id()).is_none());
        assert_eq!(song_loop.note_count(), 1);
    }

    #[test]
    fn test_removal_targets_exact_instance() {
        let mut song_loop = Loop::new(Measures::new(1).unwrap());
        let first = note(60, 0.0);
        let second = note(60, 0.0); // identical fields, distinct note
        let first_id = first.id();

        song_loop.add_note(first);
        song_loop.add_note(second);

        let removed = song_loop.remove_note(first_id).unwrap();
        assert_eq!(removed.id(), first_id);
        assert_eq!(song_loop.note_count(), 1);
        assert_ne!(song_loop.notes()[0].id(), first_id);
    }

    #[test]
    fn test_notes_keep_insertion_order() {
        let mut song_loop = Loop::new(Measures::new(2).unwrap());

        // Insert out of beat order
        song_loop.add_note(note(64, 3.0));
        song_loop.add_note(note(60, 0.0));
        song_loop.add_note(note(67, 1.5));

        let starts: Vec<f64> = song_loop
            .notes()
            .iter()
            .map(|n| n.start_beat().value())
            .collect();
        assert_eq!(starts, vec![3.0, 0.0, 1.5]);
    }

    #[test]
    fn test_setters_replace_values() {
        let mut song_loop = Loop::new(Measures::new(1).unwrap());

        song_loop.set_tempo(Tempo::new(140.0).unwrap());
        song_loop.set_measures(Measures::new(8).unwrap());

        assert_eq!(song_loop.tempo().bpm(), 140.0);
        assert_eq!(song_loop.measures().value(), 8);
    }

    #[test]
    fn test_total_beats() {
        let song_loop = Loop::new(Measures::new(2).unwrap());
        assert_eq!(song_loop.total_beats(4), 8.0);
        assert_eq!(song_loop.total_beats(3), 6.0);
    }
}
