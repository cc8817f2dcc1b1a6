// Audio - the sound sink seam and the MIDI-backed engine

pub mod engine;

pub use engine::AudioEngine;

use crate::sequencer::values::{Pitch, Velocity};

/// Anything that can turn note events into sound.
///
/// Implementations must tolerate a missing device (no-op, optionally
/// logged) and must not block the caller: the sequencer schedules against
/// the wall clock and assumes dispatch is near-instant.
pub trait SoundSink: Send + Sync {
    fn note_on(&self, pitch: Pitch, velocity: Velocity);
    fn note_off(&self, pitch: Pitch);
}

/// A concrete device binding (e.g. a MIDI output connection).
///
/// Created by the engine during initialization; note calls need exclusive
/// access because device writes are stateful.
pub trait Instrument: Send {
    fn note_on(&mut self, pitch: Pitch, velocity: Velocity);
    fn note_off(&mut self, pitch: Pitch);
}
