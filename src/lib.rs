// loopsketch - loop-based music sketch core
// Validated note/tempo value types, an editable loop document, a wall-clock
// sequencer, a MIDI sound sink, and JSON loop storage.

pub mod audio;
pub mod midi;
pub mod sequencer;
pub mod storage;

// Re-export commonly used types for convenience
pub use audio::{AudioEngine, Instrument, SoundSink};
pub use midi::{MidiError, MidiInstrument};
pub use sequencer::{
    BeatDuration, BeatPosition, Loop, LoopNote, LoopSequencer, Measures, NoteId, Pitch, Tempo,
    ValidationError, Velocity,
};
pub use storage::{LoopJsonStorage, LoopStorage, StorageError};
