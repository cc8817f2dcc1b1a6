// Sequencer module - loop document, event timeline, and the playback core

pub mod loops;
pub mod note;
pub mod player;
pub mod timeline;
pub mod values;

pub use loops::Loop;
pub use note::{LoopNote, NoteId};
pub use player::LoopSequencer;
pub use timeline::{EventKind, TimedEvent, build_event_timeline};
pub use values::{
    BeatDuration, BeatPosition, Measures, Pitch, Tempo, ValidationError, Velocity,
};
