// MIDI module - output device binding for the audio engine

pub mod output;

pub use output::{MidiError, MidiInstrument};
