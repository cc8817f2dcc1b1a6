// Audio engine - forwards note events to an optional instrument

use crate::audio::{Instrument, SoundSink};
use crate::midi::MidiInstrument;
use crate::sequencer::values::{Pitch, Velocity};
use std::sync::Mutex;

/// The production sound sink.
///
/// Holds the instrument behind a mutex because device writes need
/// exclusive access, while the sink seam is shared across threads. With no
/// instrument connected every note call is a silent no-op.
pub struct AudioEngine {
    instrument: Mutex<Option<Box<dyn Instrument>>>,
}

impl AudioEngine {
    /// Create an engine with no instrument. Call `initialize` to connect
    /// the default device.
    pub fn new() -> Self {
        Self {
            instrument: Mutex::new(None),
        }
    }

    /// Connect the default MIDI instrument.
    ///
    /// Returns false when no device is available; the engine then stays
    /// usable but silent.
    pub fn initialize(&self) -> bool {
        match MidiInstrument::connect_default() {
            Ok(instrument) => {
                println!("audio engine: initialized with default MIDI instrument");
                *self.instrument.lock().unwrap() = Some(Box::new(instrument));
                true
            }
            Err(e) => {
                eprintln!("audio engine: failed to initialize instrument: {e}");
                false
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        self.instrument.lock().unwrap().is_some()
    }
}

impl Default for AudioEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SoundSink for AudioEngine {
    fn note_on(&self, pitch: Pitch, velocity: Velocity) {
        if let Some(instrument) = self.instrument.lock().unwrap().as_mut() {
            instrument.note_on(pitch, velocity);
        }
    }

    fn note_off(&self, pitch: Pitch) {
        if let Some(instrument) = self.instrument.lock().unwrap().as_mut() {
            instrument.note_off(pitch);
        }
    }
}
