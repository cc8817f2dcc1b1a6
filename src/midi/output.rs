// MIDI output instrument - sends note events as raw bytes over midir

use crate::audio::Instrument;
use crate::sequencer::values::{Pitch, Velocity};
use midir::{MidiOutput, MidiOutputConnection};

// Status bytes for channel 1
const NOTE_ON: u8 = 0x90;
const NOTE_OFF: u8 = 0x80;

const CLIENT_NAME: &str = "loopsketch output";

#[derive(Debug, thiserror::Error)]
pub enum MidiError {
    #[error("failed to initialize MIDI output: {0}")]
    Init(#[from] midir::InitError),

    #[error("no MIDI output port available")]
    NoPort,

    #[error("failed to connect to MIDI port '{0}'")]
    Connect(String),
}

/// An instrument backed by a MIDI output connection.
///
/// Send failures are logged and swallowed: a misbehaving device degrades
/// to silence, it never stops playback.
pub struct MidiInstrument {
    connection: MidiOutputConnection,
    port_name: String,
}

impl MidiInstrument {
    /// Connect to the first available MIDI output port.
    pub fn connect_default() -> Result<Self, MidiError> {
        let midi_out = MidiOutput::new(CLIENT_NAME)?;

        let ports = midi_out.ports();
        let port = ports.first().ok_or(MidiError::NoPort)?;
        let port_name = midi_out
            .port_name(port)
            .unwrap_or_else(|_| "unknown".to_string());

        let connection = midi_out
            .connect(port, "loopsketch")
            .map_err(|_| MidiError::Connect(port_name.clone()))?;

        println!("midi: connected to output port '{port_name}'");
        Ok(Self {
            connection,
            port_name,
        })
    }

    /// Names of the available MIDI output ports.
    pub fn available_ports() -> Vec<String> {
        match MidiOutput::new(CLIENT_NAME) {
            Ok(midi_out) => midi_out
                .ports()
                .iter()
                .filter_map(|p| midi_out.port_name(p).ok())
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn port_name(&self) -> &str {
        &self.port_name
    }
}

impl Instrument for MidiInstrument {
    fn note_on(&mut self, pitch: Pitch, velocity: Velocity) {
        if let Err(e) = self
            .connection
            .send(&[NOTE_ON, pitch.midi_number(), velocity.value()])
        {
            eprintln!("midi: note-on send failed: {e}");
        }
    }

    fn note_off(&mut self, pitch: Pitch) {
        if let Err(e) = self.connection.send(&[NOTE_OFF, pitch.midi_number(), 0]) {
            eprintln!("midi: note-off send failed: {e}");
        }
    }
}
