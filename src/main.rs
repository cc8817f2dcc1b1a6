use loopsketch::{
    AudioEngine, BeatDuration, BeatPosition, Loop, LoopJsonStorage, LoopNote, LoopSequencer,
    LoopStorage, Measures, Pitch, Tempo, ValidationError, Velocity,
};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

const BEATS_PER_MEASURE: u32 = 4;

fn main() {
    println!("=== loopsketch ===\n");

    let engine = Arc::new(AudioEngine::new());
    if !engine.initialize() {
        eprintln!("No MIDI output available; playback will be silent.");
    }

    let song_loop = match demo_loop() {
        Ok(l) => Arc::new(Mutex::new(l)),
        Err(e) => {
            eprintln!("ERROR building demo loop: {e}");
            return;
        }
    };

    let sequencer = LoopSequencer::new(engine, BEATS_PER_MEASURE);

    println!("Playing two passes of the demo loop...\n");
    sequencer.play(&song_loop);
    thread::sleep(Duration::from_millis(4000));
    sequencer.pause();

    let storage = LoopJsonStorage::new("loops");
    if let Err(e) = storage.save_loop(&song_loop.lock().unwrap(), "demo-loop.json") {
        eprintln!("Failed to save loop: {e}");
    }
}

/// One measure of a C major arpeggio at 120 BPM.
fn demo_loop() -> Result<Loop, ValidationError> {
    let mut song_loop = Loop::new(Measures::new(1)?);
    song_loop.set_tempo(Tempo::new(120.0)?);

    for (beat, midi) in [(0.0, 60u8), (1.0, 64), (2.0, 67), (3.0, 72)] {
        song_loop.add_note(LoopNote::new(
            Pitch::new(midi)?,
            BeatPosition::new(beat)?,
            BeatDuration::new(1.0)?,
            Velocity::new(100)?,
        ));
    }

    Ok(song_loop)
}
