// Loop sequencer - wall-clock playback of a loop against a sound sink

use crate::audio::SoundSink;
use crate::sequencer::loops::Loop;
use crate::sequencer::timeline::{EventKind, build_event_timeline};
use crate::sequencer::values::Pitch;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Plays a loop in time by calling the sound sink's note_on/note_off at
/// each note's start and end, repeating until paused.
///
/// Playback runs on a dedicated background thread. The stop signal and the
/// playing flag are one atomic: `pause()` clears it, the worker observes
/// the change at its next check point, turns off anything still sounding,
/// and exits.
pub struct LoopSequencer {
    sink: Arc<dyn SoundSink>,
    beats_per_measure: u32,
    playing: Arc<AtomicBool>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl LoopSequencer {
    /// Create a sequencer dispatching to the given sink.
    /// `beats_per_measure` is fixed for the sequencer's lifetime.
    pub fn new(sink: Arc<dyn SoundSink>, beats_per_measure: u32) -> Self {
        assert!(beats_per_measure > 0, "beats per measure must be > 0");

        Self {
            sink,
            beats_per_measure,
            playing: Arc::new(AtomicBool::new(false)),
            worker: Mutex::new(None),
        }
    }

    /// Start playback of the given loop from the beginning.
    /// If already playing, the call is ignored.
    pub fn play(&self, song_loop: &Arc<Mutex<Loop>>) {
        let mut worker = self.worker.lock().unwrap();

        if self.playing.load(Ordering::SeqCst) {
            println!("sequencer: already playing, ignoring play() request");
            return;
        }
        self.playing.store(true, Ordering::SeqCst);

        let playing = Arc::clone(&self.playing);
        let sink = Arc::clone(&self.sink);
        let song_loop = Arc::clone(song_loop);
        let beats_per_measure = self.beats_per_measure;

        let spawned = thread::Builder::new()
            .name("loop-playback".to_string())
            .spawn(move || run_playback(&song_loop, sink.as_ref(), &playing, beats_per_measure));

        match spawned {
            Ok(handle) => *worker = Some(handle),
            Err(e) => {
                eprintln!("sequencer: failed to spawn playback thread: {e}");
                self.playing.store(false, Ordering::SeqCst);
            }
        }
    }

    /// Stop playback. Every sounding pitch has received note_off by the
    /// time this returns. The next play() starts from the beginning.
    pub fn pause(&self) {
        let mut worker = self.worker.lock().unwrap();

        if !self.playing.swap(false, Ordering::SeqCst) {
            return;
        }

        // The worker sees the cleared flag within one scheduling quantum
        // and issues its cleanup note-offs before exiting, so joining here
        // is prompt and makes the no-stuck-notes guarantee synchronous.
        if let Some(handle) = worker.take() {
            if handle.join().is_err() {
                eprintln!("sequencer: playback thread panicked");
            }
        }

        println!("sequencer: playback paused");
    }

    /// Thread-safe query of the current state.
    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }
}

fn run_playback(
    song_loop: &Mutex<Loop>,
    sink: &dyn SoundSink,
    playing: &AtomicBool,
    beats_per_measure: u32,
) {
    // The timeline is built once per play() from a snapshot of the notes.
    // Notes added while playing become audible on the next pause()/play()
    // cycle; tempo and measure edits apply at pass boundaries below.
    let timeline = {
        let guard = read_loop(song_loop);
        build_event_timeline(guard.notes())
    };

    println!(
        "sequencer: starting playback ({} events per pass)",
        timeline.len()
    );

    while playing.load(Ordering::SeqCst) {
        let (beat_ms, total_beats) = {
            let guard = read_loop(song_loop);
            (
                guard.tempo().beat_duration_ms(),
                guard.total_beats(beats_per_measure),
            )
        };

        let loop_start = Instant::now();
        let mut sounding: HashSet<Pitch> = HashSet::new();

        for event in &timeline {
            if !playing.load(Ordering::SeqCst) {
                break;
            }

            sleep_until(loop_start + beats_to_offset(event.beat, beat_ms), playing);
            if !playing.load(Ordering::SeqCst) {
                break;
            }

            match event.kind {
                EventKind::NoteOn { pitch, velocity } => {
                    sink.note_on(pitch, velocity);
                    sounding.insert(pitch);
                }
                EventKind::NoteOff { pitch } => {
                    sink.note_off(pitch);
                    sounding.remove(&pitch);
                }
            }
        }

        // No pitch may be left sounding, whether the pass completed or a
        // stop arrived mid-timeline.
        for pitch in sounding.drain() {
            sink.note_off(pitch);
        }

        if !playing.load(Ordering::SeqCst) {
            break;
        }

        sleep_until(loop_start + beats_to_offset(total_beats, beat_ms), playing);
    }

    println!("sequencer: playback thread exiting");
}

/// Lock the loop for a pass-boundary read. Poisoning is not fatal: the
/// document's value types are always valid, and a worker that dies
/// mid-playback would leave the sequencer marked playing with nobody
/// dispatching.
fn read_loop(song_loop: &Mutex<Loop>) -> std::sync::MutexGuard<'_, Loop> {
    song_loop
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Beats to a wall-clock offset, rounded to the nearest millisecond.
/// Rounding (not truncating) avoids systematic early firing.
fn beats_to_offset(beats: f64, beat_ms: f64) -> Duration {
    Duration::from_millis((beats * beat_ms).round() as u64)
}

/// Longest single sleep between stop-flag checks. Bounds pause latency by
/// one quantum instead of the remaining wait duration.
const STOP_CHECK_QUANTUM: Duration = Duration::from_millis(5);

/// Suspend until `target` or until the stop flag clears, whichever first.
/// Coarse sleeps down to the last couple of milliseconds, then yield-spins
/// so the deadline is hit without oversleeping.
fn sleep_until(target: Instant, playing: &AtomicBool) {
    while playing.load(Ordering::SeqCst) {
        let now = Instant::now();
        if now >= target {
            return;
        }

        let remaining = target - now;
        if remaining > Duration::from_millis(2) {
            thread::sleep((remaining - Duration::from_millis(1)).min(STOP_CHECK_QUANTUM));
        } else {
            thread::yield_now();
        }
    }
}
