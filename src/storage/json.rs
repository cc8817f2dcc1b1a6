// JSON loop storage - one loop per file under a base directory

use crate::sequencer::values::{BeatDuration, BeatPosition, Measures, Pitch, Tempo, Velocity};
use crate::sequencer::{Loop, LoopNote};
use crate::storage::{LoopStorage, StorageError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// On-disk record types. Kept separate from the domain types so the
/// domain stays free of serialization concerns.
#[derive(Debug, Serialize, Deserialize)]
struct LoopRecord {
    measures: u32,
    #[serde(rename = "tempoBPM")]
    tempo_bpm: f64,
    notes: Vec<NoteRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct NoteRecord {
    pitch: u8,
    #[serde(rename = "startBeat")]
    start_beat: f64,
    #[serde(rename = "durationBeats")]
    duration_beats: f64,
    velocity: u8,
}

/// Saves loops as JSON files under a base directory, created on demand.
pub struct LoopJsonStorage {
    base_directory: PathBuf,
}

impl LoopJsonStorage {
    pub fn new(base_directory: impl Into<PathBuf>) -> Self {
        Self {
            base_directory: base_directory.into(),
        }
    }

    fn file_path(&self, file_name: &str) -> PathBuf {
        self.base_directory.join(file_name)
    }

    fn to_record(song_loop: &Loop) -> LoopRecord {
        LoopRecord {
            measures: song_loop.measures().value(),
            tempo_bpm: song_loop.tempo().bpm(),
            notes: song_loop
                .notes()
                .iter()
                .map(|note| NoteRecord {
                    pitch: note.pitch().midi_number(),
                    start_beat: note.start_beat().value(),
                    duration_beats: note.duration_beats().value(),
                    velocity: note.velocity().value(),
                })
                .collect(),
        }
    }

    fn from_record(record: LoopRecord) -> Result<Loop, StorageError> {
        let mut song_loop = Loop::new(Measures::new(record.measures)?);
        song_loop.set_tempo(Tempo::new(record.tempo_bpm)?);

        for note in record.notes {
            song_loop.add_note(LoopNote::new(
                Pitch::new(note.pitch)?,
                BeatPosition::new(note.start_beat)?,
                BeatDuration::new(note.duration_beats)?,
                Velocity::new(note.velocity)?,
            ));
        }

        Ok(song_loop)
    }
}

impl LoopStorage for LoopJsonStorage {
    fn save_loop(&self, song_loop: &Loop, file_name: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.base_directory)?;

        let path = self.file_path(file_name);
        let json = serde_json::to_string_pretty(&Self::to_record(song_loop))?;
        fs::write(&path, json)?;

        println!("storage: saved loop to {}", path.display());
        Ok(())
    }

    fn load_loop(&self, file_name: &str) -> Result<Loop, StorageError> {
        let json = fs::read_to_string(self.file_path(file_name))?;
        let record: LoopRecord = serde_json::from_str(&json)?;
        Self::from_record(record)
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
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LoopJsonStorage::new(dir.path());

        let mut song_loop = Loop::new(Measures::new(2).unwrap());
        song_loop.set_tempo(Tempo::new(95.0).unwrap());
        song_loop.add_note(note(60, 0.0, 1.0, 100));
        song_loop.add_note(note(64, 1.5, 0.5, 80));

        storage.save_loop(&song_loop, "loop-1.json").unwrap();
        let loaded = storage.load_loop("loop-1.json").unwrap();

        assert_eq!(loaded.measures().value(), 2);
        assert_eq!(loaded.tempo().bpm(), 95.0);
        assert_eq!(loaded.note_count(), 2);

        let first = &loaded.notes()[0];
        assert_eq!(first.pitch().midi_number(), 60);
        assert_eq!(first.start_beat().value(), 0.0);
        assert_eq!(first.duration_beats().value(), 1.0);
        assert_eq!(first.velocity().value(), 100);
    }

    #[test]
    fn test_creates_base_directory_on_save() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("loops").join("sketches");
        let storage = LoopJsonStorage::new(&nested);

        let song_loop = Loop::new(Measures::new(1).unwrap());
        storage.save_loop(&song_loop, "empty.json").unwrap();

        assert!(nested.join("empty.json").exists());
    }

    #[test]
    fn test_load_rejects_out_of_range_pitch() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LoopJsonStorage::new(dir.path());

        let json = r#"{
            "measures": 1,
            "tempoBPM": 120.0,
            "notes": [
                { "pitch": 200, "startBeat": 0.0, "durationBeats": 1.0, "velocity": 100 }
            ]
        }"#;
        fs::write(dir.path().join("bad.json"), json).unwrap();

        let result = storage.load_loop("bad.json");
        assert!(matches!(result, Err(StorageError::InvalidLoop(_))));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LoopJsonStorage::new(dir.path());

        assert!(matches!(
            storage.load_loop("nope.json"),
            Err(StorageError::Io(_))
        ));
    }
}
