// Storage module - saving and loading loops on disk

pub mod json;

pub use json::LoopJsonStorage;

use crate::sequencer::Loop;
use crate::sequencer::values::ValidationError;

/// Storage error types
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid loop data: {0}")]
    InvalidLoop(#[from] ValidationError),
}

/// Abstraction over loop persistence so other backends can slot in later.
pub trait LoopStorage {
    /// Save the loop under the given file name.
    fn save_loop(&self, song_loop: &Loop, file_name: &str) -> Result<(), StorageError>;

    /// Load a previously saved loop. Every field is re-validated on the
    /// way in; corrupt or out-of-range data is an error, never a panic.
    fn load_loop(&self, file_name: &str) -> Result<Loop, StorageError>;
}
