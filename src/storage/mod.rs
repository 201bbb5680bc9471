mod json_file;
mod model;
mod note_storage;

pub use json_file::JsonFileNoteStorage;
pub use model::NewNote;
pub use note_storage::{InMemoryNoteStorage, NoteStorage};

use crate::note::NoteId;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Malformed create-time input. Nothing is persisted.
    #[error("invalid note: {0}")]
    Validation(String),

    /// Lookup by an id the store does not hold.
    #[error("no note with id {0}")]
    NotFound(NoteId),

    #[error("storage io: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage encoding: {0}")]
    Encoding(#[from] serde_json::Error),
}
