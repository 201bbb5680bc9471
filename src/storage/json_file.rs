use std::collections::HashSet;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::note::{Note, NoteId};

use super::{NewNote, NoteStorage, StoreError, model};

/// Flat-file note store. The whole collection lives in memory and is written
/// out as a single JSON document on every mutation, through a temp file and
/// rename so a crash mid-write never leaves a torn store behind. A mutation
/// is on disk before the call returns.
pub struct JsonFileNoteStorage {
    path: PathBuf,
    notes: RwLock<Vec<Note>>,
}

impl JsonFileNoteStorage {
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let notes: Vec<Note> = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        log::info!(
            "Opened note store. [path = {}, notes = {}]",
            path.display(),
            notes.len()
        );

        Ok(Self {
            path,
            notes: RwLock::new(notes),
        })
    }

    async fn persist(&self, notes: &[Note]) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(notes)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, raw).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl NoteStorage for JsonFileNoteStorage {
    async fn insert(&self, note: NewNote) -> Result<Note, StoreError> {
        note.validate()?;
        let stored = Note {
            id: Uuid::new_v4(),
            title: note.title,
            content: note.content,
            reminder_at: note.reminder_at,
        };

        let mut notes = self.notes.write().await;
        notes.push(stored.clone());
        if let Err(e) = self.persist(&notes).await {
            // The in-memory copy must not outlive a failed write.
            notes.pop();
            return Err(e);
        }

        log::info!("Stored note. [note_id = {}]", stored.id);
        Ok(stored)
    }

    async fn get(&self, id: NoteId) -> Result<Note, StoreError> {
        let notes = self.notes.read().await;
        notes
            .iter()
            .find(|n| n.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn delete(&self, id: NoteId) -> Result<(), StoreError> {
        let mut notes = self.notes.write().await;
        let before = notes.len();
        notes.retain(|n| n.id != id);
        if notes.len() != before {
            self.persist(&notes).await?;
            log::info!("Deleted note. [note_id = {}]", id);
        }
        Ok(())
    }

    async fn delete_all(&self, ids: &HashSet<NoteId>) -> Result<(), StoreError> {
        let mut first_error = None;
        for id in ids {
            if let Err(e) = self.delete(*id).await {
                log::warn!("Could not delete note. [note_id = {}, error = {}]", id, e);
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn get_all(&self) -> Result<Vec<Note>, StoreError> {
        let notes = self.notes.read().await;
        Ok(notes.clone())
    }

    async fn search(&self, query: &str) -> Result<Vec<Note>, StoreError> {
        let notes = self.notes.read().await;
        Ok(notes
            .iter()
            .filter(|n| model::matches_query(n, query))
            .cloned()
            .collect())
    }
}
