use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::note::{Note, NoteId};

use super::{NewNote, StoreError, model};

/// Durable CRUD and enumeration over notes, keyed by id.
///
/// `get_all` and `search` return notes in insertion order. `delete` is
/// idempotent so a reminder firing concurrently with a manual delete never
/// errors on the second removal.
#[async_trait]
pub trait NoteStorage: Send + Sync {
    /// Validates the input, assigns a fresh id and persists the note before
    /// returning it.
    async fn insert(&self, note: NewNote) -> Result<Note, StoreError>;

    async fn get(&self, id: NoteId) -> Result<Note, StoreError>;

    /// Removes the note if present. Absent ids are not an error.
    async fn delete(&self, id: NoteId) -> Result<(), StoreError>;

    /// Deletes every id in the selection. Each id is attempted even when an
    /// earlier one fails; the first failure is reported after the pass.
    async fn delete_all(&self, ids: &HashSet<NoteId>) -> Result<(), StoreError>;

    async fn get_all(&self) -> Result<Vec<Note>, StoreError>;

    /// Case-insensitive substring search over title and content, a filtered
    /// subsequence of `get_all`.
    async fn search(&self, query: &str) -> Result<Vec<Note>, StoreError>;
}

/// Ephemeral store with the same contract as the flat-file one. Used in
/// tests and anywhere persistence is not wanted.
pub struct InMemoryNoteStorage {
    notes: RwLock<Vec<Note>>,
}

impl InMemoryNoteStorage {
    pub fn new() -> Self {
        InMemoryNoteStorage {
            notes: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryNoteStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NoteStorage for InMemoryNoteStorage {
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
        notes.retain(|n| n.id != id);
        Ok(())
    }

    async fn delete_all(&self, ids: &HashSet<NoteId>) -> Result<(), StoreError> {
        let mut notes = self.notes.write().await;
        notes.retain(|n| !ids.contains(&n.id));
        Ok(())
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::ReminderAt;

    fn new_note(title: &str, content: &str) -> NewNote {
        NewNote {
            title: title.into(),
            content: content.into(),
            reminder_at: "2024-01-01 09:00".parse::<ReminderAt>().unwrap(),
        }
    }

    #[tokio::test]
    async fn insert_then_get_returns_the_same_fields() {
        let storage = InMemoryNoteStorage::new();
        let note = storage
            .insert(new_note("Buy milk", "2%, 1 gallon"))
            .await
            .unwrap();

        let read = storage.get(note.id).await.unwrap();
        assert_eq!(read.title, "Buy milk");
        assert_eq!(read.content, "2%, 1 gallon");
        assert_eq!(read.reminder_at.to_string(), "2024-01-01 09:00");
    }

    #[tokio::test]
    async fn insert_rejects_empty_title() {
        let storage = InMemoryNoteStorage::new();
        let result = storage.insert(new_note("", "something")).await;

        assert!(matches!(result, Err(StoreError::Validation(_))));
        assert!(storage.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let storage = InMemoryNoteStorage::new();
        let note = storage.insert(new_note("a", "b")).await.unwrap();

        storage.delete(note.id).await.unwrap();
        storage.delete(note.id).await.unwrap();

        assert!(matches!(
            storage.get(note.id).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn delete_all_removes_the_selection_only() {
        let storage = InMemoryNoteStorage::new();
        let keep = storage.insert(new_note("keep", "me")).await.unwrap();
        let drop_a = storage.insert(new_note("drop", "one")).await.unwrap();
        let drop_b = storage.insert(new_note("drop", "two")).await.unwrap();

        let selection = HashSet::from([drop_a.id, drop_b.id]);
        storage.delete_all(&selection).await.unwrap();

        let remaining = storage.get_all().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, keep.id);
    }

    #[tokio::test]
    async fn search_returns_a_matching_subsequence() {
        let storage = InMemoryNoteStorage::new();
        storage
            .insert(new_note("Groceries", "milk and eggs"))
            .await
            .unwrap();
        storage
            .insert(new_note("Call dentist", "ask about Monday"))
            .await
            .unwrap();
        storage
            .insert(new_note("MILK run", "again"))
            .await
            .unwrap();

        let all = storage.get_all().await.unwrap();
        let hits = storage.search("milk").await.unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title, "Groceries");
        assert_eq!(hits[1].title, "MILK run");
        for note in &all {
            let matches = hits.iter().any(|h| h.id == note.id);
            let predicate = note.title.to_lowercase().contains("milk")
                || note.content.to_lowercase().contains("milk");
            assert_eq!(matches, predicate);
        }
    }
}
