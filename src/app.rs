use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crate::note::{Note, NoteId};
use crate::notify::Notifier;
use crate::scheduling::{NotifyWorkerFactory, ReminderManager};
use crate::storage::{NewNote, NoteStorage, StoreError};

/// The surface a presentation layer calls: note CRUD wired to reminder
/// scheduling, so a create arms a timer and a delete disarms it.
pub struct NoteApp {
    storage: Arc<dyn NoteStorage>,
    manager: ReminderManager<NotifyWorkerFactory>,
}

impl NoteApp {
    pub fn new(
        storage: Arc<dyn NoteStorage>,
        notifier: Arc<dyn Notifier>,
        notification_timeout: Duration,
    ) -> Self {
        let factory = NotifyWorkerFactory {
            storage: Arc::clone(&storage),
            notifier,
            timeout: notification_timeout,
        };

        Self {
            storage,
            manager: ReminderManager::create(factory),
        }
    }

    /// Persists the note and arms its reminder. A validation failure leaves
    /// the store untouched.
    pub async fn create_note(&self, new_note: NewNote) -> Result<Note, StoreError> {
        let note = self.storage.insert(new_note).await?;
        if let Err(e) = self.manager.schedule_reminder(note.clone()).await {
            log::error!(
                "Could not schedule reminder for new note. [note_id = {}, error = {}]",
                note.id,
                e
            );
        }
        Ok(note)
    }

    /// Removes one note and cancels its pending reminder.
    pub async fn delete_note(&self, id: NoteId) -> Result<(), StoreError> {
        if let Err(e) = self.manager.cancel_reminder(id).await {
            log::warn!("Could not cancel reminder. [note_id = {}, error = {}]", id, e);
        }
        self.storage.delete(id).await
    }

    /// Removes the selected notes and cancels their pending reminders.
    pub async fn delete_notes(&self, ids: &HashSet<NoteId>) -> Result<(), StoreError> {
        for id in ids {
            if let Err(e) = self.manager.cancel_reminder(*id).await {
                log::warn!("Could not cancel reminder. [note_id = {}, error = {}]", id, e);
            }
        }
        self.storage.delete_all(ids).await
    }

    pub async fn list(&self) -> Result<Vec<Note>, StoreError> {
        self.storage.get_all().await
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Note>, StoreError> {
        self.storage.search(query).await
    }

    /// Re-arms reminders for every persisted note, used at startup. Past-due
    /// notes fire on the next tick.
    pub async fn restore_schedules(&self) -> anyhow::Result<usize> {
        let notes = self.storage.get_all().await?;
        let count = notes.len();
        for note in notes {
            self.manager.schedule_reminder(note).await?;
        }
        Ok(count)
    }
}
