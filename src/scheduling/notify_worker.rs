use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::notify::Notifier;
use crate::storage::{NoteStorage, StoreError};

use super::{
    common::SchedulerContext,
    worker::{ReminderWorker, WorkerFactory},
};

/// Title line shown on every reminder notification.
const NOTIFICATION_TITLE: &str = "Note reminder";

/// Fire path of a due reminder: look the note up again, show the
/// notification, remove the note from the store. A note deleted while its
/// timer was pending is skipped silently.
pub struct NotifyWorker {
    storage: Arc<dyn NoteStorage>,
    notifier: Arc<dyn Notifier>,
    timeout: Duration,
}

#[async_trait]
impl ReminderWorker for NotifyWorker {
    async fn handle_reminder(&self, context: &SchedulerContext) -> anyhow::Result<()> {
        let id = context.note.id;
        let note = match self.storage.get(id).await {
            Ok(note) => note,
            Err(StoreError::NotFound(_)) => {
                log::info!(
                    "Note gone before its reminder fired, skipping. [note_id = {}]",
                    id
                );
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let message = format!("{} - {}\n{}", note.title, note.reminder_at, note.content);
        self.notifier
            .notify(NOTIFICATION_TITLE, &message, self.timeout)
            .await;

        self.storage.delete(id).await?;
        Ok(())
    }
}

pub struct NotifyWorkerFactory {
    pub storage: Arc<dyn NoteStorage>,
    pub notifier: Arc<dyn Notifier>,
    pub timeout: Duration,
}

impl WorkerFactory for NotifyWorkerFactory {
    type Worker = NotifyWorker;

    fn create_worker(&self) -> NotifyWorker {
        NotifyWorker {
            storage: Arc::clone(&self.storage),
            notifier: Arc::clone(&self.notifier),
            timeout: self.timeout,
        }
    }
}
