use tokio::sync::mpsc;

use crate::note::{Note, NoteId};

#[derive(Debug)]
pub enum ReminderManagerMessage {
    Schedule(Note),
    Cancel(NoteId),
    FireError(anyhow::Error, NoteId),
    FireFinished(NoteId),
}

#[derive(Clone)]
pub struct ReminderManagerSender(mpsc::Sender<ReminderManagerMessage>);

impl ReminderManagerSender {
    pub fn new(inner: mpsc::Sender<ReminderManagerMessage>) -> Self {
        ReminderManagerSender(inner)
    }

    pub async fn send_schedule(&self, note: Note) -> anyhow::Result<()> {
        self.0.send(ReminderManagerMessage::Schedule(note)).await?;
        Ok(())
    }

    pub async fn send_cancel(&self, id: NoteId) -> anyhow::Result<()> {
        self.0.send(ReminderManagerMessage::Cancel(id)).await?;
        Ok(())
    }

    pub async fn notify_completed(&self, id: NoteId) -> anyhow::Result<()> {
        self.0.send(ReminderManagerMessage::FireFinished(id)).await?;
        Ok(())
    }

    pub async fn notify_error(&self, error: anyhow::Error, id: NoteId) -> anyhow::Result<()> {
        self.0
            .send(ReminderManagerMessage::FireError(error, id))
            .await?;
        Ok(())
    }
}

/// Everything a scheduled reminder task needs: the note it fires for and a
/// way to report back to the manager.
pub struct SchedulerContext {
    pub sender: ReminderManagerSender,
    pub note: Note,
}
