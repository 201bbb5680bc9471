use std::collections::HashMap;
use std::marker::PhantomData;
use std::time::Duration;

use tokio::{sync::mpsc, task::JoinHandle};

use crate::note::{Note, NoteId};

use super::{
    common::{ReminderManagerMessage, ReminderManagerSender, SchedulerContext},
    scheduler::{ReminderScheduler, ScheduledTask},
    worker::{ReminderWorker, WorkerFactory},
};

const CANCEL_TIMEOUT: Duration = Duration::from_secs(5);

/// Actor owning every scheduled reminder task. All bookkeeping lives on the
/// message-loop task, so schedule and cancel requests from any number of
/// callers are serialized through one channel.
pub struct ReminderManager<TFactory: WorkerFactory> {
    sender: ReminderManagerSender,
    manager_task_handle: JoinHandle<()>,
    _marker: PhantomData<TFactory>,
}

impl<TFactory> ReminderManager<TFactory>
where
    TFactory: WorkerFactory + Send + 'static,
    TFactory::Worker: ReminderWorker + Send + 'static,
{
    pub fn create(worker_factory: TFactory) -> Self {
        let (channel_sender, receiver) = mpsc::channel(64);
        let sender = ReminderManagerSender::new(channel_sender);
        let tasks_sender = sender.clone();
        let manager_task_handle = tokio::spawn(async move {
            Self::handle_messages(worker_factory, receiver, tasks_sender).await;
        });

        Self {
            sender,
            manager_task_handle,
            _marker: PhantomData,
        }
    }

    /// Arms a one-shot reminder for the note. Scheduling an id that already
    /// has an outstanding task replaces the old one.
    pub async fn schedule_reminder(&self, note: Note) -> anyhow::Result<()> {
        self.sender.send_schedule(note).await
    }

    /// Disarms the pending reminder for the id, if any. Called when a note is
    /// deleted manually so its timer never fires on a missing record.
    pub async fn cancel_reminder(&self, id: NoteId) -> anyhow::Result<()> {
        self.sender.send_cancel(id).await
    }

    pub fn shutdown(self) {
        self.manager_task_handle.abort();
    }

    async fn handle_messages(
        worker_factory: TFactory,
        mut receiver: mpsc::Receiver<ReminderManagerMessage>,
        sender: ReminderManagerSender,
    ) {
        let mut tasks = HashMap::<NoteId, ScheduledTask>::new();
        while let Some(msg) = receiver.recv().await {
            match msg {
                ReminderManagerMessage::Schedule(note) => {
                    if let Some(task) = tasks.remove(&note.id) {
                        log::info!(
                            "Replacing outstanding reminder task. [note_id = {}]",
                            note.id
                        );
                        task.cancel(CANCEL_TIMEOUT).await;
                    }
                    Self::handle_schedule_reminder(
                        &mut tasks,
                        &worker_factory,
                        note,
                        sender.clone(),
                    );
                }
                ReminderManagerMessage::Cancel(id) => {
                    if let Some(task) = tasks.remove(&id) {
                        task.cancel(CANCEL_TIMEOUT).await;
                        log::info!("Cancelled pending reminder. [note_id = {}]", id);
                    }
                }
                ReminderManagerMessage::FireError(error, id) => {
                    tasks.remove(&id);
                    log::error!(
                        "Error executing reminder worker. [note_id = {}, error = {}]",
                        id,
                        error
                    );
                }
                ReminderManagerMessage::FireFinished(id) => {
                    tasks.remove(&id);
                    log::info!("Reminder fired. [note_id = {}]", id);
                }
            }
        }
    }

    fn handle_schedule_reminder(
        tasks: &mut HashMap<NoteId, ScheduledTask>,
        worker_factory: &TFactory,
        note: Note,
        sender: ReminderManagerSender,
    ) {
        let id = note.id;
        let context = SchedulerContext { sender, note };
        let worker = worker_factory.create_worker();
        let task = ReminderScheduler::schedule_reminder(context, worker);
        tasks.insert(id, task);
    }
}
