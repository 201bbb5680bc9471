use async_trait::async_trait;

use super::common::SchedulerContext;

/// Runs once when a scheduled reminder comes due.
#[async_trait]
pub trait ReminderWorker {
    async fn handle_reminder(&self, context: &SchedulerContext) -> anyhow::Result<()>;
}

pub trait WorkerFactory {
    type Worker: ReminderWorker;

    fn create_worker(&self) -> Self::Worker;
}
