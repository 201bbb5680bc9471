mod common;
mod manager;
mod notify_worker;
mod scheduler;
mod worker;

pub use common::{ReminderManagerSender, SchedulerContext};
pub use manager::ReminderManager;
pub use notify_worker::{NotifyWorker, NotifyWorkerFactory};
pub use scheduler::{ReminderScheduler, ScheduledTask};
pub use worker::{ReminderWorker, WorkerFactory};
