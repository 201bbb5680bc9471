use chrono::{Local, NaiveDateTime, TimeDelta};
use tokio::{task::JoinHandle, time};
use tokio_util::sync::CancellationToken;

use crate::note::ReminderAt;

use super::{common::SchedulerContext, worker::ReminderWorker};

pub struct ScheduledTask {
    task_handle: JoinHandle<()>,
    cancellation_token: CancellationToken,
}

impl ScheduledTask {
    pub fn new(task_handle: JoinHandle<()>, cancellation_token: CancellationToken) -> Self {
        Self {
            task_handle,
            cancellation_token,
        }
    }

    pub async fn cancel(self, timeout: std::time::Duration) {
        self.cancellation_token.cancel();
        let cancel_with_timeout = time::timeout(timeout, self.task_handle);
        let _ = cancel_with_timeout.await;
    }
}

/// Spawns one-shot tasks that fire a reminder worker at the note's target
/// time, or on the next tick when the target is already behind us.
pub struct ReminderScheduler;

impl ReminderScheduler {
    pub fn schedule_reminder(
        context: SchedulerContext,
        worker: impl ReminderWorker + Send + 'static,
    ) -> ScheduledTask {
        let cancellation_token = CancellationToken::new();
        let task_cancellation_token = cancellation_token.child_token();

        let now = Local::now().naive_local();
        let delay = Self::get_target_delay(&context.note.reminder_at, now)
            .to_std()
            .expect("The target delay is never negative.");

        let task_handle = tokio::spawn(async move {
            tokio::select! {
                _ = task_cancellation_token.cancelled() => {
                    log::info!(
                        "Reminder task cancelled before firing. [note_id = {}]",
                        context.note.id
                    );
                    return;
                }
                _ = time::sleep(delay) => {}
            }

            let note_id = context.note.id;
            match worker.handle_reminder(&context).await {
                Ok(()) => context
                    .sender
                    .notify_completed(note_id)
                    .await
                    .expect("Could not notify parent."),
                Err(error) => context
                    .sender
                    .notify_error(error, note_id)
                    .await
                    .expect("Could not notify parent."),
            }
        });

        ScheduledTask::new(task_handle, cancellation_token)
    }

    /// Delay until the reminder is due. A reminder in the past gets a zero
    /// delay and fires immediately.
    pub(super) fn get_target_delay(reminder_at: &ReminderAt, now: NaiveDateTime) -> TimeDelta {
        (reminder_at.datetime() - now).max(TimeDelta::zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::ReminderAt;
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
    use proptest::prelude::*;
    use proptest_arbitrary_interop::arb;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDateTime::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveTime::from_hms_opt(h, m, 0).unwrap(),
        )
    }

    #[test]
    fn future_reminder_waits_the_exact_gap() {
        let now = at(9, 0);
        let reminder_at = ReminderAt::new(at(9, 5));

        let delay = ReminderScheduler::get_target_delay(&reminder_at, now);

        assert_eq!(delay.num_minutes(), 5);
    }

    #[test]
    fn past_reminder_gets_zero_delay() {
        let now = at(9, 0);
        let reminder_at = ReminderAt::new(at(8, 0));

        let delay = ReminderScheduler::get_target_delay(&reminder_at, now);

        assert_eq!(delay, TimeDelta::zero());
    }

    proptest! {
        #[test]
        fn target_delay_is_never_negative(
            now in arb::<NaiveDateTime>(),
            target in arb::<NaiveDateTime>()
        ) {
            let reminder_at = ReminderAt::new(target);
            let delay = ReminderScheduler::get_target_delay(&reminder_at, now);

            prop_assert!(delay >= TimeDelta::zero());

            let fires_at = now + delay;
            if reminder_at.datetime() > now {
                prop_assert_eq!(fires_at, reminder_at.datetime());
            } else {
                prop_assert_eq!(fires_at, now);
            }
        }
    }
}
