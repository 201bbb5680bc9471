use std::time::Duration;

use async_trait::async_trait;

/// Shows a system notification to the user. Fire and forget, implementations
/// never report back.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, title: &str, message: &str, timeout: Duration);
}

/// Notifier for headless runs: the notification goes to the log instead of a
/// desktop popup.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, title: &str, message: &str, timeout: Duration) {
        log::info!("{title}: {message} [timeout = {timeout:?}]");
    }
}
