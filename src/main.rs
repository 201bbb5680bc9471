use std::sync::Arc;
use std::time::Duration;

use zametki::notify::LogNotifier;
use zametki::{JsonFileNoteStorage, NoteApp, appsettings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    pretty_env_logger::init();

    let settings = appsettings::get();
    let storage = Arc::new(JsonFileNoteStorage::open(settings.storage.path.as_str()).await?);
    let notifier = Arc::new(LogNotifier);
    let app = NoteApp::new(
        storage,
        notifier,
        Duration::from_secs(settings.notifications.timeout_secs),
    );

    let restored = app.restore_schedules().await?;
    log::info!("Restored pending reminders. [count = {}]", restored);

    tokio::signal::ctrl_c().await?;
    log::info!("Shutting down.");
    Ok(())
}
