use std::sync::OnceLock;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct StorageSettings {
    /// Location of the flat-file note store.
    pub path: String,
}

#[derive(Deserialize, Debug)]
pub struct NotificationSettings {
    /// How long a fired notification stays visible.
    pub timeout_secs: u64,
}

#[derive(Deserialize, Debug)]
pub struct AppSettings {
    pub storage: StorageSettings,
    pub notifications: NotificationSettings,
}

impl AppSettings {
    fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("storage.path", "notes.json")?
            .set_default("notifications.timeout_secs", 10_u64)?
            .add_source(File::with_name("appsettings").required(false))
            .add_source(File::with_name("appsettings.local").required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}

pub fn get() -> &'static AppSettings {
    static APPSETTINGS: OnceLock<AppSettings> = OnceLock::new();
    APPSETTINGS.get_or_init(|| AppSettings::new().unwrap())
}
