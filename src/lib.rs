pub mod app;
pub mod appsettings;
pub mod datenav;
pub mod note;
pub mod notify;
pub mod scheduling;
pub mod storage;

pub use app::NoteApp;
pub use note::{Note, NoteId, ReminderAt};
pub use storage::{InMemoryNoteStorage, JsonFileNoteStorage, NewNote, NoteStorage, StoreError};
