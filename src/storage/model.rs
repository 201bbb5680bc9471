use crate::note::{Note, ReminderAt};

use super::StoreError;

/// Create-time input for a note. Stores validate it before assigning an id
/// and persisting.
#[derive(Debug, Clone)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub reminder_at: ReminderAt,
}

impl NewNote {
    /// Builds a note from the raw strings an input form hands over, date and
    /// time entered as separate fields.
    pub fn parse(title: &str, content: &str, date: &str, time: &str) -> Result<Self, StoreError> {
        let reminder_at = format!("{date} {time}")
            .parse::<ReminderAt>()
            .map_err(|e| StoreError::Validation(format!("bad reminder date/time: {e}")))?;

        let new_note = Self {
            title: title.to_owned(),
            content: content.to_owned(),
            reminder_at,
        };
        new_note.validate()?;
        Ok(new_note)
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        if self.title.is_empty() {
            return Err(StoreError::Validation("title must not be empty".into()));
        }
        if self.content.is_empty() {
            return Err(StoreError::Validation("content must not be empty".into()));
        }
        Ok(())
    }
}

/// Case-insensitive substring match on title or content.
pub(super) fn matches_query(note: &Note, query: &str) -> bool {
    let query = query.to_lowercase();
    note.title.to_lowercase().contains(&query) || note.content.to_lowercase().contains(&query)
}
