use async_trait::async_trait;

use crate::domains::records::{HomeworkItem, Note, RecordKind, Reminder, ScheduleEntry};
use crate::error::Result;

/// Outcome of a completion attempt against a homework item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkOutcome {
    /// `done` flipped false -> true.
    Marked,
    /// Index valid but the item was already done; nothing changed.
    AlreadyDone,
    /// No item at that index.
    OutOfRange,
}

/// Per-user record storage. Collections are created lazily on first access
/// and are owned exclusively by their user id; list methods return cloned
/// snapshots so views never hold a reference into the store.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Makes sure all four collections exist for the user.
    async fn init_user(&self, user_id: &str) -> Result<()>;

    async fn add_schedule(&self, user_id: &str, entry: ScheduleEntry) -> Result<()>;
    async fn add_homework(&self, user_id: &str, item: HomeworkItem) -> Result<()>;
    async fn add_note(&self, user_id: &str, note: Note) -> Result<()>;
    async fn add_reminder(&self, user_id: &str, reminder: Reminder) -> Result<()>;

    async fn schedule(&self, user_id: &str) -> Result<Vec<ScheduleEntry>>;
    async fn homework(&self, user_id: &str) -> Result<Vec<HomeworkItem>>;
    async fn notes(&self, user_id: &str) -> Result<Vec<Note>>;
    async fn reminders(&self, user_id: &str) -> Result<Vec<Reminder>>;

    async fn count(&self, user_id: &str, kind: RecordKind) -> Result<usize>;

    /// Removes the record at the 0-based position; false when out of range.
    async fn remove(&self, user_id: &str, kind: RecordKind, index: usize) -> Result<bool>;

    /// Clears the whole collection, returning how many records were removed.
    async fn clear(&self, user_id: &str, kind: RecordKind) -> Result<usize>;

    /// Marks the homework item at the 0-based position as done.
    async fn mark_homework_done(&self, user_id: &str, index: usize) -> Result<MarkOutcome>;
}
