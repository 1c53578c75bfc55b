use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domains::records::{HomeworkItem, Note, RecordKind, Reminder, ScheduleEntry};
use crate::error::Result;
use crate::interfaces::store::{MarkOutcome, RecordStore};

#[derive(Debug, Default, Clone)]
struct UserRecords {
    schedule: Vec<ScheduleEntry>,
    homework: Vec<HomeworkItem>,
    notes: Vec<Note>,
    reminders: Vec<Reminder>,
}

/// Process-lifetime record store. One lock over the whole map keeps each
/// event's mutations atomic per user; there is no durable backing and no
/// teardown beyond process exit.
#[derive(Default)]
pub struct InMemoryRecordStore {
    store: RwLock<HashMap<String, UserRecords>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn init_user(&self, user_id: &str) -> Result<()> {
        let mut guard = self.store.write().await;
        guard.entry(user_id.to_string()).or_default();
        Ok(())
    }

    async fn add_schedule(&self, user_id: &str, entry: ScheduleEntry) -> Result<()> {
        let mut guard = self.store.write().await;
        guard
            .entry(user_id.to_string())
            .or_default()
            .schedule
            .push(entry);
        Ok(())
    }

    async fn add_homework(&self, user_id: &str, item: HomeworkItem) -> Result<()> {
        let mut guard = self.store.write().await;
        guard
            .entry(user_id.to_string())
            .or_default()
            .homework
            .push(item);
        Ok(())
    }

    async fn add_note(&self, user_id: &str, note: Note) -> Result<()> {
        let mut guard = self.store.write().await;
        guard.entry(user_id.to_string()).or_default().notes.push(note);
        Ok(())
    }

    async fn add_reminder(&self, user_id: &str, reminder: Reminder) -> Result<()> {
        let mut guard = self.store.write().await;
        guard
            .entry(user_id.to_string())
            .or_default()
            .reminders
            .push(reminder);
        Ok(())
    }

    async fn schedule(&self, user_id: &str) -> Result<Vec<ScheduleEntry>> {
        let guard = self.store.read().await;
        Ok(guard.get(user_id).map(|r| r.schedule.clone()).unwrap_or_default())
    }

    async fn homework(&self, user_id: &str) -> Result<Vec<HomeworkItem>> {
        let guard = self.store.read().await;
        Ok(guard.get(user_id).map(|r| r.homework.clone()).unwrap_or_default())
    }

    async fn notes(&self, user_id: &str) -> Result<Vec<Note>> {
        let guard = self.store.read().await;
        Ok(guard.get(user_id).map(|r| r.notes.clone()).unwrap_or_default())
    }

    async fn reminders(&self, user_id: &str) -> Result<Vec<Reminder>> {
        let guard = self.store.read().await;
        Ok(guard.get(user_id).map(|r| r.reminders.clone()).unwrap_or_default())
    }

    async fn count(&self, user_id: &str, kind: RecordKind) -> Result<usize> {
        let guard = self.store.read().await;
        Ok(guard.get(user_id).map_or(0, |r| match kind {
            RecordKind::Schedule => r.schedule.len(),
            RecordKind::Homework => r.homework.len(),
            RecordKind::Notes => r.notes.len(),
            RecordKind::Reminders => r.reminders.len(),
        }))
    }

    async fn remove(&self, user_id: &str, kind: RecordKind, index: usize) -> Result<bool> {
        let mut guard = self.store.write().await;
        let Some(records) = guard.get_mut(user_id) else {
            return Ok(false);
        };
        let removed = match kind {
            RecordKind::Schedule => remove_at(&mut records.schedule, index),
            RecordKind::Homework => remove_at(&mut records.homework, index),
            RecordKind::Notes => remove_at(&mut records.notes, index),
            RecordKind::Reminders => remove_at(&mut records.reminders, index),
        };
        Ok(removed)
    }

    async fn clear(&self, user_id: &str, kind: RecordKind) -> Result<usize> {
        let mut guard = self.store.write().await;
        let Some(records) = guard.get_mut(user_id) else {
            return Ok(0);
        };
        let cleared = match kind {
            RecordKind::Schedule => std::mem::take(&mut records.schedule).len(),
            RecordKind::Homework => std::mem::take(&mut records.homework).len(),
            RecordKind::Notes => std::mem::take(&mut records.notes).len(),
            RecordKind::Reminders => std::mem::take(&mut records.reminders).len(),
        };
        Ok(cleared)
    }

    async fn mark_homework_done(&self, user_id: &str, index: usize) -> Result<MarkOutcome> {
        let mut guard = self.store.write().await;
        let item = guard
            .get_mut(user_id)
            .and_then(|r| r.homework.get_mut(index));
        Ok(match item {
            None => MarkOutcome::OutOfRange,
            Some(item) if item.done => MarkOutcome::AlreadyDone,
            Some(item) => {
                item.done = true;
                MarkOutcome::Marked
            }
        })
    }
}

fn remove_at<T>(records: &mut Vec<T>, index: usize) -> bool {
    if index < records.len() {
        records.remove(index);
        true
    } else {
        false
    }
}
