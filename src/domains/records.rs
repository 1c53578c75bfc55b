use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;
use time::Weekday;

/// Placeholder stored when the optional room segment was omitted.
pub const ROOM_UNSPECIFIED: &str = "Не указана";
/// Placeholder stored when the optional deadline segment was omitted.
pub const DEADLINE_UNSPECIFIED: &str = "Не указан";
/// Placeholder stored when the optional reminder date was omitted.
pub const DATE_UNSPECIFIED: &str = "Не указано";

/// Canonical weekday names in fixed Monday-first display order.
pub const DAYS_ORDERED: [&str; 7] = [
    "Понедельник",
    "Вторник",
    "Среда",
    "Четверг",
    "Пятница",
    "Суббота",
    "Воскресенье",
];

static DAY_SYNONYMS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("пн", "Понедельник"),
        ("понедельник", "Понедельник"),
        ("вт", "Вторник"),
        ("вторник", "Вторник"),
        ("ср", "Среда"),
        ("среда", "Среда"),
        ("чт", "Четверг"),
        ("четверг", "Четверг"),
        ("пт", "Пятница"),
        ("пятница", "Пятница"),
        ("сб", "Суббота"),
        ("суббота", "Суббота"),
        ("вс", "Воскресенье"),
        ("воскресенье", "Воскресенье"),
    ])
});

/// Maps a raw day token to its canonical full name. Unknown tokens pass
/// through unchanged, so a misspelled day is stored verbatim rather than
/// rejected.
pub fn normalize_day(raw: &str) -> String {
    let key = raw.trim().to_lowercase();
    match DAY_SYNONYMS.get(key.as_str()) {
        Some(canonical) => (*canonical).to_string(),
        None => raw.trim().to_string(),
    }
}

/// True when the lowercased text contains any weekday name or two-letter
/// abbreviation as a substring (same contract as the freeform classifier).
pub fn contains_weekday_token(text_lower: &str) -> bool {
    DAY_SYNONYMS.keys().any(|token| text_lower.contains(token))
}

/// Canonical name for a calendar weekday.
pub fn day_name_for(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Monday => DAYS_ORDERED[0],
        Weekday::Tuesday => DAYS_ORDERED[1],
        Weekday::Wednesday => DAYS_ORDERED[2],
        Weekday::Thursday => DAYS_ORDERED[3],
        Weekday::Friday => DAYS_ORDERED[4],
        Weekday::Saturday => DAYS_ORDERED[5],
        Weekday::Sunday => DAYS_ORDERED[6],
    }
}

/// The four per-user collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RecordKind {
    Schedule,
    Homework,
    Notes,
    Reminders,
}

impl RecordKind {
    /// Confirmation label after a single-record delete.
    pub fn deleted_label(&self) -> &'static str {
        match self {
            RecordKind::Schedule => "Занятие удалено",
            RecordKind::Homework => "Задание удалено",
            RecordKind::Notes => "Заметка удалена",
            RecordKind::Reminders => "Напоминание удалено",
        }
    }

    pub fn cleared_label(&self) -> &'static str {
        match self {
            RecordKind::Schedule => "Расписание очищено",
            RecordKind::Homework => "Список заданий очищен",
            RecordKind::Notes => "Заметки удалены",
            RecordKind::Reminders => "Напоминания удалены",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleEntry {
    /// Always the canonical full name when the input day was recognized.
    pub day: String,
    /// Free-form, never validated as a clock time; views sort it lexically.
    pub time: String,
    pub subject: String,
    pub room: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeworkItem {
    pub subject: String,
    pub task: String,
    pub deadline: String,
    /// Flips true only through an explicit completion action.
    pub done: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reminder {
    pub text: String,
    pub date: String,
}
