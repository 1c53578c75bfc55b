//! Freeform-text intent classification and field parsing.
//!
//! Classification is a fixed priority chain (schedule > homework > note);
//! the first rule whose coarse shape matches wins the first attempt, but a
//! parser that then fails its field-count requirement falls through to the
//! next stage instead of erroring. A note that happens to contain a weekday
//! word and a pipe therefore classifies as a schedule entry; that ambiguity
//! is inherited behavior, not a defect.

use crate::domains::records::{
    contains_weekday_token, normalize_day, HomeworkItem, Note, Reminder, ScheduleEntry,
    DATE_UNSPECIFIED, DEADLINE_UNSPECIFIED, ROOM_UNSPECIFIED,
};

/// Closed subject list for homework classification. Texts naming a subject
/// outside this list never classify as homework from freeform input alone.
pub const SUBJECTS: [&str; 7] = [
    "математика",
    "физика",
    "химия",
    "история",
    "литература",
    "английский",
    "русский",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Schedule,
    Homework,
    Note,
    None,
}

/// Coarse shape classification of a trimmed message, in priority order.
pub fn classify(text: &str) -> Intent {
    if matches_schedule(text) {
        Intent::Schedule
    } else if matches_homework(text) {
        Intent::Homework
    } else if matches_note(text) {
        Intent::Note
    } else {
        Intent::None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedRecord {
    Schedule(ScheduleEntry),
    Homework(HomeworkItem),
    Note(Note),
}

type Stage = (fn(&str) -> bool, fn(&str) -> Option<ParsedRecord>);

/// Ordered (predicate, parser) cascade. Each stage runs only if its
/// predicate matches, and a parse failure hands the text to the next stage,
/// so a two-segment schedule-shaped text still gets a chance to land as
/// homework or note.
const STAGES: [Stage; 3] = [
    (matches_schedule, parse_schedule_record),
    (matches_homework, parse_homework_record),
    (matches_note, parse_note_record),
];

pub fn parse_message(text: &str) -> Option<ParsedRecord> {
    let text = text.trim();
    for (matches, parse) in STAGES {
        if matches(text) {
            if let Some(record) = parse(text) {
                return Some(record);
            }
        }
    }
    None
}

fn matches_schedule(text: &str) -> bool {
    text.contains('|') && contains_weekday_token(&text.to_lowercase())
}

fn matches_homework(text: &str) -> bool {
    if !text.contains('|') {
        return false;
    }
    let lower = text.to_lowercase();
    SUBJECTS.iter().any(|subject| lower.contains(subject))
}

fn matches_note(text: &str) -> bool {
    text.contains('|') || text.contains('\n')
}

fn parse_schedule_record(text: &str) -> Option<ParsedRecord> {
    parse_schedule(text).map(ParsedRecord::Schedule)
}

fn parse_homework_record(text: &str) -> Option<ParsedRecord> {
    parse_homework(text).map(ParsedRecord::Homework)
}

fn parse_note_record(text: &str) -> Option<ParsedRecord> {
    parse_note(text).map(ParsedRecord::Note)
}

/// `День | Время | Предмет [| Аудитория]`, at least three segments.
pub fn parse_schedule(text: &str) -> Option<ScheduleEntry> {
    let parts: Vec<&str> = text.split('|').map(str::trim).collect();
    if parts.len() < 3 {
        return None;
    }
    Some(ScheduleEntry {
        day: normalize_day(parts[0]),
        time: parts[1].to_string(),
        subject: parts[2].to_string(),
        room: parts
            .get(3)
            .map(|r| r.to_string())
            .unwrap_or_else(|| ROOM_UNSPECIFIED.to_string()),
    })
}

/// `Предмет | Задание [| Дедлайн]`, at least two segments.
pub fn parse_homework(text: &str) -> Option<HomeworkItem> {
    let parts: Vec<&str> = text.split('|').map(str::trim).collect();
    if parts.len() < 2 {
        return None;
    }
    Some(HomeworkItem {
        subject: parts[0].to_string(),
        task: parts[1].to_string(),
        deadline: parts
            .get(2)
            .map(|d| d.to_string())
            .unwrap_or_else(|| DEADLINE_UNSPECIFIED.to_string()),
        done: false,
    })
}

/// `Заголовок | Текст`, or first line as title with the remainder as body.
/// A single line with no pipe stores the same text as both title and body.
pub fn parse_note(text: &str) -> Option<Note> {
    if let Some((title, body)) = text.split_once('|') {
        return Some(Note {
            title: title.trim().to_string(),
            body: body.trim().to_string(),
        });
    }
    let (title, body) = match text.split_once('\n') {
        Some((first, rest)) => (first.trim().to_string(), rest.trim().to_string()),
        None => (text.trim().to_string(), text.trim().to_string()),
    };
    Some(Note { title, body })
}

/// `Текст напоминания [| Дата]`; reached only through the reminders-add
/// prompt, never from top-level classification.
pub fn parse_reminder(text: &str) -> Reminder {
    match text.split_once('|') {
        Some((body, date)) => Reminder {
            text: body.trim().to_string(),
            date: date.trim().to_string(),
        },
        None => Reminder {
            text: text.trim().to_string(),
            date: DATE_UNSPECIFIED.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_outranks_homework_on_ambiguous_text() {
        // Weekday token, subject token and a pipe all present.
        assert_eq!(classify("Понедельник | 09:00 | Математика"), Intent::Schedule);
    }

    #[test]
    fn short_schedule_shape_falls_through_to_homework() {
        // "пн" matches the weekday set, but two segments fail the schedule
        // parser; the subject token then claims it as homework.
        let parsed = parse_message("Математика пн | задачи 1-5").unwrap();
        assert!(matches!(parsed, ParsedRecord::Homework(_)));
    }

    #[test]
    fn unmatched_text_yields_none() {
        assert_eq!(classify("привет"), Intent::None);
        assert!(parse_message("привет").is_none());
    }
}
