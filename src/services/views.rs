//! Read-only textual projections of the stored collections. Every view is
//! deterministic: fixed ordering rules, fixed empty-state text, HTML bold
//! tags left for the transport to render.

use crate::domains::records::{HomeworkItem, Note, Reminder, ScheduleEntry, DAYS_ORDERED};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayScope {
    Today,
    Tomorrow,
}

impl DayScope {
    fn label(&self) -> &'static str {
        match self {
            DayScope::Today => "сегодня",
            DayScope::Tomorrow => "завтра",
        }
    }
}

/// Schedule for one canonical day. Entries sort ascending by the raw time
/// string; the sort is lexical on purpose, so "9:00" lands after "10:00".
pub fn daily_schedule(entries: &[ScheduleEntry], day: &str, scope: DayScope) -> String {
    let header = format!("📅 <b>Расписание на {} ({day})</b>\n\n", scope.label());
    let mut day_entries: Vec<&ScheduleEntry> = entries.iter().filter(|e| e.day == day).collect();
    if day_entries.is_empty() {
        let empty = match scope {
            DayScope::Today => {
                "На сегодня занятий нет! 🎉\nИли добавь расписание через кнопку '➕ Добавить занятие'"
            }
            DayScope::Tomorrow => "На завтра занятий нет! 🎉",
        };
        return format!("{header}{empty}");
    }
    day_entries.sort_by(|a, b| a.time.cmp(&b.time));
    let body = day_entries
        .iter()
        .map(|e| format!("🕐 {} - {}\n   📍 {}\n", e.time, e.subject, e.room))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{header}{body}")
}

/// Whole week grouped by canonical day in fixed Monday-first order; days
/// with no entries are omitted entirely.
pub fn weekly_schedule(entries: &[ScheduleEntry]) -> String {
    if entries.is_empty() {
        return "📅 <b>Расписание на неделю</b>\n\nРасписание пусто. Добавь занятия!".to_string();
    }
    let mut week = String::new();
    for day in DAYS_ORDERED {
        let mut day_entries: Vec<&ScheduleEntry> =
            entries.iter().filter(|e| e.day == day).collect();
        if day_entries.is_empty() {
            continue;
        }
        day_entries.sort_by(|a, b| a.time.cmp(&b.time));
        week.push_str(&format!("\n<b>{day}:</b>\n"));
        for e in day_entries {
            week.push_str(&format!("🕐 {} - {} ({})\n", e.time, e.subject, e.room));
        }
    }
    format!("📅 <b>Расписание на неделю</b>\n{week}")
}

/// Homework in insertion order with 1-based indices and a done glyph.
pub fn homework_list(items: &[HomeworkItem]) -> String {
    if items.is_empty() {
        return "📋 <b>Мои домашние задания</b>\n\n\
                Заданий пока нет! 🎉\n\
                Добавь задание через кнопку '➕ Добавить задание'"
            .to_string();
    }
    let body = items
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let status = if h.done { "✅ Выполнено" } else { "⏳ В работе" };
            format!(
                "{}. 📚 {}\n   📝 {}\n   📅 Дедлайн: {}\n   {status}\n",
                i + 1,
                h.subject,
                h.task,
                h.deadline
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!("📋 <b>Мои домашние задания</b>\n\n{body}")
}

/// First `max` notes with the body cut to `preview_chars` characters. The
/// cut counts characters, not bytes; Cyrillic bodies would split mid-char
/// otherwise.
pub fn notes_list(notes: &[Note], preview_chars: usize, max: usize) -> String {
    if notes.is_empty() {
        return "📋 <b>Мои заметки</b>\n\n\
                Заметок пока нет!\n\
                Создай заметку через кнопку '➕ Новая заметка'"
            .to_string();
    }
    let body = notes
        .iter()
        .take(max)
        .enumerate()
        .map(|(i, note)| {
            format!(
                "{}. 📌 {}\n   {}...\n",
                i + 1,
                note.title,
                preview(&note.body, preview_chars)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!("📋 <b>Мои заметки</b>\n\n{body}")
}

/// Notes whose title or body contains the query, case-insensitively.
pub fn notes_search_results(notes: &[Note], query: &str, preview_chars: usize) -> String {
    let needle = query.trim().to_lowercase();
    let hits: Vec<&Note> = notes
        .iter()
        .filter(|n| {
            n.title.to_lowercase().contains(&needle) || n.body.to_lowercase().contains(&needle)
        })
        .collect();
    if hits.is_empty() {
        return format!("🔍 <b>Поиск заметок</b>\n\nПо запросу «{}» ничего не найдено.", query.trim());
    }
    let body = hits
        .iter()
        .enumerate()
        .map(|(i, note)| {
            format!(
                "{}. 📌 {}\n   {}...\n",
                i + 1,
                note.title,
                preview(&note.body, preview_chars)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!("🔍 <b>Поиск заметок</b>\n\n{body}")
}

/// Reminders list rendered inline in the reminders menu.
pub fn reminders_view(reminders: &[Reminder]) -> String {
    if reminders.is_empty() {
        return "⏰ <b>Напоминания</b>\n\nНапоминаний пока нет!".to_string();
    }
    let body = reminders
        .iter()
        .enumerate()
        .map(|(i, r)| format!("{}. ⏰ {}\n   📅 {}\n", i + 1, r.text, r.date))
        .collect::<Vec<_>>()
        .join("\n");
    format!("⏰ <b>Напоминания</b>\n\n{body}")
}

pub fn preview(text: &str, chars: usize) -> String {
    text.chars().take(chars).collect()
}
