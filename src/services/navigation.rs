//! The button-driven navigation graph: every reachable menu state, its
//! keyboard layout and its static prompt text. Keyboards are plain data;
//! the transport renders them. Every non-root state's keyboard carries a
//! back button to its logical parent.

use crate::config::LinkEntry;
use crate::domains::keyboard::{Button, Keyboard};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    MainMenu,
    Schedule,
    ScheduleToday,
    ScheduleTomorrow,
    ScheduleWeek,
    ScheduleAdd,
    ScheduleDelete,
    Homework,
    HomeworkList,
    HomeworkAdd,
    HomeworkDone,
    HomeworkDelete,
    Notes,
    NotesList,
    NotesAdd,
    NotesSearch,
    NotesDelete,
    Reminders,
    RemindersAdd,
    RemindersDelete,
    Links,
    About,
}

impl MenuState {
    /// Maps a button payload onto a state; unknown payloads stay unrouted.
    pub fn from_payload(payload: &str) -> Option<Self> {
        Some(match payload {
            "main_menu" => Self::MainMenu,
            "schedule" => Self::Schedule,
            "schedule_today" => Self::ScheduleToday,
            "schedule_tomorrow" => Self::ScheduleTomorrow,
            "schedule_week" => Self::ScheduleWeek,
            "schedule_add" => Self::ScheduleAdd,
            "schedule_delete" => Self::ScheduleDelete,
            "homework" => Self::Homework,
            "homework_list" => Self::HomeworkList,
            "homework_add" => Self::HomeworkAdd,
            "homework_done" => Self::HomeworkDone,
            "homework_delete" => Self::HomeworkDelete,
            "notes" => Self::Notes,
            "notes_list" => Self::NotesList,
            "notes_add" => Self::NotesAdd,
            "notes_search" => Self::NotesSearch,
            "notes_delete" => Self::NotesDelete,
            "reminders" => Self::Reminders,
            "reminders_add" => Self::RemindersAdd,
            "reminders_delete" => Self::RemindersDelete,
            "links" => Self::Links,
            "about" => Self::About,
            _ => return None,
        })
    }

    /// The state a back transition leads to. MainMenu is the root and has
    /// no parent.
    pub fn parent(&self) -> Option<Self> {
        match self {
            Self::MainMenu => None,
            Self::Schedule
            | Self::Homework
            | Self::Notes
            | Self::Reminders
            | Self::Links
            | Self::About => Some(Self::MainMenu),
            Self::ScheduleToday
            | Self::ScheduleTomorrow
            | Self::ScheduleWeek
            | Self::ScheduleAdd
            | Self::ScheduleDelete => Some(Self::Schedule),
            Self::HomeworkList
            | Self::HomeworkAdd
            | Self::HomeworkDone
            | Self::HomeworkDelete => Some(Self::Homework),
            Self::NotesList | Self::NotesAdd | Self::NotesSearch | Self::NotesDelete => {
                Some(Self::Notes)
            }
            Self::RemindersAdd | Self::RemindersDelete => Some(Self::Reminders),
        }
    }
}

pub fn main_menu_keyboard() -> Keyboard {
    Keyboard::from_flat(
        vec![
            Button::callback("📅 Расписание", "schedule"),
            Button::callback("📝 Домашние задания", "homework"),
            Button::callback("📌 Заметки", "notes"),
            Button::callback("⏰ Напоминания", "reminders"),
            Button::callback("📚 Полезные ссылки", "links"),
            Button::callback("ℹ️ О боте", "about"),
        ],
        &[2, 2, 1, 1],
    )
}

pub fn schedule_keyboard() -> Keyboard {
    Keyboard::from_flat(
        vec![
            Button::callback("📅 Сегодня", "schedule_today"),
            Button::callback("📆 Завтра", "schedule_tomorrow"),
            Button::callback("📋 Вся неделя", "schedule_week"),
            Button::callback("➕ Добавить занятие", "schedule_add"),
            Button::callback("🗑️ Удалить занятие", "schedule_delete"),
            Button::callback("⬅️ Назад", "main_menu"),
        ],
        &[2, 2, 1, 1],
    )
}

pub fn homework_keyboard() -> Keyboard {
    Keyboard::from_flat(
        vec![
            Button::callback("📋 Список заданий", "homework_list"),
            Button::callback("➕ Добавить задание", "homework_add"),
            Button::callback("✅ Выполнено", "homework_done"),
            Button::callback("🗑️ Удалить", "homework_delete"),
            Button::callback("⬅️ Назад", "main_menu"),
        ],
        &[2, 2, 1],
    )
}

pub fn notes_keyboard() -> Keyboard {
    Keyboard::from_flat(
        vec![
            Button::callback("📋 Мои заметки", "notes_list"),
            Button::callback("➕ Новая заметка", "notes_add"),
            Button::callback("🔍 Поиск", "notes_search"),
            Button::callback("🗑️ Удалить", "notes_delete"),
            Button::callback("⬅️ Назад", "main_menu"),
        ],
        &[2, 2, 1],
    )
}

/// The delete button only shows up while there is something to delete.
pub fn reminders_keyboard(has_reminders: bool) -> Keyboard {
    let mut buttons = vec![Button::callback("➕ Добавить напоминание", "reminders_add")];
    if has_reminders {
        buttons.push(Button::callback("🗑️ Удалить", "reminders_delete"));
    }
    buttons.push(Button::callback("⬅️ Назад", "main_menu"));
    Keyboard::from_flat(buttons, &[1, 1, 1])
}

pub fn links_keyboard(links: &[LinkEntry]) -> Keyboard {
    let mut buttons: Vec<Button> = links
        .iter()
        .map(|link| Button::url(link.label.clone(), link.url.clone()))
        .collect();
    buttons.push(Button::callback("⬅️ Назад", "main_menu"));
    Keyboard::from_flat(buttons, &[2, 2, 1, 1])
}

pub fn back_keyboard(label: &str, payload: &str) -> Keyboard {
    Keyboard::single(Button::callback(label, payload))
}

pub const MAIN_MENU_TEXT: &str = "🎓 <b>Главное меню</b>\n\nВыбери действие:";
pub const SCHEDULE_MENU_TEXT: &str = "📅 <b>Расписание занятий</b>\n\nВыбери действие:";
pub const HOMEWORK_MENU_TEXT: &str = "📝 <b>Домашние задания</b>\n\nУправляй своими заданиями:";
pub const NOTES_MENU_TEXT: &str = "📌 <b>Заметки</b>\n\nСохраняй важную информацию:";
pub const LINKS_MENU_TEXT: &str =
    "📚 <b>Полезные ссылки</b>\n\nБыстрый доступ к важным ресурсам:";

pub const SCHEDULE_ADD_PROMPT: &str = "➕ <b>Добавить занятие</b>\n\n\
    Отправь информацию в формате:\n\
    <code>День недели | Время | Предмет | Аудитория</code>\n\n\
    Пример:\n\
    <code>Понедельник | 09:00 | Математика | 201</code>\n\n\
    Или:\n\
    <code>Пн | 09:00 | Математика | 201</code>";

pub const HOMEWORK_ADD_PROMPT: &str = "➕ <b>Добавить домашнее задание</b>\n\n\
    Отправь информацию в формате:\n\
    <code>Предмет | Задание | Дедлайн</code>\n\n\
    Пример:\n\
    <code>Математика | Решить задачи 1-5 | 25.12.2024</code>\n\n\
    Или без дедлайна:\n\
    <code>Физика | Подготовить доклад</code>";

pub const NOTES_ADD_PROMPT: &str = "➕ <b>Новая заметка</b>\n\n\
    Отправь заметку в формате:\n\
    <code>Заголовок | Текст заметки</code>\n\n\
    Пример:\n\
    <code>Важная формула | E = mc²</code>\n\n\
    Или просто текст (первая строка станет заголовком):\n\
    <code>Лекция по физике\nСегодня разбирали квантовую механику...</code>";

pub const NOTES_SEARCH_PROMPT: &str =
    "🔍 <b>Поиск заметок</b>\n\nОтправь ключевое слово для поиска:";

pub const REMINDERS_ADD_PROMPT: &str = "➕ <b>Добавить напоминание</b>\n\n\
    Отправь в формате:\n\
    <code>Текст напоминания | Дата</code>\n\n\
    Пример:\n\
    <code>Экзамен по математике | 25.12.2024</code>";

pub const ABOUT_TEXT: &str = "ℹ️ <b>О боте</b>\n\n\
    🎓 Бот-помощник для студентов колледжа\n\n\
    <b>Возможности:</b>\n\
    • 📅 Управление расписанием\n\
    • 📝 Отслеживание домашних заданий\n\
    • 📌 Сохранение заметок\n\
    • ⏰ Напоминания о важных событиях\n\
    • 📚 Полезные ссылки\n\n\
    <b>Версия:</b> 1.0\n\n\
    Используй /help для списка команд";

pub const HELP_TEXT: &str = "📚 <b>Команды бота:</b>\n\n\
    /start - Главное меню\n\
    /help - Помощь\n\
    /schedule - Расписание\n\
    /homework - Домашние задания\n\
    /notes - Заметки\n\n\
    Используй кнопки для навигации! 🎓";

pub const FALLBACK_TEXT: &str = "Не понял команду. Используй кнопки меню или команду /start";

pub fn greeting(first_name: Option<&str>) -> String {
    let name = first_name.unwrap_or("студент");
    format!(
        "👋 Привет, {name}!\n\n\
         🎓 Добро пожаловать в бота-помощника для колледжа!\n\n\
         Я помогу тебе:\n\
         • 📅 Следить за расписанием\n\
         • 📝 Управлять домашними заданиями\n\
         • 📌 Сохранять важные заметки\n\
         • ⏰ Не забывать о дедлайнах\n\
         • 📚 Быстро находить полезные ссылки\n\n\
         Выбери действие:"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_payload_round_trips_through_from_payload() {
        for payload in [
            "main_menu",
            "schedule",
            "schedule_today",
            "homework_done",
            "notes_search",
            "reminders_delete",
            "links",
            "about",
        ] {
            assert!(MenuState::from_payload(payload).is_some(), "{payload}");
        }
        assert!(MenuState::from_payload("bogus").is_none());
    }

    #[test]
    fn every_non_root_state_has_a_parent_chain_to_main_menu() {
        let states = [
            MenuState::ScheduleDelete,
            MenuState::HomeworkDone,
            MenuState::NotesSearch,
            MenuState::RemindersAdd,
            MenuState::About,
        ];
        for mut state in states {
            let mut hops = 0;
            while let Some(parent) = state.parent() {
                state = parent;
                hops += 1;
                assert!(hops <= 3);
            }
            assert_eq!(state, MenuState::MainMenu);
        }
    }

    #[test]
    fn reminders_keyboard_hides_delete_when_empty() {
        let empty = reminders_keyboard(false);
        assert!(empty.buttons().all(|b| b.label != "🗑️ Удалить"));
        let full = reminders_keyboard(true);
        assert!(full.buttons().any(|b| b.label == "🗑️ Удалить"));
    }
}
