//! Per-event processing. One inbound event is taken through pending-action
//! resolution, intent classification, storage mutation and response
//! rendering before the next one is handled; the only suspension points are
//! transport acknowledgments. No failure path is allowed to escape to the
//! event loop: every error ends in a user-visible message.

use std::collections::HashMap;
use std::sync::Arc;

use time::{Duration, OffsetDateTime};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::config::Config;
use crate::domains::event::{ChatEvent, MessageHandle};
use crate::domains::keyboard::Keyboard;
use crate::domains::records::{day_name_for, RecordKind};
use crate::error::Result;
use crate::interfaces::store::{MarkOutcome, RecordStore};
use crate::interfaces::transport::ChatTransport;
use crate::services::intent::{parse_message, parse_reminder, ParsedRecord};
use crate::services::navigation as nav;
use crate::services::navigation::MenuState;
use crate::services::resolver::{parse_index_reply, IndexReply, PendingAction};
use crate::services::views::{self, DayScope};

const INVALID_INDEX_TEXT: &str =
    "⚠️ Не понял. Отправь номер записи или <code>Все</code> для очистки.";
const OUT_OF_RANGE_TEXT: &str = "⚠️ Записи с таким номером нет.";
const GENERIC_FAILURE_ALERT: &str = "Произошла ошибка";

pub struct RouterService {
    store: Arc<dyn RecordStore>,
    transport: Arc<dyn ChatTransport>,
    config: Config,
    pending: RwLock<HashMap<String, PendingAction>>,
}

impl RouterService {
    pub fn new(
        store: Arc<dyn RecordStore>,
        transport: Arc<dyn ChatTransport>,
        config: Config,
    ) -> Self {
        Self {
            store,
            transport,
            config,
            pending: RwLock::new(HashMap::new()),
        }
    }

    pub async fn handle_event(&self, event: ChatEvent) -> Result<()> {
        debug!(user_id = event.user_id(), "handling event");
        match event {
            ChatEvent::Text { user_id, text } => self.handle_text(&user_id, &text).await,
            ChatEvent::ButtonPress {
                user_id,
                payload,
                message,
            } => self.handle_button(&user_id, &payload, &message).await,
            ChatEvent::Command {
                user_id,
                name,
                first_name,
            } => {
                self.handle_command(&user_id, &name, first_name.as_deref())
                    .await
            }
        }
    }

    pub async fn handle_command(
        &self,
        user_id: &str,
        name: &str,
        first_name: Option<&str>,
    ) -> Result<()> {
        match name {
            "start" => {
                self.store.init_user(user_id).await?;
                self.send(user_id, &nav::greeting(first_name), Some(nav::main_menu_keyboard()))
                    .await;
            }
            "help" => self.send(user_id, nav::HELP_TEXT, None).await,
            "schedule" => {
                self.send(user_id, nav::SCHEDULE_MENU_TEXT, Some(nav::schedule_keyboard()))
                    .await
            }
            "homework" => {
                self.send(user_id, nav::HOMEWORK_MENU_TEXT, Some(nav::homework_keyboard()))
                    .await
            }
            "notes" => {
                self.send(user_id, nav::NOTES_MENU_TEXT, Some(nav::notes_keyboard()))
                    .await
            }
            other => {
                debug!(command = other, "unknown command");
                self.send(user_id, nav::FALLBACK_TEXT, Some(nav::main_menu_keyboard()))
                    .await;
            }
        }
        Ok(())
    }

    pub async fn handle_button(
        &self,
        user_id: &str,
        payload: &str,
        message: &MessageHandle,
    ) -> Result<()> {
        // Navigating anywhere abandons whatever prompt was armed.
        self.pending.write().await.remove(user_id);

        let Some(state) = MenuState::from_payload(payload) else {
            warn!(payload, "unrouted button payload");
            self.ack(message, Some(GENERIC_FAILURE_ALERT)).await;
            return Ok(());
        };

        let (text, keyboard) = self.render_state(user_id, state).await?;
        if let Some(action) = self.pending_action_for(user_id, state).await? {
            self.rearm(user_id, action).await;
        }
        self.edit_or_send(user_id, message, &text, Some(keyboard)).await;
        Ok(())
    }

    /// Which pending action a state arms. Delete prompts over empty
    /// collections and a done prompt with nothing left open arm nothing.
    async fn pending_action_for(
        &self,
        user_id: &str,
        state: MenuState,
    ) -> Result<Option<PendingAction>> {
        if let Some(kind) = kind_for_delete(state) {
            let count = self.store.count(user_id, kind).await?;
            return Ok((count > 0).then_some(PendingAction::Delete(kind)));
        }
        Ok(match state {
            MenuState::HomeworkDone => {
                let items = self.store.homework(user_id).await?;
                items
                    .iter()
                    .any(|h| !h.done)
                    .then_some(PendingAction::HomeworkDone)
            }
            MenuState::RemindersAdd => Some(PendingAction::ReminderAdd),
            MenuState::NotesSearch => Some(PendingAction::NoteSearch),
            _ => None,
        })
    }

    /// Renders the view and keyboard for a menu state from a store snapshot.
    async fn render_state(&self, user_id: &str, state: MenuState) -> Result<(String, Keyboard)> {
        Ok(match state {
            MenuState::MainMenu => (nav::MAIN_MENU_TEXT.to_string(), nav::main_menu_keyboard()),
            MenuState::Schedule => (nav::SCHEDULE_MENU_TEXT.to_string(), nav::schedule_keyboard()),
            MenuState::ScheduleToday => {
                let entries = self.store.schedule(user_id).await?;
                let (today, _) = today_and_tomorrow();
                (
                    views::daily_schedule(&entries, today, DayScope::Today),
                    nav::back_keyboard("⬅️ Назад к расписанию", "schedule"),
                )
            }
            MenuState::ScheduleTomorrow => {
                let entries = self.store.schedule(user_id).await?;
                let (_, tomorrow) = today_and_tomorrow();
                (
                    views::daily_schedule(&entries, tomorrow, DayScope::Tomorrow),
                    nav::back_keyboard("⬅️ Назад к расписанию", "schedule"),
                )
            }
            MenuState::ScheduleWeek => {
                let entries = self.store.schedule(user_id).await?;
                (
                    views::weekly_schedule(&entries),
                    nav::back_keyboard("⬅️ Назад к расписанию", "schedule"),
                )
            }
            MenuState::ScheduleAdd => (
                nav::SCHEDULE_ADD_PROMPT.to_string(),
                nav::back_keyboard("⬅️ Назад", "schedule"),
            ),
            MenuState::ScheduleDelete => {
                let text = if self.store.count(user_id, RecordKind::Schedule).await? == 0 {
                    "🗑️ <b>Удалить занятие</b>\n\nРасписание пусто. Нечего удалять!".to_string()
                } else {
                    "🗑️ <b>Удалить занятие</b>\n\n\
                     Отправь номер занятия для удаления.\n\
                     Или отправь: <code>Все</code> для очистки расписания."
                        .to_string()
                };
                (text, nav::back_keyboard("⬅️ Назад", "schedule"))
            }
            MenuState::Homework => (nav::HOMEWORK_MENU_TEXT.to_string(), nav::homework_keyboard()),
            MenuState::HomeworkList => {
                let items = self.store.homework(user_id).await?;
                (
                    views::homework_list(&items),
                    nav::back_keyboard("⬅️ Назад к заданиям", "homework"),
                )
            }
            MenuState::HomeworkAdd => (
                nav::HOMEWORK_ADD_PROMPT.to_string(),
                nav::back_keyboard("⬅️ Назад", "homework"),
            ),
            MenuState::HomeworkDone => {
                let items = self.store.homework(user_id).await?;
                let text = if items.is_empty() {
                    "✅ <b>Выполнено</b>\n\nЗаданий нет!".to_string()
                } else if items.iter().all(|h| h.done) {
                    "✅ <b>Выполнено</b>\n\nВсе задания выполнены! 🎉".to_string()
                } else {
                    "✅ <b>Отметить выполненным</b>\n\nОтправь номер задания для отметки."
                        .to_string()
                };
                (text, nav::back_keyboard("⬅️ Назад", "homework"))
            }
            MenuState::HomeworkDelete => {
                let text = if self.store.count(user_id, RecordKind::Homework).await? == 0 {
                    "🗑️ <b>Удалить задание</b>\n\nЗаданий нет!".to_string()
                } else {
                    "🗑️ <b>Удалить задание</b>\n\n\
                     Отправь номер задания для удаления.\n\
                     Или отправь: <code>Все</code> для очистки."
                        .to_string()
                };
                (text, nav::back_keyboard("⬅️ Назад", "homework"))
            }
            MenuState::Notes => (nav::NOTES_MENU_TEXT.to_string(), nav::notes_keyboard()),
            MenuState::NotesList => {
                let notes = self.store.notes(user_id).await?;
                (
                    views::notes_list(
                        &notes,
                        self.config.notes_preview_chars(),
                        self.config.notes_list_max(),
                    ),
                    nav::back_keyboard("⬅️ Назад к заметкам", "notes"),
                )
            }
            MenuState::NotesAdd => (
                nav::NOTES_ADD_PROMPT.to_string(),
                nav::back_keyboard("⬅️ Назад", "notes"),
            ),
            MenuState::NotesSearch => (
                nav::NOTES_SEARCH_PROMPT.to_string(),
                nav::back_keyboard("⬅️ Назад", "notes"),
            ),
            MenuState::NotesDelete => {
                let text = if self.store.count(user_id, RecordKind::Notes).await? == 0 {
                    "🗑️ <b>Удалить заметку</b>\n\nЗаметок нет!".to_string()
                } else {
                    "🗑️ <b>Удалить заметку</b>\n\n\
                     Отправь номер заметки для удаления.\n\
                     Или отправь: <code>Все</code> для очистки."
                        .to_string()
                };
                (text, nav::back_keyboard("⬅️ Назад", "notes"))
            }
            MenuState::Reminders => {
                let reminders = self.store.reminders(user_id).await?;
                (
                    views::reminders_view(&reminders),
                    nav::reminders_keyboard(!reminders.is_empty()),
                )
            }
            MenuState::RemindersAdd => (
                nav::REMINDERS_ADD_PROMPT.to_string(),
                nav::back_keyboard("⬅️ Назад", "reminders"),
            ),
            MenuState::RemindersDelete => {
                let text = if self.store.count(user_id, RecordKind::Reminders).await? == 0 {
                    "🗑️ <b>Удалить напоминание</b>\n\nНапоминаний нет!".to_string()
                } else {
                    "🗑️ <b>Удалить напоминание</b>\n\n\
                     Отправь номер напоминания для удаления.\n\
                     Или отправь: <code>Все</code> для очистки."
                        .to_string()
                };
                (text, nav::back_keyboard("⬅️ Назад", "reminders"))
            }
            MenuState::Links => (
                nav::LINKS_MENU_TEXT.to_string(),
                nav::links_keyboard(&self.config.links()),
            ),
            MenuState::About => (
                nav::ABOUT_TEXT.to_string(),
                nav::back_keyboard("⬅️ Назад", "main_menu"),
            ),
        })
    }

    pub async fn handle_text(&self, user_id: &str, text: &str) -> Result<()> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }

        // Bind before the if-let so the lock guard drops here; resolving may
        // re-arm the slot and take the lock again.
        let armed = self.pending.write().await.remove(user_id);
        if let Some(action) = armed {
            return self.resolve_pending(user_id, action, text).await;
        }

        match parse_message(text) {
            Some(ParsedRecord::Schedule(entry)) => {
                let confirmation = format!(
                    "✅ Занятие добавлено!\n\n📅 {}\n🕐 {}\n📚 {}\n📍 {}",
                    entry.day, entry.time, entry.subject, entry.room
                );
                self.store.add_schedule(user_id, entry).await?;
                self.send(
                    user_id,
                    &confirmation,
                    Some(nav::back_keyboard("📅 Расписание", "schedule")),
                )
                .await;
            }
            Some(ParsedRecord::Homework(item)) => {
                let confirmation = format!(
                    "✅ Задание добавлено!\n\n📚 {}\n📝 {}\n📅 Дедлайн: {}",
                    item.subject, item.task, item.deadline
                );
                self.store.add_homework(user_id, item).await?;
                self.send(
                    user_id,
                    &confirmation,
                    Some(nav::back_keyboard("📝 Задания", "homework")),
                )
                .await;
            }
            Some(ParsedRecord::Note(note)) => {
                let confirmation = format!(
                    "✅ Заметка сохранена!\n\n📌 {}\n{}...",
                    note.title,
                    views::preview(&note.body, 100)
                );
                self.store.add_note(user_id, note).await?;
                self.send(
                    user_id,
                    &confirmation,
                    Some(nav::back_keyboard("📌 Заметки", "notes")),
                )
                .await;
            }
            None => {
                self.send(user_id, nav::FALLBACK_TEXT, Some(nav::main_menu_keyboard()))
                    .await;
            }
        }
        Ok(())
    }

    async fn resolve_pending(
        &self,
        user_id: &str,
        action: PendingAction,
        text: &str,
    ) -> Result<()> {
        match action {
            PendingAction::ReminderAdd => {
                let reminder = parse_reminder(text);
                let confirmation = format!(
                    "✅ Напоминание добавлено!\n\n⏰ {}\n📅 {}",
                    reminder.text, reminder.date
                );
                self.store.add_reminder(user_id, reminder).await?;
                self.send(
                    user_id,
                    &confirmation,
                    Some(nav::back_keyboard("⏰ Напоминания", "reminders")),
                )
                .await;
            }
            PendingAction::NoteSearch => {
                let notes = self.store.notes(user_id).await?;
                let results =
                    views::notes_search_results(&notes, text, self.config.notes_preview_chars());
                self.send(user_id, &results, Some(nav::back_keyboard("⬅️ Назад", "notes")))
                    .await;
            }
            PendingAction::Delete(kind) => self.resolve_delete(user_id, kind, text).await?,
            PendingAction::HomeworkDone => self.resolve_done(user_id, text).await?,
        }
        Ok(())
    }

    async fn resolve_delete(&self, user_id: &str, kind: RecordKind, text: &str) -> Result<()> {
        let (section_label, section_payload) = section_button(kind);
        match parse_index_reply(text) {
            Some(IndexReply::All) => {
                self.store.clear(user_id, kind).await?;
                self.send(
                    user_id,
                    &format!("✅ {}!", kind.cleared_label()),
                    Some(nav::back_keyboard(section_label, section_payload)),
                )
                .await;
            }
            Some(IndexReply::Index(index)) => {
                if self.store.remove(user_id, kind, index).await? {
                    self.send(
                        user_id,
                        &format!("✅ {}!", kind.deleted_label()),
                        Some(nav::back_keyboard(section_label, section_payload)),
                    )
                    .await;
                } else {
                    self.rearm(user_id, PendingAction::Delete(kind)).await;
                    self.send(user_id, OUT_OF_RANGE_TEXT, None).await;
                }
            }
            None => {
                self.rearm(user_id, PendingAction::Delete(kind)).await;
                self.send(user_id, INVALID_INDEX_TEXT, None).await;
            }
        }
        Ok(())
    }

    async fn resolve_done(&self, user_id: &str, text: &str) -> Result<()> {
        match parse_index_reply(text) {
            Some(IndexReply::Index(index)) => {
                match self.store.mark_homework_done(user_id, index).await? {
                    MarkOutcome::Marked => {
                        self.send(
                            user_id,
                            "✅ Задание отмечено выполненным!",
                            Some(nav::back_keyboard("📝 Задания", "homework")),
                        )
                        .await;
                    }
                    MarkOutcome::AlreadyDone => {
                        self.send(
                            user_id,
                            "⚠️ Это задание уже выполнено.",
                            Some(nav::back_keyboard("📝 Задания", "homework")),
                        )
                        .await;
                    }
                    MarkOutcome::OutOfRange => {
                        self.rearm(user_id, PendingAction::HomeworkDone).await;
                        self.send(user_id, OUT_OF_RANGE_TEXT, None).await;
                    }
                }
            }
            // The done prompt takes an index only; "Все" is not a completion.
            Some(IndexReply::All) | None => {
                self.rearm(user_id, PendingAction::HomeworkDone).await;
                self.send(user_id, "⚠️ Не понял. Отправь номер задания для отметки.", None)
                    .await;
            }
        }
        Ok(())
    }

    async fn rearm(&self, user_id: &str, action: PendingAction) {
        self.pending
            .write()
            .await
            .insert(user_id.to_string(), action);
    }

    /// Delivers a response to a button press: edit in place, fall back to a
    /// fresh message when editing fails, and surface a generic alert when
    /// both attempts fail. The press is acknowledged in every case.
    async fn edit_or_send(
        &self,
        user_id: &str,
        message: &MessageHandle,
        text: &str,
        keyboard: Option<Keyboard>,
    ) {
        match self
            .transport
            .edit_message(message, text, keyboard.clone())
            .await
        {
            Ok(()) => self.ack(message, None).await,
            Err(err) => {
                warn!(error = %err, "edit failed, sending a new message instead");
                match self.transport.send_message(user_id, text, keyboard).await {
                    Ok(_) => self.ack(message, None).await,
                    Err(err) => {
                        warn!(error = %err, "fallback send failed");
                        self.ack(message, Some(GENERIC_FAILURE_ALERT)).await;
                    }
                }
            }
        }
    }

    async fn send(&self, user_id: &str, text: &str, keyboard: Option<Keyboard>) {
        if let Err(err) = self.transport.send_message(user_id, text, keyboard).await {
            warn!(error = %err, user_id, "send failed");
        }
    }

    async fn ack(&self, message: &MessageHandle, alert: Option<&str>) {
        if let Err(err) = self.transport.ack_button(message, alert).await {
            debug!(error = %err, "button ack failed");
        }
    }
}

/// (label, payload) of the section button shown after a resolver action.
fn section_button(kind: RecordKind) -> (&'static str, &'static str) {
    match kind {
        RecordKind::Schedule => ("📅 Расписание", "schedule"),
        RecordKind::Homework => ("📝 Задания", "homework"),
        RecordKind::Notes => ("📌 Заметки", "notes"),
        RecordKind::Reminders => ("⏰ Напоминания", "reminders"),
    }
}

fn kind_for_delete(state: MenuState) -> Option<RecordKind> {
    match state {
        MenuState::ScheduleDelete => Some(RecordKind::Schedule),
        MenuState::HomeworkDelete => Some(RecordKind::Homework),
        MenuState::NotesDelete => Some(RecordKind::Notes),
        MenuState::RemindersDelete => Some(RecordKind::Reminders),
        _ => None,
    }
}

fn today_and_tomorrow() -> (&'static str, &'static str) {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let tomorrow = now + Duration::days(1);
    (day_name_for(now.weekday()), day_name_for(tomorrow.weekday()))
}
