mod common;

use campus_bot::domains::event::{ChatEvent, MessageHandle};
use campus_bot::domains::keyboard::ButtonAction;
use campus_bot::interfaces::store::RecordStore;
use campus_bot::CampusBot;
use std::sync::atomic::Ordering;

use common::{test_rig, Outbound};

const USER: &str = "u1";

async fn say(bot: &CampusBot, text: &str) {
    bot.handle_event(ChatEvent::Text {
        user_id: USER.to_string(),
        text: text.to_string(),
    })
    .await
    .unwrap();
}

async fn press(bot: &CampusBot, payload: &str) {
    bot.handle_event(ChatEvent::ButtonPress {
        user_id: USER.to_string(),
        payload: payload.to_string(),
        message: MessageHandle(1),
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn start_command_greets_with_main_menu() {
    let (bot, _store, transport) = test_rig();
    bot.handle_event(ChatEvent::Command {
        user_id: USER.to_string(),
        name: "start".to_string(),
        first_name: Some("Иван".to_string()),
    })
    .await
    .unwrap();

    let text = transport.last_text().await.unwrap();
    assert!(text.contains("Привет, Иван"));
    let keyboard = transport.last_keyboard().await.unwrap();
    let widths: Vec<usize> = keyboard.rows.iter().map(|r| r.len()).collect();
    assert_eq!(widths, vec![2, 2, 1, 1]);
    assert!(keyboard
        .buttons()
        .all(|b| matches!(b.action, ButtonAction::Callback(_))));
}

#[tokio::test]
async fn freeform_schedule_text_stores_canonical_day_and_confirms() {
    let (bot, store, transport) = test_rig();
    say(&bot, "пн | 09:00 | Математика | 201").await;

    let entries = store.schedule(USER).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].day, "Понедельник");
    assert!(transport
        .last_text()
        .await
        .unwrap()
        .contains("Занятие добавлено"));

    press(&bot, "schedule_week").await;
    let week = transport.last_text().await.unwrap();
    assert!(week.contains("Понедельник"));
    assert!(week.contains("09:00 - Математика (201)"));
}

#[tokio::test]
async fn delete_prompt_then_index_removes_exactly_one_entry() {
    let (bot, store, _transport) = test_rig();
    say(&bot, "пн | 09:00 | Математика").await;
    say(&bot, "вт | 10:00 | Физика").await;

    press(&bot, "schedule_delete").await;
    say(&bot, "1").await;

    let left = store.schedule(USER).await.unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].day, "Вторник");
}

#[tokio::test]
async fn all_sentinel_clears_the_whole_collection() {
    let (bot, store, transport) = test_rig();
    say(&bot, "пн | 09:00 | Математика").await;
    say(&bot, "вт | 10:00 | Физика").await;

    press(&bot, "schedule_delete").await;
    say(&bot, "Все").await;

    assert!(store.schedule(USER).await.unwrap().is_empty());
    assert!(transport
        .last_text()
        .await
        .unwrap()
        .contains("Расписание очищено"));
}

#[tokio::test]
async fn marking_done_touches_only_the_chosen_item() {
    let (bot, store, _transport) = test_rig();
    say(&bot, "Математика | решить задачи 1-5").await;
    say(&bot, "Физика | подготовить доклад").await;

    press(&bot, "homework_done").await;
    say(&bot, "2").await;

    let items = store.homework(USER).await.unwrap();
    assert!(!items[0].done);
    assert!(items[1].done);
}

#[tokio::test]
async fn invalid_resolver_input_reports_and_keeps_the_prompt_armed() {
    let (bot, store, transport) = test_rig();
    say(&bot, "пн | 09:00 | Математика").await;

    press(&bot, "schedule_delete").await;
    say(&bot, "abc").await;
    assert!(transport.last_text().await.unwrap().contains("Не понял"));
    assert_eq!(store.schedule(USER).await.unwrap().len(), 1);

    say(&bot, "99").await;
    assert!(transport
        .last_text()
        .await
        .unwrap()
        .contains("Записи с таким номером нет"));
    assert_eq!(store.schedule(USER).await.unwrap().len(), 1);

    // The slot survived both bad replies, so a valid index still resolves.
    say(&bot, "1").await;
    assert!(store.schedule(USER).await.unwrap().is_empty());
}

#[tokio::test]
async fn stray_number_without_a_prompt_is_not_consumed() {
    let (bot, store, transport) = test_rig();
    say(&bot, "пн | 09:00 | Математика").await;
    say(&bot, "1").await;

    assert_eq!(store.schedule(USER).await.unwrap().len(), 1);
    assert!(transport
        .last_text()
        .await
        .unwrap()
        .contains("Не понял команду"));
}

#[tokio::test]
async fn navigating_away_disarms_a_pending_prompt() {
    let (bot, store, _transport) = test_rig();
    say(&bot, "пн | 09:00 | Математика").await;

    press(&bot, "schedule_delete").await;
    press(&bot, "main_menu").await;
    say(&bot, "1").await;

    assert_eq!(store.schedule(USER).await.unwrap().len(), 1);
}

#[tokio::test]
async fn delete_prompt_over_empty_collection_arms_nothing() {
    let (bot, store, transport) = test_rig();
    press(&bot, "schedule_delete").await;
    assert!(transport
        .last_text()
        .await
        .unwrap()
        .contains("Нечего удалять"));

    say(&bot, "1").await;
    assert!(transport
        .last_text()
        .await
        .unwrap()
        .contains("Не понял команду"));
    assert!(store.schedule(USER).await.unwrap().is_empty());
}

#[tokio::test]
async fn reminder_is_created_through_the_add_prompt() {
    let (bot, store, transport) = test_rig();
    press(&bot, "reminders_add").await;
    say(&bot, "Экзамен по математике | 25.12.2024").await;

    let reminders = store.reminders(USER).await.unwrap();
    assert_eq!(reminders.len(), 1);
    assert_eq!(reminders[0].date, "25.12.2024");

    // With a reminder present the menu now offers the delete button.
    press(&bot, "reminders").await;
    assert!(transport.last_text().await.unwrap().contains("Экзамен"));
    let keyboard = transport.last_keyboard().await.unwrap();
    assert!(keyboard.buttons().any(|b| b.label == "🗑️ Удалить"));
}

#[tokio::test]
async fn notes_search_prompt_finds_stored_notes() {
    let (bot, _store, transport) = test_rig();
    say(&bot, "Формулы | E = mc²").await;

    press(&bot, "notes_search").await;
    say(&bot, "формулы").await;

    let results = transport.last_text().await.unwrap();
    assert!(results.contains("Формулы"));
}

#[tokio::test]
async fn failed_edit_falls_back_to_a_fresh_message() {
    let (bot, _store, transport) = test_rig();
    transport.fail_edit.store(true, Ordering::SeqCst);

    press(&bot, "about").await;

    let outbound = transport.outbound().await;
    assert!(outbound.iter().any(|o| matches!(
        o,
        Outbound::Sent { text, .. } if text.contains("О боте")
    )));
    assert!(transport.alerts().await.is_empty());
}

#[tokio::test]
async fn double_transport_failure_surfaces_a_generic_alert() {
    let (bot, _store, transport) = test_rig();
    transport.fail_edit.store(true, Ordering::SeqCst);
    transport.fail_send.store(true, Ordering::SeqCst);

    press(&bot, "links").await;

    assert_eq!(transport.alerts().await, vec!["Произошла ошибка".to_string()]);
}

#[tokio::test]
async fn unknown_payload_is_acked_with_an_alert() {
    let (bot, _store, transport) = test_rig();
    press(&bot, "bogus_payload").await;
    assert_eq!(transport.alerts().await, vec!["Произошла ошибка".to_string()]);
}

#[tokio::test]
async fn users_do_not_share_collections() {
    let (bot, store, _transport) = test_rig();
    say(&bot, "пн | 09:00 | Математика").await;

    bot.handle_event(ChatEvent::Text {
        user_id: "u2".to_string(),
        text: "вт | 10:00 | Физика".to_string(),
    })
    .await
    .unwrap();

    assert_eq!(store.schedule(USER).await.unwrap().len(), 1);
    assert_eq!(store.schedule("u2").await.unwrap().len(), 1);
    assert_eq!(store.schedule(USER).await.unwrap()[0].subject, "Математика");
}
