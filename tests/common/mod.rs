#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use campus_bot::config::Config;
use campus_bot::domains::event::MessageHandle;
use campus_bot::domains::keyboard::Keyboard;
use campus_bot::error::{CampusBotError, Result};
use campus_bot::interfaces::transport::ChatTransport;
use campus_bot::providers::memory::InMemoryRecordStore;
use campus_bot::CampusBot;

#[derive(Debug, Clone)]
pub enum Outbound {
    Sent {
        user_id: String,
        text: String,
        keyboard: Option<Keyboard>,
    },
    Edited {
        message: MessageHandle,
        text: String,
        keyboard: Option<Keyboard>,
    },
    Acked {
        alert: Option<String>,
    },
}

/// Transport double that records everything the core tries to deliver and
/// can be told to fail edits and/or sends.
pub struct RecordingTransport {
    outbound: Mutex<Vec<Outbound>>,
    pub fail_edit: AtomicBool,
    pub fail_send: AtomicBool,
    next_id: AtomicI64,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self {
            outbound: Mutex::new(Vec::new()),
            fail_edit: AtomicBool::new(false),
            fail_send: AtomicBool::new(false),
            next_id: AtomicI64::new(1),
        }
    }

    pub async fn outbound(&self) -> Vec<Outbound> {
        self.outbound.lock().await.clone()
    }

    /// Text of the most recent sent or edited message.
    pub async fn last_text(&self) -> Option<String> {
        self.outbound
            .lock()
            .await
            .iter()
            .rev()
            .find_map(|o| match o {
                Outbound::Sent { text, .. } | Outbound::Edited { text, .. } => Some(text.clone()),
                Outbound::Acked { .. } => None,
            })
    }

    pub async fn last_keyboard(&self) -> Option<Keyboard> {
        self.outbound
            .lock()
            .await
            .iter()
            .rev()
            .find_map(|o| match o {
                Outbound::Sent { keyboard, .. } | Outbound::Edited { keyboard, .. } => {
                    keyboard.clone()
                }
                Outbound::Acked { .. } => None,
            })
    }

    pub async fn alerts(&self) -> Vec<String> {
        self.outbound
            .lock()
            .await
            .iter()
            .filter_map(|o| match o {
                Outbound::Acked { alert: Some(a) } => Some(a.clone()),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn send_message(
        &self,
        user_id: &str,
        text: &str,
        keyboard: Option<Keyboard>,
    ) -> Result<MessageHandle> {
        if self.fail_send.load(Ordering::SeqCst) {
            return Err(CampusBotError::Transport("send refused".to_string()));
        }
        self.outbound.lock().await.push(Outbound::Sent {
            user_id: user_id.to_string(),
            text: text.to_string(),
            keyboard,
        });
        Ok(MessageHandle(self.next_id.fetch_add(1, Ordering::SeqCst)))
    }

    async fn edit_message(
        &self,
        message: &MessageHandle,
        text: &str,
        keyboard: Option<Keyboard>,
    ) -> Result<()> {
        if self.fail_edit.load(Ordering::SeqCst) {
            return Err(CampusBotError::Transport("edit refused".to_string()));
        }
        self.outbound.lock().await.push(Outbound::Edited {
            message: message.clone(),
            text: text.to_string(),
            keyboard,
        });
        Ok(())
    }

    async fn ack_button(&self, _message: &MessageHandle, alert: Option<&str>) -> Result<()> {
        self.outbound.lock().await.push(Outbound::Acked {
            alert: alert.map(str::to_string),
        });
        Ok(())
    }
}

/// A bot wired to an in-memory store and a recording transport, with both
/// collaborators exposed for assertions.
pub fn test_rig() -> (CampusBot, Arc<InMemoryRecordStore>, Arc<RecordingTransport>) {
    let store = Arc::new(InMemoryRecordStore::new());
    let transport = Arc::new(RecordingTransport::new());
    let bot = CampusBot::new(Config::default(), store.clone(), transport.clone());
    (bot, store, transport)
}
