use serde::{Deserialize, Serialize};

/// Opaque handle to a previously delivered chat message, as assigned by the
/// transport. Needed to edit a message in place or acknowledge the button
/// press that came from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageHandle(pub i64);

/// One inbound event from the chat transport. Each event is processed to
/// completion before the next one is taken.
#[derive(Debug, Clone)]
pub enum ChatEvent {
    /// Freeform text message.
    Text { user_id: String, text: String },
    /// Inline button press carrying the button's callback payload and the
    /// handle of the message the keyboard was attached to.
    ButtonPress {
        user_id: String,
        payload: String,
        message: MessageHandle,
    },
    /// Slash-command, name without the leading slash.
    Command {
        user_id: String,
        name: String,
        first_name: Option<String>,
    },
}

impl ChatEvent {
    pub fn user_id(&self) -> &str {
        match self {
            ChatEvent::Text { user_id, .. }
            | ChatEvent::ButtonPress { user_id, .. }
            | ChatEvent::Command { user_id, .. } => user_id,
        }
    }
}
