use async_trait::async_trait;

use crate::domains::event::MessageHandle;
use crate::domains::keyboard::Keyboard;
use crate::error::Result;

/// Outbound side of the chat collaborator. The core only supplies text and
/// the logical button grid; delivery, rendering and session lifecycle live
/// behind this seam.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send_message(
        &self,
        user_id: &str,
        text: &str,
        keyboard: Option<Keyboard>,
    ) -> Result<MessageHandle>;

    async fn edit_message(
        &self,
        message: &MessageHandle,
        text: &str,
        keyboard: Option<Keyboard>,
    ) -> Result<()>;

    /// Acknowledges a button press, optionally with an alert popup.
    async fn ack_button(&self, message: &MessageHandle, alert: Option<&str>) -> Result<()>;
}
