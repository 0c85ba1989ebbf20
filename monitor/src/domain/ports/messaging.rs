//! Message delivery port trait
//!
//! The host bot registry: resolve a bot session by platform and account,
//! then deliver a message to a group.

use async_trait::async_trait;

use crate::domain::entities::BotKey;
use crate::error::SendError;

/// Port trait for delivering rendered messages.
///
/// Messages are plain text with inline `<img src="..."/>` and
/// `<at id="all"/>` markup.
#[async_trait]
pub trait MessageSink: Send + Sync {
    /// Send `message` to `group_id` through the bot registered under `bot`
    async fn send(&self, bot: &BotKey, group_id: &str, message: &str) -> Result<(), SendError>;
}
