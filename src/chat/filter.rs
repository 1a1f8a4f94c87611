use async_trait::async_trait;
use thiserror::Error;

use super::models::{BotAction, ChatCommand, ChatMessage};
use crate::storage::StorageError;

/// Errors that can occur while a filter handles an event
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// A component that may claim inbound chat events
///
/// `Ok(None)` means the event is not for this filter. `Ok(Some(actions))`
/// claims it, possibly with no visible actions.
#[async_trait]
pub trait MessageFilter: Send + Sync {
    async fn on_message(
        &self,
        message: &ChatMessage,
    ) -> Result<Option<Vec<BotAction>>, FilterError>;

    async fn on_command(
        &self,
        _command: &ChatCommand,
    ) -> Result<Option<Vec<BotAction>>, FilterError> {
        Ok(None)
    }

    /// Get a human-readable name for this filter (for logging/debugging)
    fn name(&self) -> &'static str;
}
