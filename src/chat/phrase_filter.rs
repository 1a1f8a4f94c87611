use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

use super::{
    filter::{FilterError, MessageFilter},
    models::{BotAction, ChatMessage},
    registry::ChannelRegistry,
};
use crate::{
    identity::{display_name_or_unknown, DisplayResolver},
    phrase::PhraseService,
    render,
};

/// Scores the trigger phrase anywhere in a tenant and announces the new rank
pub struct PhraseFilter {
    phrase: Arc<PhraseService>,
    resolver: Arc<dyn DisplayResolver>,
    registry: Arc<ChannelRegistry>,
}

impl PhraseFilter {
    pub fn new(
        phrase: Arc<PhraseService>,
        resolver: Arc<dyn DisplayResolver>,
        registry: Arc<ChannelRegistry>,
    ) -> Self {
        Self {
            phrase,
            resolver,
            registry,
        }
    }
}

#[async_trait]
impl MessageFilter for PhraseFilter {
    async fn on_message(
        &self,
        message: &ChatMessage,
    ) -> Result<Option<Vec<BotAction>>, FilterError> {
        if message.from_self || !self.phrase.is_trigger(&message.content) {
            return Ok(None);
        }

        let result = self
            .phrase
            .record_trigger(&message.tenant, &message.author)
            .await?;

        let Some(channel) = self.registry.announcement_channel(&message.tenant) else {
            warn!(tenant = %message.tenant, "No announcement channel, skipping rank message");
            return Ok(Some(Vec::new()));
        };

        let name =
            display_name_or_unknown(self.resolver.as_ref(), &message.tenant, &message.author)
                .await;

        Ok(Some(vec![BotAction::Send {
            channel: channel.to_string(),
            content: render::announcement_text(&name, &result),
        }]))
    }

    fn name(&self) -> &'static str {
        "PhraseFilter"
    }
}
