use serde::{Deserialize, Serialize};

use crate::render::Reaction;

/// Inbound chat message as delivered by the gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub tenant: String,
    pub channel: String,
    pub author: String,
    pub content: String,
    /// Set when the bot itself posted the message
    #[serde(default)]
    pub from_self: bool,
}

impl ChatMessage {
    pub fn new(tenant: &str, channel: &str, author: &str, content: &str) -> Self {
        Self {
            tenant: tenant.to_string(),
            channel: channel.to_string(),
            author: author.to_string(),
            content: content.to_string(),
            from_self: false,
        }
    }
}

/// Inbound slash command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCommand {
    pub tenant: String,
    pub channel: String,
    pub name: String,
}

/// Something the gateway should do on the bot's behalf
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BotAction {
    /// React to the triggering message
    React { reaction: Reaction, emoji: String },
    /// Reply to the triggering message or command
    Reply { content: String },
    /// Post to a channel
    Send { channel: String, content: String },
}

impl BotAction {
    pub fn react(reaction: Reaction) -> Self {
        BotAction::React {
            reaction,
            emoji: reaction.emoji().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchOutcome {
    /// Whether any filter claimed the event
    pub handled: bool,
    pub actions: Vec<BotAction>,
}
