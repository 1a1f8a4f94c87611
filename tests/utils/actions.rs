//! Test action helpers - simulate chat traffic reaching the dispatcher
#![allow(dead_code)] // Test utilities may not all be used in every test

use squawk::{ChatCommand, ChatMessage, DispatchOutcome};

use super::setup::{TestSetup, COUNTING_CHANNEL, TENANT};

impl TestSetup {
    /// Posts `content` in the counting channel as `author`
    pub async fn count(&self, author: &str, content: &str) -> DispatchOutcome {
        self.say_in(COUNTING_CHANNEL, author, content).await
    }

    pub async fn say_in(&self, channel: &str, author: &str, content: &str) -> DispatchOutcome {
        self.dispatcher
            .dispatch_message(&ChatMessage::new(TENANT, channel, author, content))
            .await
    }

    /// Posts a message that the bot itself authored
    pub async fn echo_from_bot(&self, content: &str) -> DispatchOutcome {
        let mut message = ChatMessage::new(TENANT, COUNTING_CHANNEL, "squawk", content);
        message.from_self = true;
        self.dispatcher.dispatch_message(&message).await
    }

    pub async fn command_in(&self, channel: &str, name: &str) -> DispatchOutcome {
        self.dispatcher
            .dispatch_command(&ChatCommand {
                tenant: TENANT.to_string(),
                channel: channel.to_string(),
                name: name.to_string(),
            })
            .await
    }

    /// Counts 1..=n, alternating between the given participants
    pub async fn count_up_to(&self, n: u64, participants: &[&str]) {
        for i in 1..=n {
            let author = participants[(i as usize - 1) % participants.len()];
            self.count(author, &i.to_string()).await;
        }
    }
}
