//! Test assertion helpers - fluent API for verifying dispatch outcomes
#![allow(dead_code)] // Test utilities may not all be used in every test

use squawk::{BotAction, DispatchOutcome};

// ============================================================================
// Assertion Helpers
// ============================================================================

pub struct OutcomeAssertion {
    outcome: DispatchOutcome,
}

impl OutcomeAssertion {
    pub fn of(outcome: DispatchOutcome) -> Self {
        Self { outcome }
    }

    pub fn handled(self) -> Self {
        assert!(self.outcome.handled, "event should have been handled");
        self
    }

    pub fn unhandled(self) {
        assert!(!self.outcome.handled, "event should not have been handled");
        assert!(
            self.outcome.actions.is_empty(),
            "unhandled event produced actions: {:?}",
            self.outcome.actions
        );
    }

    pub fn no_actions(self) -> Self {
        assert!(
            self.outcome.actions.is_empty(),
            "expected no actions, got {:?}",
            self.outcome.actions
        );
        self
    }

    /// Asserts the exact emoji reactions, in order
    pub fn reacted_with(self, expected: &[&str]) -> Self {
        let emojis: Vec<&str> = self
            .outcome
            .actions
            .iter()
            .filter_map(|action| match action {
                BotAction::React { emoji, .. } => Some(emoji.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(emojis, expected, "wrong reactions");
        self
    }

    pub fn reply(&self) -> String {
        self.outcome
            .actions
            .iter()
            .find_map(|action| match action {
                BotAction::Reply { content } => Some(content.clone()),
                _ => None,
            })
            .unwrap_or_else(|| panic!("expected a reply in {:?}", self.outcome.actions))
    }

    pub fn replied_with(self, expected: &str) -> Self {
        assert_eq!(self.reply(), expected);
        self
    }

    pub fn no_reply(self) -> Self {
        assert!(
            !self
                .outcome
                .actions
                .iter()
                .any(|action| matches!(action, BotAction::Reply { .. })),
            "unexpected reply in {:?}",
            self.outcome.actions
        );
        self
    }

    pub fn sent(self, channel: &str, content: &str) -> Self {
        assert!(
            self.outcome.actions.contains(&BotAction::Send {
                channel: channel.to_string(),
                content: content.to_string(),
            }),
            "expected `{}` in #{}, got {:?}",
            content,
            channel,
            self.outcome.actions
        );
        self
    }
}
