use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error, info};

use super::{
    filter::{FilterError, MessageFilter},
    models::{BotAction, ChatCommand, ChatMessage},
    registry::ChannelRegistry,
};
use crate::{
    counting::{CountingService, Outcome},
    evaluator::GuessEvaluator,
    identity::{display_names, DisplayResolver},
    render,
};

pub const LEADERBOARD_COMMAND: &str = "leaderboard";

/// Plays the counting game in each tenant's counting channel
pub struct CountingFilter {
    counting: Arc<CountingService>,
    evaluator: Arc<dyn GuessEvaluator>,
    resolver: Arc<dyn DisplayResolver>,
    registry: Arc<ChannelRegistry>,
}

impl CountingFilter {
    pub fn new(
        counting: Arc<CountingService>,
        evaluator: Arc<dyn GuessEvaluator>,
        resolver: Arc<dyn DisplayResolver>,
        registry: Arc<ChannelRegistry>,
    ) -> Self {
        Self {
            counting,
            evaluator,
            resolver,
            registry,
        }
    }

    async fn loser_reply(
        &self,
        tenant: &str,
        participant: &str,
        previous_count: u64,
    ) -> Result<BotAction, FilterError> {
        let view = self
            .counting
            .build_loser_view(tenant, participant, previous_count)
            .await?;
        let mentioned =
            render::mentioned_participants(&view.leaderboard).chain([participant]);
        let names = display_names(self.resolver.as_ref(), tenant, mentioned).await;

        Ok(BotAction::Reply {
            content: render::loser_text(&view, &names),
        })
    }
}

#[async_trait]
impl MessageFilter for CountingFilter {
    async fn on_message(
        &self,
        message: &ChatMessage,
    ) -> Result<Option<Vec<BotAction>>, FilterError> {
        if message.from_self || !self.registry.is_counting_channel(&message.tenant, &message.channel)
        {
            return Ok(None);
        }

        debug!(content = %message.content, "Evaluating counting message");
        let guess = match self.evaluator.evaluate(&message.content).await {
            Ok(guess) => guess,
            Err(e) => {
                debug!(error = %e, "No guess produced, dropping message");
                return Ok(Some(Vec::new()));
            }
        };

        let result = self
            .counting
            .evaluate_guess(&message.tenant, &message.author, &guess)
            .await?;

        let mut actions: Vec<BotAction> = render::reactions_for(&result)
            .into_iter()
            .map(BotAction::react)
            .collect();

        // The guess is committed from here on, so the loser board is best-effort
        if result.outcome == Outcome::Loss {
            info!(tenant = %message.tenant, author = %message.author, "Loss, posting loser board");
            match self
                .loser_reply(&message.tenant, &message.author, result.previous_count)
                .await
            {
                Ok(reply) => actions.push(reply),
                Err(e) => error!(
                    tenant = %message.tenant,
                    author = %message.author,
                    error = %e,
                    "Failed to build loser board, reacting only"
                ),
            }
        }

        Ok(Some(actions))
    }

    async fn on_command(
        &self,
        command: &ChatCommand,
    ) -> Result<Option<Vec<BotAction>>, FilterError> {
        if command.name != LEADERBOARD_COMMAND
            || !self.registry.is_counting_channel(&command.tenant, &command.channel)
        {
            return Ok(None);
        }

        let view = self.counting.build_leaderboard(&command.tenant).await?;
        let names = display_names(
            self.resolver.as_ref(),
            &command.tenant,
            render::mentioned_participants(&view),
        )
        .await;

        Ok(Some(vec![BotAction::Reply {
            content: render::leaderboard_text(&view, &names),
        }]))
    }

    fn name(&self) -> &'static str {
        "CountingFilter"
    }
}
