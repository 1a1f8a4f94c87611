use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::{
    models::{CountingRules, GuessResult, LeaderboardView, LoserView, Outcome},
    repository::{CountingRepository, LEADERBOARD_SIZE},
};
use crate::storage::StorageError;

/// Service for the counting game: guess evaluation and the read-side leaderboard
pub struct CountingService {
    repository: Arc<dyn CountingRepository>,
    rules: CountingRules,
}

impl CountingService {
    pub fn new(repository: Arc<dyn CountingRepository>, rules: CountingRules) -> Self {
        Self { repository, rules }
    }

    /// Evaluates a canonical guess against the tenant's counter.
    ///
    /// On error nothing was written and the guess may be retried.
    #[instrument(skip(self))]
    pub async fn evaluate_guess(
        &self,
        tenant: &str,
        participant: &str,
        guess: &str,
    ) -> Result<GuessResult, StorageError> {
        let result = self
            .repository
            .apply_guess(tenant, participant, guess, &self.rules)
            .await?;

        match result.outcome {
            Outcome::Record => info!(
                tenant = %tenant,
                participant = %participant,
                count = result.current_count(),
                "New high score"
            ),
            Outcome::Loss => info!(
                tenant = %tenant,
                participant = %participant,
                previous_count = result.previous_count,
                "Count ruined"
            ),
            Outcome::Bump | Outcome::Ignore => debug!(
                tenant = %tenant,
                participant = %participant,
                outcome = %result.outcome,
                previous_count = result.previous_count,
                "Guess evaluated"
            ),
        }

        Ok(result)
    }

    #[instrument(skip(self))]
    pub async fn build_leaderboard(&self, tenant: &str) -> Result<LeaderboardView, StorageError> {
        self.repository.leaderboard(tenant, LEADERBOARD_SIZE).await
    }

    /// Pairs a Loss at `previous_count` with the current leaderboard
    #[instrument(skip(self))]
    pub async fn build_loser_view(
        &self,
        tenant: &str,
        participant: &str,
        previous_count: u64,
    ) -> Result<LoserView, StorageError> {
        let leaderboard = self.build_leaderboard(tenant).await?;
        Ok(LoserView {
            participant: participant.to_string(),
            previous_count,
            leaderboard,
        })
    }
}
