use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Row, Transaction};
use std::collections::HashMap;
use tracing::{debug, error, info, instrument, warn};

use super::models::RankResult;
use crate::storage::{bigint, column_u64, schema, StorageError, TenantCells};

/// Trait for phrase score repository operations
#[async_trait]
pub trait PhraseRepository: Send + Sync {
    /// Atomically adds one point for `participant` and ranks the new score
    async fn record_trigger(
        &self,
        tenant: &str,
        participant: &str,
    ) -> Result<RankResult, StorageError>;

    async fn score(&self, tenant: &str, participant: &str) -> Result<u64, StorageError>;
}

/// In-memory implementation of PhraseRepository for development and testing
#[derive(Default)]
pub struct InMemoryPhraseRepository {
    tenants: TenantCells<HashMap<String, u64>>,
}

impl InMemoryPhraseRepository {
    pub fn new() -> Self {
        Self {
            tenants: TenantCells::new(),
        }
    }

    /// Seeds scores for a tenant
    pub async fn with_scores(self, tenant: &str, scores: &[(&str, u64)]) -> Self {
        {
            let cell = self.tenants.cell(tenant).await;
            let mut rows = cell.lock().await;
            for (participant, score) in scores {
                rows.insert(participant.to_string(), *score);
            }
        }
        self
    }
}

fn ahead_of(scores: &HashMap<String, u64>, score: u64) -> u64 {
    scores.values().filter(|s| **s > score).count() as u64
}

#[async_trait]
impl PhraseRepository for InMemoryPhraseRepository {
    #[instrument(skip(self))]
    async fn record_trigger(
        &self,
        tenant: &str,
        participant: &str,
    ) -> Result<RankResult, StorageError> {
        let cell = self.tenants.cell(tenant).await;
        let mut scores = cell.lock().await;

        let old_score = scores.get(participant).copied().unwrap_or(0);
        let old_rank = (old_score > 0).then(|| ahead_of(&scores, old_score));

        let score = old_score.checked_add(1).ok_or_else(|| {
            StorageError::Corrupt(format!("phrase_score.score {} cannot grow", old_score))
        })?;
        scores.insert(participant.to_string(), score);

        let new_rank = ahead_of(&scores, score);
        let holders = scores.values().filter(|s| **s == score).count() as u64;

        debug!(old_score, ?old_rank, score, new_rank, holders, "Trigger recorded in memory");
        Ok(RankResult::from_ranks(score, old_rank, new_rank, holders))
    }

    async fn score(&self, tenant: &str, participant: &str) -> Result<u64, StorageError> {
        match self.tenants.existing(tenant).await {
            Some(cell) => Ok(cell.lock().await.get(participant).copied().unwrap_or(0)),
            None => Ok(0),
        }
    }
}

/// PostgreSQL implementation of phrase score repository
pub struct PostgresPhraseRepository {
    pool: PgPool,
}

impl PostgresPhraseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn count_where(
        tx: &mut Transaction<'_, Postgres>,
        tenant: &str,
        comparison: &str,
        score: u64,
    ) -> Result<u64, StorageError> {
        // `comparison` is one of two fixed operators, never user input
        let sql = format!(
            "SELECT COUNT(*) AS total FROM phrase_score WHERE tenant = $1 AND score {comparison} $2"
        );
        let row = sqlx::query(&sql)
            .bind(tenant)
            .bind(bigint(score)?)
            .fetch_one(&mut **tx)
            .await?;

        column_u64(row.try_get("total")?, "COUNT(*)")
    }

    async fn rank_trigger(
        tx: &mut Transaction<'_, Postgres>,
        tenant: &str,
        participant: &str,
    ) -> Result<RankResult, StorageError> {
        let old_score = match sqlx::query(
            "SELECT score FROM phrase_score WHERE tenant = $1 AND participant = $2",
        )
        .bind(tenant)
        .bind(participant)
        .fetch_optional(&mut **tx)
        .await?
        {
            Some(row) => column_u64(row.try_get("score")?, "phrase_score.score")?,
            None => 0,
        };

        let old_rank = if old_score > 0 {
            Some(Self::count_where(tx, tenant, ">", old_score).await?)
        } else {
            None
        };

        let row = sqlx::query(
            "INSERT INTO phrase_score (tenant, participant, score) VALUES ($1, $2, 1) \
             ON CONFLICT (tenant, participant) DO UPDATE SET score = phrase_score.score + 1 \
             RETURNING score",
        )
        .bind(tenant)
        .bind(participant)
        .fetch_one(&mut **tx)
        .await?;
        let score = column_u64(row.try_get("score")?, "phrase_score.score")?;

        let new_rank = Self::count_where(tx, tenant, ">", score).await?;
        let holders = Self::count_where(tx, tenant, "=", score).await?;

        debug!(old_score, ?old_rank, score, new_rank, holders, "Trigger ranked in database");
        Ok(RankResult::from_ranks(score, old_rank, new_rank, holders))
    }
}

#[async_trait]
impl PhraseRepository for PostgresPhraseRepository {
    #[instrument(skip(self))]
    async fn record_trigger(
        &self,
        tenant: &str,
        participant: &str,
    ) -> Result<RankResult, StorageError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(schema::TENANT_LOCK_SQL)
            .bind(schema::PHRASE_LOCK_NAMESPACE)
            .bind(tenant)
            .execute(&mut *tx)
            .await?;

        let result = match Self::rank_trigger(&mut tx, tenant, participant).await {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "Failed to record trigger, rolling back");
                if let Err(rollback) = tx.rollback().await {
                    error!(error = %rollback, "Rollback failed, dropping transaction");
                }
                return Err(e);
            }
        };

        tx.commit().await?;

        info!(score = result.score, place = result.place, "Trigger committed");
        Ok(result)
    }

    #[instrument(skip(self))]
    async fn score(&self, tenant: &str, participant: &str) -> Result<u64, StorageError> {
        let row = sqlx::query("SELECT score FROM phrase_score WHERE tenant = $1 AND participant = $2")
            .bind(tenant)
            .bind(participant)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => column_u64(row.try_get("score")?, "phrase_score.score"),
            None => Ok(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phrase::models::Standing;

    #[tokio::test]
    async fn first_trigger_takes_the_lead() {
        let repo = InMemoryPhraseRepository::new();

        let result = repo.record_trigger("g", "alice").await.unwrap();

        assert_eq!(
            result,
            RankResult {
                score: 1,
                place: 1,
                moved: true,
                tied: false
            }
        );
        assert_eq!(repo.score("g", "alice").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn catching_up_moves_into_a_tie() {
        let repo = InMemoryPhraseRepository::new()
            .with_scores("g", &[("alice", 2), ("bob", 1)])
            .await;

        let result = repo.record_trigger("g", "bob").await.unwrap();

        assert_eq!(result.score, 2);
        assert_eq!(result.place, 1);
        assert!(result.moved);
        assert!(result.tied);
    }

    #[tokio::test]
    async fn staying_behind_the_leader_is_in_place() {
        let repo = InMemoryPhraseRepository::new()
            .with_scores("g", &[("alice", 10), ("bob", 3), ("carol", 1)])
            .await;

        let result = repo.record_trigger("g", "bob").await.unwrap();

        assert_eq!(result.score, 4);
        assert_eq!(result.place, 2);
        assert_eq!(result.standing(), Standing::IsIn);
    }

    #[tokio::test]
    async fn climbing_a_place_reports_took() {
        let repo = InMemoryPhraseRepository::new()
            .with_scores("g", &[("alice", 10), ("bob", 3), ("carol", 4)])
            .await;

        let result = repo.record_trigger("g", "bob").await.unwrap();

        assert_eq!(result.place, 2);
        assert!(result.moved);
        assert!(result.tied);
        assert_eq!(result.standing(), Standing::Took);
    }

    #[tokio::test]
    async fn other_tenants_do_not_affect_rank() {
        let repo = InMemoryPhraseRepository::new()
            .with_scores("other", &[("zed", 50)])
            .await;

        let result = repo.record_trigger("g", "alice").await.unwrap();

        assert_eq!(result.place, 1);
        assert_eq!(repo.score("g", "zed").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn score_rises_by_one_and_place_never_worsens() {
        let repo = InMemoryPhraseRepository::new()
            .with_scores("g", &[("alice", 5), ("bob", 3)])
            .await;

        let mut last_place = u64::MAX;
        for expected in 1..=7 {
            let result = repo.record_trigger("g", "carol").await.unwrap();
            assert_eq!(result.score, expected);
            assert!(result.place <= last_place);
            last_place = result.place;
        }
        assert_eq!(last_place, 1);
    }

    #[tokio::test]
    async fn maxed_out_score_is_reported_not_wrapped() {
        let repo = InMemoryPhraseRepository::new()
            .with_scores("g", &[("alice", u64::MAX)])
            .await;

        let result = repo.record_trigger("g", "alice").await;

        assert!(matches!(result, Err(StorageError::Corrupt(_))));
        assert_eq!(repo.score("g", "alice").await.unwrap(), u64::MAX);
    }
}
