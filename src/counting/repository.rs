use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Row, Transaction};
use std::collections::HashMap;
use tracing::{debug, error, info, instrument, warn};

use super::{
    engine,
    models::{
        CounterSnapshot, CounterState, CountingRules, GuessResult, LeaderboardEntry,
        LeaderboardView, Outcome, ParticipantStats,
    },
};
use crate::storage::{bigint, column_u64, schema, StorageError, TenantCells};

/// Number of rows in each leaderboard column
pub const LEADERBOARD_SIZE: usize = 10;

/// Trait for counting repository operations
///
/// Both operations run as one unit against the store: `apply_guess` reads the
/// counter, decides the outcome and writes every affected row before anything
/// becomes visible, and `leaderboard` reads all of its rows from one snapshot.
#[async_trait]
pub trait CountingRepository: Send + Sync {
    /// Atomically evaluates a canonical guess and applies the resulting transition
    async fn apply_guess(
        &self,
        tenant: &str,
        participant: &str,
        guess: &str,
        rules: &CountingRules,
    ) -> Result<GuessResult, StorageError>;

    /// Reads the top contributors, top losers, count and high score consistently
    async fn leaderboard(&self, tenant: &str, limit: usize)
        -> Result<LeaderboardView, StorageError>;

    async fn counter(&self, tenant: &str) -> Result<CounterState, StorageError>;

    async fn participant_stats(
        &self,
        tenant: &str,
        participant: &str,
    ) -> Result<ParticipantStats, StorageError>;
}

/// Ranks `(participant, value)` pairs by value descending, then participant ascending.
fn top_entries<'a>(
    rows: impl Iterator<Item = (&'a String, u64)>,
    limit: usize,
) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = rows
        .map(|(participant, value)| LeaderboardEntry::new(participant.clone(), value))
        .collect();
    entries.sort_by(|a, b| {
        b.value
            .cmp(&a.value)
            .then_with(|| a.participant.cmp(&b.participant))
    });
    entries.truncate(limit);
    entries
}

#[derive(Debug, Default)]
struct TenantCounting {
    counter: CounterState,
    high_score: u64,
    stats: HashMap<String, ParticipantStats>,
}

/// In-memory implementation of CountingRepository for development and testing
///
/// Each tenant's rows are guarded by their own mutex, held for the whole
/// read-decide-write, which gives the same per-tenant linearization as the
/// database transaction.
#[derive(Default)]
pub struct InMemoryCountingRepository {
    tenants: TenantCells<TenantCounting>,
}

impl InMemoryCountingRepository {
    pub fn new() -> Self {
        Self {
            tenants: TenantCells::new(),
        }
    }

    /// Seeds a tenant's counter and high score (useful for tests and imports)
    pub async fn with_counter(
        self,
        tenant: &str,
        count: u64,
        last_contributor: Option<&str>,
        high_score: u64,
    ) -> Self {
        {
            let cell = self.tenants.cell(tenant).await;
            let mut rows = cell.lock().await;
            rows.counter = CounterState {
                count,
                last_contributor: last_contributor.map(str::to_string),
            };
            rows.high_score = high_score.max(count);
        }
        self
    }

    pub async fn high_score(&self, tenant: &str) -> u64 {
        match self.tenants.existing(tenant).await {
            Some(cell) => cell.lock().await.high_score,
            None => 0,
        }
    }
}

#[async_trait]
impl CountingRepository for InMemoryCountingRepository {
    #[instrument(skip(self, rules))]
    async fn apply_guess(
        &self,
        tenant: &str,
        participant: &str,
        guess: &str,
        rules: &CountingRules,
    ) -> Result<GuessResult, StorageError> {
        let cell = self.tenants.cell(tenant).await;
        let mut rows = cell.lock().await;

        let snapshot = CounterSnapshot {
            counter: rows.counter.clone(),
            high_score: rows.high_score,
        };
        debug!(
            count = snapshot.counter.count,
            last_contributor = ?snapshot.counter.last_contributor,
            high_score = snapshot.high_score,
            "Read counter from memory"
        );

        let result = engine::decide(&snapshot, participant, guess, rules);
        match result.outcome {
            Outcome::Bump | Outcome::Record => {
                let count = result.previous_count + 1;
                rows.counter = CounterState {
                    count,
                    last_contributor: Some(participant.to_string()),
                };
                rows.stats.entry(participant.to_string()).or_default().bumps += 1;
                rows.high_score = rows.high_score.max(count);
            }
            Outcome::Loss => {
                rows.counter = CounterState::default();
                rows.stats.entry(participant.to_string()).or_default().losses += 1;
            }
            Outcome::Ignore => {}
        }

        debug!(outcome = %result.outcome, previous_count = result.previous_count, "Guess applied in memory");
        Ok(result)
    }

    #[instrument(skip(self))]
    async fn leaderboard(
        &self,
        tenant: &str,
        limit: usize,
    ) -> Result<LeaderboardView, StorageError> {
        let Some(cell) = self.tenants.existing(tenant).await else {
            debug!(tenant = %tenant, "No counting rows in memory");
            return Ok(LeaderboardView::default());
        };
        let rows = cell.lock().await;

        Ok(LeaderboardView {
            top_contributors: top_entries(
                rows.stats.iter().map(|(p, s)| (p, s.bumps)),
                limit,
            ),
            top_losers: top_entries(rows.stats.iter().map(|(p, s)| (p, s.losses)), limit),
            count: rows.counter.count,
            high_score: rows.high_score,
        })
    }

    async fn counter(&self, tenant: &str) -> Result<CounterState, StorageError> {
        match self.tenants.existing(tenant).await {
            Some(cell) => Ok(cell.lock().await.counter.clone()),
            None => Ok(CounterState::default()),
        }
    }

    async fn participant_stats(
        &self,
        tenant: &str,
        participant: &str,
    ) -> Result<ParticipantStats, StorageError> {
        match self.tenants.existing(tenant).await {
            Some(cell) => Ok(cell
                .lock()
                .await
                .stats
                .get(participant)
                .copied()
                .unwrap_or_default()),
            None => Ok(ParticipantStats::default()),
        }
    }
}

/// PostgreSQL implementation of counting repository
pub struct PostgresCountingRepository {
    pool: PgPool,
}

impl PostgresCountingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn read_snapshot(
        tx: &mut Transaction<'_, Postgres>,
        tenant: &str,
    ) -> Result<CounterSnapshot, StorageError> {
        let counter = sqlx::query(
            "SELECT count, last_contributor FROM counter_state WHERE tenant = $1",
        )
        .bind(tenant)
        .fetch_optional(&mut **tx)
        .await?;

        let counter = match counter {
            Some(row) => CounterState {
                count: column_u64(row.try_get("count")?, "counter_state.count")?,
                last_contributor: row.try_get("last_contributor")?,
            },
            None => CounterState::default(),
        };

        let high_score = Self::read_high_score(tx, tenant).await?;

        Ok(CounterSnapshot {
            counter,
            high_score,
        })
    }

    async fn read_high_score(
        tx: &mut Transaction<'_, Postgres>,
        tenant: &str,
    ) -> Result<u64, StorageError> {
        let row = sqlx::query("SELECT value FROM high_score WHERE tenant = $1")
            .bind(tenant)
            .fetch_optional(&mut **tx)
            .await?;

        match row {
            Some(row) => column_u64(row.try_get("value")?, "high_score.value"),
            None => Ok(0),
        }
    }

    async fn read_top(
        tx: &mut Transaction<'_, Postgres>,
        tenant: &str,
        column: &str,
        limit: usize,
    ) -> Result<Vec<LeaderboardEntry>, StorageError> {
        // `column` is one of two fixed identifiers, never user input
        let sql = format!(
            "SELECT participant, {column} AS value FROM participant_stats \
             WHERE tenant = $1 ORDER BY {column} DESC, participant ASC LIMIT $2"
        );
        let rows = sqlx::query(&sql)
            .bind(tenant)
            .bind(bigint(limit as u64)?)
            .fetch_all(&mut **tx)
            .await?;

        rows.into_iter()
            .map(|row| {
                Ok(LeaderboardEntry::new(
                    row.try_get::<String, _>("participant")?,
                    column_u64(row.try_get("value")?, column)?,
                ))
            })
            .collect()
    }

    async fn write_transition(
        tx: &mut Transaction<'_, Postgres>,
        tenant: &str,
        participant: &str,
        result: &GuessResult,
    ) -> Result<(), StorageError> {
        match result.outcome {
            Outcome::Bump | Outcome::Record => {
                let count = bigint(result.previous_count + 1)?;

                sqlx::query(
                    "INSERT INTO counter_state (tenant, count, last_contributor) VALUES ($1, $2, $3) \
                     ON CONFLICT (tenant) DO UPDATE SET count = $2, last_contributor = $3",
                )
                .bind(tenant)
                .bind(count)
                .bind(participant)
                .execute(&mut **tx)
                .await?;

                sqlx::query(
                    "INSERT INTO participant_stats (tenant, participant, bumps, losses) VALUES ($1, $2, 1, 0) \
                     ON CONFLICT (tenant, participant) DO UPDATE SET bumps = participant_stats.bumps + 1",
                )
                .bind(tenant)
                .bind(participant)
                .execute(&mut **tx)
                .await?;

                sqlx::query(
                    "INSERT INTO high_score (tenant, value) VALUES ($1, $2) \
                     ON CONFLICT (tenant) DO UPDATE SET value = GREATEST(high_score.value, $2)",
                )
                .bind(tenant)
                .bind(count)
                .execute(&mut **tx)
                .await?;
            }
            Outcome::Loss => {
                sqlx::query(
                    "INSERT INTO counter_state (tenant, count, last_contributor) VALUES ($1, 0, NULL) \
                     ON CONFLICT (tenant) DO UPDATE SET count = 0, last_contributor = NULL",
                )
                .bind(tenant)
                .execute(&mut **tx)
                .await?;

                sqlx::query(
                    "INSERT INTO participant_stats (tenant, participant, bumps, losses) VALUES ($1, $2, 0, 1) \
                     ON CONFLICT (tenant, participant) DO UPDATE SET losses = participant_stats.losses + 1",
                )
                .bind(tenant)
                .bind(participant)
                .execute(&mut **tx)
                .await?;
            }
            Outcome::Ignore => {}
        }

        Ok(())
    }
}

#[async_trait]
impl CountingRepository for PostgresCountingRepository {
    #[instrument(skip(self, rules))]
    async fn apply_guess(
        &self,
        tenant: &str,
        participant: &str,
        guess: &str,
        rules: &CountingRules,
    ) -> Result<GuessResult, StorageError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(schema::TENANT_LOCK_SQL)
            .bind(schema::COUNTING_LOCK_NAMESPACE)
            .bind(tenant)
            .execute(&mut *tx)
            .await?;

        let snapshot = Self::read_snapshot(&mut tx, tenant).await?;
        debug!(
            count = snapshot.counter.count,
            last_contributor = ?snapshot.counter.last_contributor,
            high_score = snapshot.high_score,
            "Read counter from database"
        );

        let result = engine::decide(&snapshot, participant, guess, rules);

        if let Err(e) = Self::write_transition(&mut tx, tenant, participant, &result).await {
            warn!(error = %e, outcome = %result.outcome, "Failed to write guess transition, rolling back");
            if let Err(rollback) = tx.rollback().await {
                error!(error = %rollback, "Rollback failed, dropping transaction");
            }
            return Err(e);
        }

        tx.commit().await.map_err(|e| {
            warn!(error = %e, "Failed to commit guess transition");
            StorageError::Database(e)
        })?;

        info!(outcome = %result.outcome, previous_count = result.previous_count, "Guess committed");
        Ok(result)
    }

    #[instrument(skip(self))]
    async fn leaderboard(
        &self,
        tenant: &str,
        limit: usize,
    ) -> Result<LeaderboardView, StorageError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let top_contributors = Self::read_top(&mut tx, tenant, "bumps", limit).await?;
        let top_losers = Self::read_top(&mut tx, tenant, "losses", limit).await?;
        let snapshot = Self::read_snapshot(&mut tx, tenant).await?;

        tx.commit().await?;

        debug!(
            contributors = top_contributors.len(),
            losers = top_losers.len(),
            "Leaderboard read from database"
        );

        Ok(LeaderboardView {
            top_contributors,
            top_losers,
            count: snapshot.counter.count,
            high_score: snapshot.high_score,
        })
    }

    #[instrument(skip(self))]
    async fn counter(&self, tenant: &str) -> Result<CounterState, StorageError> {
        let mut tx = self.pool.begin().await?;
        let snapshot = Self::read_snapshot(&mut tx, tenant).await?;
        tx.commit().await?;
        Ok(snapshot.counter)
    }

    #[instrument(skip(self))]
    async fn participant_stats(
        &self,
        tenant: &str,
        participant: &str,
    ) -> Result<ParticipantStats, StorageError> {
        let row = sqlx::query(
            "SELECT bumps, losses FROM participant_stats WHERE tenant = $1 AND participant = $2",
        )
        .bind(tenant)
        .bind(participant)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(ParticipantStats {
                bumps: column_u64(row.try_get("bumps")?, "participant_stats.bumps")?,
                losses: column_u64(row.try_get("losses")?, "participant_stats.losses")?,
            }),
            None => Ok(ParticipantStats::default()),
        }
    }
}
