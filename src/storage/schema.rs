use sqlx::PgPool;
use tracing::{info, instrument};

use super::StorageError;

/// Advisory lock namespace taken by counting transactions.
pub const COUNTING_LOCK_NAMESPACE: i32 = 1;
/// Advisory lock namespace taken by phrase-scoring transactions.
pub const PHRASE_LOCK_NAMESPACE: i32 = 2;

/// Serializes transactions for one tenant within a namespace until commit or rollback.
pub const TENANT_LOCK_SQL: &str = "SELECT pg_advisory_xact_lock($1, hashtext($2))";

pub const CREATE_TABLES: [&str; 4] = [
    "CREATE TABLE IF NOT EXISTS counter_state (
        tenant TEXT NOT NULL PRIMARY KEY,
        count BIGINT NOT NULL,
        last_contributor TEXT
    )",
    "CREATE TABLE IF NOT EXISTS participant_stats (
        tenant TEXT NOT NULL,
        participant TEXT NOT NULL,
        bumps BIGINT NOT NULL,
        losses BIGINT NOT NULL,
        PRIMARY KEY (tenant, participant)
    )",
    "CREATE TABLE IF NOT EXISTS high_score (
        tenant TEXT NOT NULL PRIMARY KEY,
        value BIGINT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS phrase_score (
        tenant TEXT NOT NULL,
        participant TEXT NOT NULL,
        score BIGINT NOT NULL,
        PRIMARY KEY (tenant, participant)
    )",
];

/// Creates the engine-owned tables if they do not exist yet.
#[instrument(skip(pool))]
pub async fn ensure_schema(pool: &PgPool) -> Result<(), StorageError> {
    for statement in CREATE_TABLES {
        sqlx::query(statement).execute(pool).await?;
    }

    info!(tables = CREATE_TABLES.len(), "Database schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_namespaces_differ() {
        assert_ne!(COUNTING_LOCK_NAMESPACE, PHRASE_LOCK_NAMESPACE);
    }

    #[test]
    fn every_table_is_created_idempotently() {
        for statement in CREATE_TABLES {
            assert!(statement.starts_with("CREATE TABLE IF NOT EXISTS"));
        }
    }
}
