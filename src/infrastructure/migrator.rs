// src/infrastructure/migrator.rs
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use sqlx::{PgConnection, PgPool, Postgres, Transaction};

use super::repositories::{PostgresCategoryStore, map_sqlx};
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::migrations::Migration;
use crate::application::ports::time::Clock;
use crate::domain::category::MigrationVersion;
use crate::domain::errors::DomainResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationOutcome {
    Applied,
    Reverted,
    AlreadyApplied,
    NotApplied,
}

/// Runs migrations inside a single transaction each, recording applied
/// versions in `schema_migrations` so that every version runs at most once.
pub struct PostgresMigrator {
    pool: PgPool,
    clock: Arc<dyn Clock>,
    lock_timeout: Duration,
}

impl PostgresMigrator {
    #[must_use]
    pub const fn new(pool: PgPool, clock: Arc<dyn Clock>, lock_timeout: Duration) -> Self {
        Self {
            pool,
            clock,
            lock_timeout,
        }
    }

    /// Applies `migration` unless its version is already recorded.
    ///
    /// # Errors
    ///
    /// Returns the migration's own error after rolling back, or the storage
    /// error that prevented the transaction from opening or committing.
    pub async fn up(&self, migration: &dyn Migration) -> ApplicationResult<MigrationOutcome> {
        let version = migration.version();
        let mut tx = self.begin(version).await?;

        if version_recorded(&mut tx, version).await? {
            tracing::info!(%version, name = migration.name(), "migration already applied");
            tx.rollback().await.map_err(map_sqlx)?;
            return Ok(MigrationOutcome::AlreadyApplied);
        }

        tracing::info!(%version, name = migration.name(), "applying migration");
        let result = {
            let mut store = PostgresCategoryStore::new(&mut tx);
            migration.up(&mut store).await
        };
        if let Err(err) = result {
            tracing::error!(%version, error = %err, "migration failed, rolling back");
            return Err(roll_back(tx.rollback(), version, err).await);
        }

        sqlx::query("INSERT INTO schema_migrations (version, name, applied_at) VALUES ($1, $2, $3)")
            .bind(version.as_i64())
            .bind(migration.name())
            .bind(self.clock.now())
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        tx.commit().await.map_err(map_sqlx)?;
        Ok(MigrationOutcome::Applied)
    }

    /// Reverts `migration` when its version is recorded.
    ///
    /// # Errors
    ///
    /// Same as [`PostgresMigrator::up`].
    pub async fn down(&self, migration: &dyn Migration) -> ApplicationResult<MigrationOutcome> {
        let version = migration.version();
        let mut tx = self.begin(version).await?;

        if !version_recorded(&mut tx, version).await? {
            tracing::info!(%version, name = migration.name(), "migration not applied, nothing to revert");
            tx.rollback().await.map_err(map_sqlx)?;
            return Ok(MigrationOutcome::NotApplied);
        }

        tracing::info!(%version, name = migration.name(), "reverting migration");
        let result = {
            let mut store = PostgresCategoryStore::new(&mut tx);
            migration.down(&mut store).await
        };
        if let Err(err) = result {
            tracing::error!(%version, error = %err, "revert failed, rolling back");
            return Err(roll_back(tx.rollback(), version, err).await);
        }

        sqlx::query("DELETE FROM schema_migrations WHERE version = $1")
            .bind(version.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        tx.commit().await.map_err(map_sqlx)?;
        Ok(MigrationOutcome::Reverted)
    }

    /// Opens the transaction, bounds lock waits and serialises concurrent
    /// runners of the same version behind an advisory lock.
    async fn begin(&self, version: MigrationVersion) -> DomainResult<Transaction<'static, Postgres>> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let timeout_ms = self.lock_timeout.as_millis();
        sqlx::query(&format!("SET LOCAL lock_timeout = '{timeout_ms}ms'"))
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(version.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        ensure_ledger(&mut tx).await?;
        Ok(tx)
    }
}

/// Awaits the rollback and hands back the error that caused it; a failing
/// rollback is only logged.
async fn roll_back(
    rollback: impl Future<Output = Result<(), sqlx::Error>> + Send,
    version: MigrationVersion,
    err: ApplicationError,
) -> ApplicationError {
    if let Err(rollback_err) = rollback.await {
        tracing::error!(%version, error = %rollback_err, "rollback failed");
    }
    err
}

async fn ensure_ledger(conn: &mut PgConnection) -> DomainResult<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
             version BIGINT PRIMARY KEY,
             name TEXT NOT NULL,
             applied_at TIMESTAMPTZ NOT NULL
         )",
    )
    .execute(&mut *conn)
    .await
    .map_err(map_sqlx)?;
    Ok(())
}

async fn version_recorded(conn: &mut PgConnection, version: MigrationVersion) -> DomainResult<bool> {
    let found: Option<i64> =
        sqlx::query_scalar("SELECT version FROM schema_migrations WHERE version = $1")
            .bind(version.as_i64())
            .fetch_optional(&mut *conn)
            .await
            .map_err(map_sqlx)?;
    Ok(found.is_some())
}
