//! Liveness check for the authoritative score database.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::{Pool, Postgres};

/// PostgreSQL side of /health. The Redis side is covered by the
/// destination store's own health check.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatusRepo: Send + Sync {
    /// Round-trips a query against the score schema, so an unmigrated
    /// database reports unhealthy too.
    async fn health_check(&self) -> Result<bool>;
}

/// PostgreSQL implementation of StatusRepo.
#[derive(Clone)]
pub struct PgStatusRepo {
    pool: Pool<Postgres>,
}

impl PgStatusRepo {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatusRepo for PgStatusRepo {
    async fn health_check(&self) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT count(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count >= 0)
    }
}
