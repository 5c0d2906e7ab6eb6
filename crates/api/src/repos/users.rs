//! User score repository for PostgreSQL.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::models::User;

const USER_COLUMNS: &str = "username, correct_answers, incorrect_answers, created_at";

/// Repository for user score operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepo: Send + Sync {
    /// Find a user by username.
    async fn find(&self, username: &str) -> Result<Option<User>>;

    /// Create a zero-score user. Returns `None` when the username is taken;
    /// the existing row is left untouched.
    async fn create(&self, username: &str) -> Result<Option<User>>;

    /// Record an answer inside a transaction: fetch-or-create the row,
    /// increment the matching counter, and return the updated user.
    async fn record_answer(&self, username: &str, correct: bool) -> Result<User>;
}

/// PostgreSQL implementation of UserRepo.
#[derive(Clone)]
pub struct PgUserRepo {
    pool: Pool<Postgres>,
}

impl PgUserRepo {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepo for PgUserRepo {
    async fn find(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn create(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username) VALUES ($1) \
             ON CONFLICT (username) DO NOTHING \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn record_answer(&self, username: &str, correct: bool) -> Result<User> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1 FOR UPDATE"
        ))
        .bind(username)
        .fetch_optional(&mut *tx)
        .await?;

        if existing.is_none() {
            // Lazily create on first answer. ON CONFLICT covers a concurrent
            // insert between the SELECT and here.
            sqlx::query("INSERT INTO users (username) VALUES ($1) ON CONFLICT (username) DO NOTHING")
                .bind(username)
                .execute(&mut *tx)
                .await?;
        }

        let sql = if correct {
            format!(
                "UPDATE users SET correct_answers = correct_answers + 1 \
                 WHERE username = $1 RETURNING {USER_COLUMNS}"
            )
        } else {
            format!(
                "UPDATE users SET incorrect_answers = incorrect_answers + 1 \
                 WHERE username = $1 RETURNING {USER_COLUMNS}"
            )
        };
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(user)
    }
}
