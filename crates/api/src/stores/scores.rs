//! Per-user score mirror for Redis.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use redis::AsyncCommands;

use crate::models::CachedScore;

/// Mirror entries expire after an hour; PostgreSQL stays authoritative and
/// the mirror is repopulated on the next login or token verification.
pub const SCORE_MIRROR_TTL_SECS: i64 = 3600;

/// Store for the cached score mirror.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScoreStore: Send + Sync {
    /// Get a user's mirrored score. `None` when the key is absent or expired.
    async fn get(&self, username: &str) -> Result<Option<CachedScore>>;

    /// Write a user's mirrored score with the standard TTL.
    async fn put(
        &self,
        username: &str,
        correct_answers: i64,
        incorrect_answers: i64,
    ) -> Result<()>;
}

/// Redis implementation of ScoreStore.
#[derive(Clone)]
pub struct RedisScoreStore {
    client: redis::Client,
}

impl RedisScoreStore {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }

    fn user_key(username: &str) -> String {
        format!("user:{}", username)
    }
}

#[async_trait]
impl ScoreStore for RedisScoreStore {
    async fn get(&self, username: &str) -> Result<Option<CachedScore>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let key = Self::user_key(username);

        let hash: HashMap<String, String> = conn.hgetall(&key).await?;
        Ok(CachedScore::from_hash(&hash))
    }

    async fn put(
        &self,
        username: &str,
        correct_answers: i64,
        incorrect_answers: i64,
    ) -> Result<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let key = Self::user_key(username);

        let mut pipe = redis::pipe();
        pipe.atomic()
            .hset(&key, "correct_answers", correct_answers)
            .ignore()
            .hset(&key, "incorrect_answers", incorrect_answers)
            .ignore()
            .expire(&key, SCORE_MIRROR_TTL_SECS)
            .ignore();

        let _: () = pipe.query_async(&mut conn).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_key_is_namespaced() {
        assert_eq!(RedisScoreStore::user_key("alice"), "user:alice");
    }
}
