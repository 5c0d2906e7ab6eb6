//! Destination storage for Redis (lists plus the shared cursor).

use anyhow::Result;
use async_trait::async_trait;
use redis::AsyncCommands;

use crate::models::Destination;

const DESTINATIONS_KEY: &str = "destinations";
const NAMES_KEY: &str = "destination_names";
const POINTER_KEY: &str = "global_pointer";

/// Advances the round-robin cursor and returns the index to serve.
///
/// Runs as a single Lua script so concurrent fetchers each observe a
/// distinct pointer and the stored value stays in [0, N). Returns -1 when
/// no destinations are seeded.
const ADVANCE_SCRIPT: &str = r"
local n = redis.call('LLEN', KEYS[2])
if n == 0 then return -1 end
local p = tonumber(redis.call('GET', KEYS[1]) or '0') % n
redis.call('SET', KEYS[1], (p + 1) % n)
return p";

/// Store for the seeded destination list, its name index, and the cursor.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DestinationStore: Send + Sync {
    /// Health check - verify Redis connectivity.
    async fn health_check(&self) -> Result<bool>;

    /// Replace the destination list and name index in one atomic step and
    /// reset the cursor to 0. Safe to rerun; never leaves the two lists in
    /// a mixed old/new state.
    async fn replace_all(&self, destinations: &[Destination]) -> Result<()>;

    /// Get the destination at a list index.
    async fn get(&self, pointer: i64) -> Result<Option<Destination>>;

    /// All "city, country" names, index-aligned with the destination list.
    async fn names(&self) -> Result<Vec<String>>;

    /// Atomically fetch the cursor and advance it by 1 modulo the list
    /// length. Returns `None` when nothing is seeded.
    async fn next_pointer(&self) -> Result<Option<i64>>;
}

/// Redis implementation of DestinationStore.
#[derive(Clone)]
pub struct RedisDestinationStore {
    client: redis::Client,
    advance: redis::Script,
}

impl RedisDestinationStore {
    pub fn new(client: redis::Client) -> Self {
        Self {
            client,
            advance: redis::Script::new(ADVANCE_SCRIPT),
        }
    }
}

#[async_trait]
impl DestinationStore for RedisDestinationStore {
    async fn health_check(&self) -> Result<bool> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let result: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(result == "PONG")
    }

    async fn replace_all(&self, destinations: &[Destination]) -> Result<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        // One MULTI/EXEC so the list and its name index are always paired.
        let mut pipe = redis::pipe();
        pipe.atomic()
            .del(DESTINATIONS_KEY)
            .ignore()
            .del(NAMES_KEY)
            .ignore()
            .set(POINTER_KEY, 0)
            .ignore();

        for destination in destinations {
            pipe.rpush(DESTINATIONS_KEY, serde_json::to_string(destination)?)
                .ignore();
            pipe.rpush(NAMES_KEY, destination.display_name()).ignore();
        }

        let _: () = pipe.query_async(&mut conn).await?;
        Ok(())
    }

    async fn get(&self, pointer: i64) -> Result<Option<Destination>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let json: Option<String> = conn.lindex(DESTINATIONS_KEY, pointer as isize).await?;

        match json {
            Some(j) => Ok(Some(serde_json::from_str(&j)?)),
            None => Ok(None),
        }
    }

    async fn names(&self) -> Result<Vec<String>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let names: Vec<String> = conn.lrange(NAMES_KEY, 0, -1).await?;
        Ok(names)
    }

    async fn next_pointer(&self) -> Result<Option<i64>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let pointer: i64 = self
            .advance
            .key(POINTER_KEY)
            .key(DESTINATIONS_KEY)
            .invoke_async(&mut conn)
            .await?;

        Ok((pointer >= 0).then_some(pointer))
    }
}

// These tests run against a real Redis (TEST_REDIS_URL, defaulting to
// database 1 on localhost) and share the store's fixed keys, so run them
// with `--ignored --test-threads=1`.
#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::mock_destination;

    fn store() -> RedisDestinationStore {
        let url = std::env::var("TEST_REDIS_URL")
            .unwrap_or_else(|_| "redis://127.0.0.1:6379/1".to_string());
        RedisDestinationStore::new(redis::Client::open(url).unwrap())
    }

    fn seed() -> Vec<Destination> {
        vec![
            mock_destination("Paris", "France"),
            mock_destination("Tokyo", "Japan"),
            mock_destination("Cairo", "Egypt"),
            mock_destination("Lima", "Peru"),
        ]
    }

    #[tokio::test]
    #[ignore = "needs a running Redis"]
    async fn pointer_advances_by_one_and_wraps() {
        let store = store();
        store.replace_all(&seed()).await.unwrap();

        let mut served = Vec::new();
        for _ in 0..5 {
            served.push(store.next_pointer().await.unwrap().unwrap());
        }

        assert_eq!(served, vec![0, 1, 2, 3, 0]);
    }

    #[tokio::test]
    #[ignore = "needs a running Redis"]
    async fn reseed_resets_cursor_and_keeps_lists_paired() {
        let store = store();
        let destinations = seed();

        store.replace_all(&destinations).await.unwrap();
        store.next_pointer().await.unwrap();
        store.next_pointer().await.unwrap();

        // Rerunning the seed must not append, and must restart the cycle.
        store.replace_all(&destinations).await.unwrap();
        assert_eq!(store.next_pointer().await.unwrap(), Some(0));

        let names = store.names().await.unwrap();
        assert_eq!(names.len(), destinations.len());
        for (i, destination) in destinations.iter().enumerate() {
            assert_eq!(names[i], destination.display_name());
            let stored = store.get(i as i64).await.unwrap().unwrap();
            assert_eq!(stored.display_name(), destination.display_name());
        }
    }

    #[tokio::test]
    #[ignore = "needs a running Redis"]
    async fn empty_seed_yields_no_pointer() {
        let store = store();
        store.replace_all(&[]).await.unwrap();

        assert_eq!(store.next_pointer().await.unwrap(), None);
    }
}
