//! One-shot seed of destination records from MongoDB into Redis.
//!
//! Copies every document from the `destinations` collection into the Redis
//! destination list and rebuilds the derived name index atomically. Safe to
//! rerun: identical upstream data yields identical lists. A MongoDB failure
//! aborts before any Redis write, so a prior seed keeps serving.

use anyhow::{Context, Result};
use futures_util::TryStreamExt;
use mongodb::bson::doc;

use crate::{config::Config, models::Destination, stores::DestinationStore};

const COLLECTION_NAME: &str = "destinations";

/// Runs the seed and returns the number of destinations loaded.
pub async fn run(config: &Config, store: &dyn DestinationStore) -> Result<usize> {
    let client = mongodb::Client::with_uri_str(&config.mongo_url)
        .await
        .context("failed to connect to MongoDB")?;

    let collection = client
        .database(&config.mongo_db_name)
        .collection::<Destination>(COLLECTION_NAME);

    let destinations: Vec<Destination> = collection
        .find(doc! {})
        .projection(doc! {
            "_id": 0,
            "city": 1,
            "country": 1,
            "clues": 1,
            "fun_fact": 1,
            "trivia": 1,
        })
        .await
        .context("failed to query destinations")?
        .try_collect()
        .await
        .context("failed to read destination documents")?;

    store
        .replace_all(&destinations)
        .await
        .context("failed to write destinations to Redis")?;

    Ok(destinations.len())
}
