//! Cache stores (Redis).
//!
//! This module contains traits and implementations for the fast-access
//! cache. The destination list is replaced wholesale on reseed; the score
//! mirror expires via TTL.
//!
//! ## Stores
//!
//! - **destinations** - seeded destination list, name index, and the shared
//!   round-robin cursor
//! - **scores** - per-user score mirror of the PostgreSQL record (1 h TTL)
//!
//! ## Redis Key Patterns
//!
//! ```text
//! destinations        → list of Destination JSON, index-addressed
//! destination_names   → list of "city, country" strings, index-aligned
//! global_pointer      → next list index to serve, always in [0, N)
//! user:{username}     → hash {correct_answers, incorrect_answers}, 1 h TTL
//! ```
//!
//! ## Usage in Handlers
//!
//! Stores are accessed via `state.stores`:
//!
//! ```ignore
//! async fn handler(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
//!     let pointer = state.stores.destinations.next_pointer().await?;
//!     state.stores.scores.put(&username, 1, 0).await?;
//! }
//! ```

mod destinations;
mod scores;

pub use destinations::{DestinationStore, RedisDestinationStore};
pub use scores::{RedisScoreStore, SCORE_MIRROR_TTL_SECS, ScoreStore};

#[cfg(test)]
pub use destinations::MockDestinationStore;
#[cfg(test)]
pub use scores::MockScoreStore;

use std::sync::Arc;

/// Collection of all cache stores.
#[derive(Clone)]
pub struct Stores {
    pub destinations: Arc<dyn DestinationStore>,
    pub scores: Arc<dyn ScoreStore>,
}
