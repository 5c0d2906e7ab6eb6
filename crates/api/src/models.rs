use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A player's score record. PostgreSQL is the authoritative copy; a
/// denormalized mirror lives in Redis under `user:{username}`.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub correct_answers: i64,
    pub incorrect_answers: i64,
    pub created_at: DateTime<Utc>,
}

/// A destination record seeded from MongoDB into the Redis `destinations`
/// list. Immutable after seeding; identified by its list position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Destination {
    pub city: String,
    pub country: String,
    pub clues: Vec<String>,
    #[serde(default)]
    pub fun_fact: Option<String>,
    #[serde(default)]
    pub trivia: Vec<String>,
}

impl Destination {
    /// The canonical answer string and name-index entry for this destination.
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.city, self.country)
    }
}

/// Score counters as mirrored in the Redis `user:{username}` hash.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CachedScore {
    pub correct_answers: i64,
    pub incorrect_answers: i64,
}

impl CachedScore {
    /// Parses an HGETALL result. Returns `None` for an empty hash (key
    /// absent or expired). Unparseable fields count as zero, matching how
    /// the hash is written (integers stored as strings).
    pub fn from_hash(hash: &HashMap<String, String>) -> Option<Self> {
        if hash.is_empty() {
            return None;
        }
        let field = |name: &str| {
            hash.get(name)
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(0)
        };
        Some(Self {
            correct_answers: field("correct_answers"),
            incorrect_answers: field("incorrect_answers"),
        })
    }
}
