//! Shared test utilities for API handler tests.
//!
//! Provides common mock factories and a flexible `TestStateBuilder` for
//! constructing `AppState` instances with only the mocks needed for each test.
//!
//! ## Usage
//!
//! ```ignore
//! use crate::test_utils::{TestStateBuilder, mock_user};
//!
//! let mut user_repo = MockUserRepo::new();
//! user_repo.expect_find().returning(|u| Ok(Some(mock_user(u))));
//!
//! let state = TestStateBuilder::new()
//!     .with_user_repo(user_repo)
//!     .build();
//! ```

use std::sync::Arc;

use chrono::Utc;

use crate::config::Config;
use crate::models::{Destination, User};
use crate::repos::{MockStatusRepo, MockUserRepo, Repos};
use crate::services::TokenService;
use crate::state::AppState;
use crate::stores::{MockDestinationStore, MockScoreStore, Stores};

/// Creates a test configuration with dummy values.
pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 3000,
        database_url: "postgres://test".to_string(),
        redis_url: "redis://test".to_string(),
        mongo_url: "mongodb://test".to_string(),
        mongo_db_name: "globetrotter_test".to_string(),
        jwt_secret: "test-secret".to_string(),
        public_base_url: "http://localhost:3000".to_string(),
        env: "test".to_string(),
        sentry_dsn: None,
    }
}

/// Creates a mock user with zero scores.
pub fn mock_user(username: &str) -> User {
    User {
        username: username.to_string(),
        correct_answers: 0,
        incorrect_answers: 0,
        created_at: Utc::now(),
    }
}

/// Creates a mock destination with one clue and one trivia entry.
pub fn mock_destination(city: &str, country: &str) -> Destination {
    Destination {
        city: city.to_string(),
        country: country.to_string(),
        clues: vec![format!("This city is the capital of {country}.")],
        fun_fact: Some(format!("{city} has a twin city somewhere.")),
        trivia: vec![format!("{city} hosts a famous festival every year.")],
    }
}

/// The name index for the four-destination seed used across quiz tests.
pub fn sample_names() -> Vec<String> {
    vec![
        "Paris, France".to_string(),
        "Tokyo, Japan".to_string(),
        "Cairo, Egypt".to_string(),
        "Lima, Peru".to_string(),
    ]
}

/// Builder for constructing test `AppState` with custom mocks.
///
/// Uses default (empty) mocks for any repo/store not explicitly set.
/// This allows tests to only configure the mocks they actually need.
pub struct TestStateBuilder {
    user_repo: Option<MockUserRepo>,
    status_repo: Option<MockStatusRepo>,
    destination_store: Option<MockDestinationStore>,
    score_store: Option<MockScoreStore>,
}

impl TestStateBuilder {
    /// Creates a new builder with no mocks configured.
    pub fn new() -> Self {
        Self {
            user_repo: None,
            status_repo: None,
            destination_store: None,
            score_store: None,
        }
    }

    pub fn with_user_repo(mut self, repo: MockUserRepo) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn with_status_repo(mut self, repo: MockStatusRepo) -> Self {
        self.status_repo = Some(repo);
        self
    }

    pub fn with_destination_store(mut self, store: MockDestinationStore) -> Self {
        self.destination_store = Some(store);
        self
    }

    pub fn with_score_store(mut self, store: MockScoreStore) -> Self {
        self.score_store = Some(store);
        self
    }

    /// Builds the `AppState` using configured mocks or defaults.
    pub fn build(self) -> AppState {
        let repos = Repos {
            users: Arc::new(self.user_repo.unwrap_or_else(MockUserRepo::new)),
            status: Arc::new(self.status_repo.unwrap_or_else(MockStatusRepo::new)),
        };

        let stores = Stores {
            destinations: Arc::new(
                self.destination_store
                    .unwrap_or_else(MockDestinationStore::new),
            ),
            scores: Arc::new(self.score_store.unwrap_or_else(MockScoreStore::new)),
        };

        let config = test_config();
        let tokens = TokenService::new(&config.jwt_secret);

        AppState {
            config,
            repos,
            stores,
            tokens,
        }
    }
}

impl Default for TestStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
