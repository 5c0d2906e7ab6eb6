use crate::{config::Config, repos::Repos, services::TokenService, stores::Stores};

#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Database repositories (PostgreSQL).
    pub repos: Repos,
    /// Cache stores (Redis).
    pub stores: Stores,
    /// Token issuance and verification.
    pub tokens: TokenService,
}
