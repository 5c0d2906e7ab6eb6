//! Database repositories (PostgreSQL).
//!
//! This module contains traits and implementations for database access.
//! Each repository is abstracted behind a trait to enable mocking in tests.
//!
//! ## Repositories
//!
//! - **users** - score records (the authoritative copy; Redis holds a mirror)
//! - **status** - database health check
//!
//! ## Usage in Handlers
//!
//! Repositories are accessed via `state.repos`:
//!
//! ```ignore
//! async fn handler(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
//!     let user = state.repos.users.find(&username).await?;
//! }
//! ```

mod status;
mod users;

pub use status::{PgStatusRepo, StatusRepo};
pub use users::{PgUserRepo, UserRepo};

#[cfg(test)]
pub use status::MockStatusRepo;
#[cfg(test)]
pub use users::MockUserRepo;

use std::sync::Arc;

/// Collection of all database repositories.
#[derive(Clone)]
pub struct Repos {
    pub users: Arc<dyn UserRepo>,
    pub status: Arc<dyn StatusRepo>,
}
