//! Signup and login.
//!
//! Flow:
//! 1. POST /signup creates a zero-score record in PostgreSQL (the
//!    authoritative store), writes the Redis mirror, and issues a token
//! 2. POST /login checks the mirror first; a hit goes straight to token
//!    issuance, a miss falls back to PostgreSQL and repopulates the mirror
//!
//! Registration is also reachable internally via [`create_account`], used
//! by the invite flow so inviting a friend never round-trips through HTTP.

use axum::{
    Json, Router, debug_handler, extract::State, http::StatusCode, response::IntoResponse,
    routing::post,
};
use garde::Validate;
use shared::api::{LoginPayload, SignupPayload, TokenResponse};

use crate::{error::AppError, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

/// Creates a user with zero scores, mirrors it into the cache, and issues a
/// token. Fails with 400 when the username is already registered; the
/// existing record is never touched.
pub(crate) async fn create_account(state: &AppState, username: &str) -> Result<String, AppError> {
    let Some(user) = state.repos.users.create(username).await? else {
        return Err(AppError::External(
            StatusCode::BAD_REQUEST,
            "Username already registered",
        ));
    };

    state.stores.scores.put(&user.username, 0, 0).await?;

    let token = state.tokens.issue(&user.username)?;
    Ok(token)
}

#[debug_handler]
async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let token = create_account(&state, &payload.username).await?;

    tracing::info!(username = %payload.username, "user registered");

    Ok(Json(TokenResponse { token }))
}

#[debug_handler]
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    // Mirror presence is sufficient; staleness is bounded by the mirror TTL.
    if state.stores.scores.get(&payload.username).await?.is_some() {
        let token = state.tokens.issue(&payload.username)?;

        tracing::info!(username = %payload.username, "user logged in");

        return Ok(Json(TokenResponse { token }));
    }

    let Some(user) = state.repos.users.find(&payload.username).await? else {
        return Err(AppError::External(StatusCode::NOT_FOUND, "User not found"));
    };

    state
        .stores
        .scores
        .put(&user.username, user.correct_answers, user.incorrect_answers)
        .await?;

    tracing::info!(username = %user.username, "user logged in");

    let token = state.tokens.issue(&user.username)?;
    Ok(Json(TokenResponse { token }))
}
