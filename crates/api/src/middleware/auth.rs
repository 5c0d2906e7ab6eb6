//! Authentication extractor for quiz tokens.
//!
//! Usage: Add `AuthUser` as an extractor parameter to require authentication.
//! The token is taken from the `Authorization: Bearer` header or, failing
//! that, a `token` query parameter (invite deep links carry the token in the
//! query string). The POST routes whose payloads carry an optional `token`
//! field additionally accept it through [`resolve_with_body_token`], since
//! the extractor never sees the request body.
//!
//! ```ignore
//! async fn my_handler(user: AuthUser, ...) -> ... {
//!     // user.username is available here
//! }
//! ```
//!
//! After the signature and expiry check, the username is resolved through
//! the score mirror first; on a miss the authoritative PostgreSQL record is
//! fetched and mirrored back with the standard TTL (read-through). A token
//! for a user that exists in neither store is rejected.

use axum::{
    Json, RequestPartsExt,
    extract::{FromRequestParts, Query},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use serde::Deserialize;

use crate::{error::AppError, state::AppState};

/// Authenticated user extracted from a valid quiz token.
pub struct AuthUser {
    pub username: String,
}

#[derive(Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let bearer = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .ok()
            .map(|TypedHeader(Authorization(bearer))| bearer.token().to_string());

        let token = match bearer {
            Some(token) => token,
            None => parts
                .extract::<Query<TokenQuery>>()
                .await
                .ok()
                .and_then(|Query(query)| query.token)
                .ok_or(AuthError::MissingToken)?,
        };

        authorize(state, &token).await
    }
}

/// Verifies a token and resolves its user through the score mirror, falling
/// back to PostgreSQL on a miss (read-through).
pub(crate) async fn authorize(state: &AppState, token: &str) -> Result<AuthUser, AuthError> {
    let username = state.tokens.verify(token).ok_or(AuthError::InvalidToken)?;

    // Fast path: the score mirror doubles as the identity cache.
    let cached = state.stores.scores.get(&username).await.map_err(|e| {
        tracing::error!("score mirror lookup failed: {:?}", e);
        AuthError::InvalidToken
    })?;
    if cached.is_some() {
        return Ok(AuthUser { username });
    }

    let user = state
        .repos
        .users
        .find(&username)
        .await
        .map_err(|e| {
            tracing::error!("user lookup failed: {:?}", e);
            AuthError::InvalidToken
        })?
        .ok_or(AuthError::InvalidToken)?;

    // Read-through: repopulate the mirror. Best-effort; a cache write
    // failure must not block an otherwise valid request.
    if let Err(e) = state
        .stores
        .scores
        .put(&user.username, user.correct_answers, user.incorrect_answers)
        .await
    {
        tracing::warn!(username = %user.username, "failed to mirror user score: {:?}", e);
    }

    Ok(AuthUser { username })
}

/// Settles authentication for routes whose payload carries an optional
/// `token` field. The extractor result wins when it found a token anywhere;
/// only a request with no header and no query token falls through to the
/// body token.
pub(crate) async fn resolve_with_body_token(
    auth: Result<AuthUser, AuthError>,
    body_token: Option<&str>,
    state: &AppState,
) -> Result<AuthUser, AppError> {
    match auth {
        Ok(user) => Ok(user),
        Err(AuthError::MissingToken) => match body_token {
            Some(token) => authorize(state, token)
                .await
                .map_err(AuthError::into_app_error),
            None => Err(AuthError::MissingToken.into_app_error()),
        },
        Err(err) => Err(err.into_app_error()),
    }
}

pub enum AuthError {
    MissingToken,
    InvalidToken,
}

impl AuthError {
    fn message(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "Missing authorization token",
            AuthError::InvalidToken => "Invalid or expired token",
        }
    }

    pub(crate) fn into_app_error(self) -> AppError {
        AppError::External(StatusCode::UNAUTHORIZED, self.message())
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.message() });

        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}
