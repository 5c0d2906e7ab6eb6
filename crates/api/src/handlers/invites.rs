//! Challenge-a-friend invites.
//!
//! Registers the invitee through the same internal path as POST /signup
//! (no HTTP round trip to ourselves), then builds a deep link carrying the
//! invitee's fresh token and a WhatsApp share link wrapping it together
//! with the inviter's current score.

use axum::{
    Json, Router, debug_handler, extract::State, response::IntoResponse, routing::post,
};
use garde::Validate;
use shared::api::{ChallengePayload, ChallengeResponse};

use crate::{
    error::AppError,
    handlers::auth::create_account,
    middleware::auth::{AuthError, AuthUser, resolve_with_body_token},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/challenge-friend", post(challenge_friend))
}

#[debug_handler]
async fn challenge_friend(
    auth: Result<AuthUser, AuthError>,
    State(state): State<AppState>,
    Json(payload): Json<ChallengePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    // Some clients put the inviter's token in the body.
    let user = resolve_with_body_token(auth, payload.token.as_deref(), &state).await?;

    // Register the invitee first; a taken username surfaces the registration
    // failure and leaves the inviter's score untouched.
    let invite_token = create_account(&state, &payload.invitee_username).await?;

    // Score comes from the mirror, zero-filled when absent or expired.
    let score = state
        .stores
        .scores
        .get(&user.username)
        .await?
        .unwrap_or_default();
    let score_line = format!(
        "Correct: {} | Incorrect: {}",
        score.correct_answers, score.incorrect_answers
    );

    let invite_url = format!(
        "{}/next-question?token={}",
        state.config.public_base_url.trim_end_matches('/'),
        invite_token
    );

    let invite_message = format!(
        "Hey! Join me for a fun travel quiz! My score: {score_line}. \
         Let's challenge each other! {invite_url}"
    );
    let encoded: String = url::form_urlencoded::byte_serialize(invite_message.as_bytes()).collect();
    let whatsapp_link = format!("https://wa.me/?text={encoded}");

    tracing::info!(
        inviter = %user.username,
        invitee = %payload.invitee_username,
        "invite link generated"
    );

    Ok(Json(ChallengeResponse {
        message: "Invite link generated successfully".to_string(),
        whatsapp_link,
        invite_url,
    }))
}
