//! Question dispensing and answer scoring.
//!
//! Endpoints:
//! - GET /next-question - serve the destination at the shared cursor and
//!   advance it (round-robin; the advance is atomic in Redis, so concurrent
//!   players each get a distinct pointer)
//! - POST /submit-answer - validate an answer against the pointer the client
//!   echoes back, update both score stores, return a fun fact
//!
//! The cursor advances whether or not an answer ever arrives for it; an
//! abandoned question still consumes a turn of the shared sequence.

use axum::{
    Json, Router, debug_handler,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use garde::Validate;
use rand::seq::{IndexedRandom, SliceRandom};
use shared::api::{AnswerResult, NextQuestionResponse, SubmitAnswerPayload, SubmitAnswerResponse};

use crate::{
    error::AppError,
    middleware::auth::{AuthError, AuthUser, resolve_with_body_token},
    models::Destination,
    state::AppState,
};

/// Wrong options sampled per question. With the correct answer appended,
/// every question carries four choices.
const WRONG_OPTION_COUNT: usize = 3;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/next-question", get(next_question))
        .route("/submit-answer", post(submit_answer))
}

#[debug_handler]
async fn next_question(
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let Some(pointer) = state.stores.destinations.next_pointer().await? else {
        return Err(AppError::External(
            StatusCode::NOT_FOUND,
            "No destinations available",
        ));
    };

    let Some(destination) = state.stores.destinations.get(pointer).await? else {
        // The seed shrank between the advance and the read.
        return Err(AppError::External(
            StatusCode::NOT_FOUND,
            "No destinations available",
        ));
    };

    let names = state.stores.destinations.names().await?;
    let options = build_options(&destination, &names)?;

    tracing::debug!(username = %user.username, pointer, "question served");

    Ok(Json(NextQuestionResponse {
        clues: destination.clues,
        options,
        pointer,
    }))
}

/// Samples three distinct wrong names from the index and shuffles them in
/// with the correct answer.
fn build_options(destination: &Destination, names: &[String]) -> Result<Vec<String>, AppError> {
    let correct = destination.display_name();

    let mut wrong: Vec<&String> = names.iter().filter(|name| **name != correct).collect();
    wrong.sort_unstable();
    wrong.dedup();

    if wrong.len() < WRONG_OPTION_COUNT {
        return Err(AppError::Internal(anyhow::anyhow!(
            "only {} other destinations seeded, need {} to build options",
            wrong.len(),
            WRONG_OPTION_COUNT
        )));
    }

    let mut rng = rand::rng();
    let mut options: Vec<String> = wrong
        .choose_multiple(&mut rng, WRONG_OPTION_COUNT)
        .map(|name| (*name).clone())
        .collect();
    options.push(correct);
    options.shuffle(&mut rng);

    Ok(options)
}

#[debug_handler]
async fn submit_answer(
    auth: Result<AuthUser, AuthError>,
    State(state): State<AppState>,
    Json(payload): Json<SubmitAnswerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    // Some clients put the token in the body; the extractor cannot see it.
    let user = resolve_with_body_token(auth, payload.token.as_deref(), &state).await?;

    // Re-resolve rather than trusting the client: the cursor has moved on
    // and the seed may have changed since the question was served.
    let Some(destination) = state.stores.destinations.get(payload.pointer).await? else {
        return Err(AppError::External(
            StatusCode::BAD_REQUEST,
            "Invalid question",
        ));
    };

    let fun_fact = pick_fun_fact(&destination);
    let correct = payload.answer == destination.display_name();

    // PostgreSQL commits first; the mirror write after it is best-effort
    // and converges via TTL if this request dies in between.
    let updated = state.repos.users.record_answer(&user.username, correct).await?;
    state
        .stores
        .scores
        .put(
            &updated.username,
            updated.correct_answers,
            updated.incorrect_answers,
        )
        .await?;

    tracing::info!(
        username = %updated.username,
        pointer = payload.pointer,
        correct,
        "answer recorded"
    );

    Ok(Json(SubmitAnswerResponse {
        result: if correct {
            AnswerResult::Correct
        } else {
            AnswerResult::Incorrect
        },
        fun_fact,
    }))
}

/// Rewards a random trivia entry, falling back to the destination's fun fact
/// when no trivia was seeded.
fn pick_fun_fact(destination: &Destination) -> String {
    let mut rng = rand::rng();
    destination
        .trivia
        .choose(&mut rng)
        .cloned()
        .or_else(|| destination.fun_fact.clone())
        .unwrap_or_else(|| "No fun fact available for this destination.".to_string())
}
