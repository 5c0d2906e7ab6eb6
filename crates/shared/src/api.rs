//! Shared API request/response types used by the quiz server and its clients.

use garde::Validate;
use serde::{Deserialize, Serialize};

/// Usernames are the primary key for score records, so keep them short
/// and URL-safe.
const MAX_USERNAME_LEN: usize = 64;

/// Register a new player.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct SignupPayload {
    #[garde(length(min = 1, max = MAX_USERNAME_LEN), pattern(r"^[A-Za-z0-9_.-]+$"))]
    pub username: String,
}

/// Log in as an existing player.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginPayload {
    #[garde(length(min = 1, max = MAX_USERNAME_LEN), pattern(r"^[A-Za-z0-9_.-]+$"))]
    pub username: String,
}

/// Returned after signup or login. The token authenticates all quiz routes.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// A quiz question: clues for one destination plus four shuffled options.
///
/// The `pointer` identifies which destination the clues belong to and must
/// be echoed back in [`SubmitAnswerPayload`].
#[derive(Debug, Serialize, Deserialize)]
pub struct NextQuestionResponse {
    pub clues: Vec<String>,
    pub options: Vec<String>,
    pub pointer: i64,
}

/// Submit an answer for the question served at `pointer`.
///
/// `token` is an alternative transport for clients that cannot set the
/// `Authorization` header; the server checks it only when the header and
/// query string carry no token.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct SubmitAnswerPayload {
    #[garde(range(min = 0))]
    pub pointer: i64,
    #[garde(length(min = 1))]
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[garde(skip)]
    pub token: Option<String>,
}

/// Whether the submitted answer matched the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerResult {
    Correct,
    Incorrect,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitAnswerResponse {
    pub result: AnswerResult,
    pub fun_fact: String,
}

/// Invite a friend by registering them and generating a shareable link.
///
/// `token` mirrors [`SubmitAnswerPayload::token`]: a body-side fallback
/// for the inviter's own token.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct ChallengePayload {
    #[garde(length(min = 1, max = MAX_USERNAME_LEN), pattern(r"^[A-Za-z0-9_.-]+$"))]
    pub invitee_username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[garde(skip)]
    pub token: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChallengeResponse {
    pub message: String,
    pub whatsapp_link: String,
    pub invite_url: String,
}
