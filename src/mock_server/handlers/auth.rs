//! Token and profile endpoint handlers.

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use super::{error, SharedState};
use crate::AuthToken;

/// Lifetime of issued tokens, in seconds.
const TOKEN_LIFETIME: u64 = 86_400;

/// Body of `POST tokens`.
#[derive(Debug, Deserialize)]
pub struct TokenParams {
    pub username: String,
    pub password: String,
}

/// POST /tokens
pub async fn create_token(
    State(state): State<SharedState>,
    Json(params): Json<TokenParams>,
) -> Response {
    let mut state = state.write().await;

    match state.issue_token(&params.username, &params.password) {
        Some(access_token) => Json(AuthToken {
            access_token,
            token_type: Some("bearer".to_string()),
            expires_in: Some(TOKEN_LIFETIME),
        })
        .into_response(),
        None => error(
            StatusCode::BAD_REQUEST,
            "The user name or password is incorrect.",
        ),
    }
}

/// GET /profile
pub async fn get_profile(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    let state = state.read().await;
    let person = token
        .and_then(|t| state.person_for_token(t))
        .and_then(|p| p.uid.as_deref())
        .and_then(|uid| state.person_with_accounts(uid));

    match person {
        Some(person) => Json(person).into_response(),
        None => error(
            StatusCode::UNAUTHORIZED,
            "Authorization has been denied for this request.",
        ),
    }
}
