//! Account endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use super::{not_found, paged, PageParams, SharedState};
use crate::{Account, AccountStage};

/// Query parameters for listing accounts.
#[derive(Debug, Default, Deserialize)]
pub struct ListAccountsQuery {
    pub offset: Option<u32>,
    pub limit: Option<u32>,
    #[serde(rename = "AccountStage")]
    pub account_stage: Option<i32>,
}

/// GET /crm/accounts/{uid}
pub async fn get_account(State(state): State<SharedState>, Path(uid): Path<String>) -> Response {
    let state = state.read().await;

    match state.accounts.get(&uid) {
        Some(account) => Json(account.clone()).into_response(),
        None => not_found("account", &uid),
    }
}

/// GET /crm/accounts
pub async fn list_accounts(
    State(state): State<SharedState>,
    Query(query): Query<ListAccountsQuery>,
) -> Response {
    let state = state.read().await;
    let params = PageParams {
        offset: query.offset,
        limit: query.limit,
    };
    paged(state.list_accounts(query.account_stage), &params)
}

/// POST /crm/accounts
pub async fn create_account(
    State(state): State<SharedState>,
    Json(account): Json<Account>,
) -> Response {
    let mut state = state.write().await;
    let uid = state.insert_account(account);

    match state.accounts.get(&uid) {
        Some(account) => (StatusCode::OK, Json(account.clone())).into_response(),
        None => not_found("account", &uid),
    }
}

/// PUT /crm/accounts/{uid}
pub async fn update_account(
    State(state): State<SharedState>,
    Path(uid): Path<String>,
    Json(update): Json<Account>,
) -> Response {
    let mut state = state.write().await;

    match state.update_account(&uid, update) {
        Some(account) => Json(account.clone()).into_response(),
        None => not_found("account", &uid),
    }
}

/// DELETE /crm/accounts/{uid}
pub async fn delete_account(State(state): State<SharedState>, Path(uid): Path<String>) -> Response {
    let mut state = state.write().await;

    match state.accounts.remove(&uid) {
        Some(_) => StatusCode::OK.into_response(),
        None => not_found("account", &uid),
    }
}

/// PUT /crm/accounts/cancellation/{uid}
pub async fn cancel_account(
    State(state): State<SharedState>,
    Path(uid): Path<String>,
    Json(_request): Json<serde_json::Value>,
) -> Response {
    let mut state = state.write().await;

    match state.set_account_stage(&uid, AccountStage::Cancelling) {
        Some(account) => Json(account.clone()).into_response(),
        None => not_found("account", &uid),
    }
}

/// PUT /crm/accounts/removecancellation/{uid}
pub async fn remove_account_cancellation(
    State(state): State<SharedState>,
    Path(uid): Path<String>,
) -> Response {
    let mut state = state.write().await;

    match state.set_account_stage(&uid, AccountStage::Subscribing) {
        Some(account) => Json(account.clone()).into_response(),
        None => not_found("account", &uid),
    }
}
