//! HTTP request handlers for the mock server.

pub mod accounts;
pub mod auth;
pub mod deals;
pub mod people;

pub use accounts::*;
pub use auth::*;
pub use deals::*;
pub use people::*;

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::mock_server::state::MockState;
use crate::{ItemPage, Metadata, MAX_PAGE_SIZE};

/// Shared handle passed to every handler.
pub type SharedState = Arc<RwLock<MockState>>;

/// Paging parameters accepted by list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    /// Zero-based page index.
    pub offset: Option<u32>,
    /// Page size.
    pub limit: Option<u32>,
}

/// Slice `items` into the list envelope for the requested page.
pub(crate) fn paged<T: Clone + Serialize>(items: Vec<&T>, params: &PageParams) -> Response {
    let offset = params.offset.unwrap_or(0);
    let limit = params.limit.unwrap_or(MAX_PAGE_SIZE);

    if limit == 0 || limit > MAX_PAGE_SIZE {
        return error(
            StatusCode::BAD_REQUEST,
            format!("limit must be between 1 and {MAX_PAGE_SIZE}"),
        );
    }

    let total = items.len() as u64;
    let page: Vec<T> = items
        .into_iter()
        .skip(offset as usize * limit as usize)
        .take(limit as usize)
        .cloned()
        .collect();

    Json(ItemPage {
        metadata: Some(Metadata {
            limit,
            offset,
            total,
        }),
        items: page,
    })
    .into_response()
}

/// Outseta-style error body.
pub(crate) fn error(status: StatusCode, message: impl Into<String>) -> Response {
    let body = Json(serde_json::json!({ "Message": message.into() }));
    (status, body).into_response()
}

pub(crate) fn not_found(kind: &str, uid: &str) -> Response {
    error(
        StatusCode::NOT_FOUND,
        format!("No {kind} found with Uid: {uid}"),
    )
}

/// Reject requests whose `Authorization` header does not match
/// [`MockState::required_auth`].
///
/// Only layered over the server-key routes; `/tokens` and `/profile` sit
/// outside it.
pub async fn require_auth(
    State(state): State<SharedState>,
    request: Request,
    next: Next,
) -> Response {
    let required = state.read().await.required_auth.clone();

    if let Some(required) = required {
        let provided = request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        if provided != Some(required.as_str()) {
            return error(
                StatusCode::UNAUTHORIZED,
                "Authorization has been denied for this request.",
            );
        }
    }

    next.run(request).await
}
