//! Deal endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};

use super::{not_found, paged, PageParams, SharedState};

/// GET /crm/deals/{uid}
pub async fn get_deal(State(state): State<SharedState>, Path(uid): Path<String>) -> Response {
    let state = state.read().await;

    match state.deals.get(&uid) {
        Some(deal) => Json(deal.clone()).into_response(),
        None => not_found("deal", &uid),
    }
}

/// GET /crm/deals
pub async fn list_deals(
    State(state): State<SharedState>,
    Query(params): Query<PageParams>,
) -> Response {
    let state = state.read().await;
    paged(state.deals.values().collect(), &params)
}
