//! Person endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::{not_found, paged, PageParams, SharedState};
use crate::Person;

/// GET /crm/people/{uid}
pub async fn get_person(State(state): State<SharedState>, Path(uid): Path<String>) -> Response {
    let state = state.read().await;

    match state.person_with_accounts(&uid) {
        Some(person) => Json(person).into_response(),
        None => not_found("person", &uid),
    }
}

/// GET /crm/people
pub async fn list_people(
    State(state): State<SharedState>,
    Query(params): Query<PageParams>,
) -> Response {
    let state = state.read().await;
    paged(state.people.values().collect(), &params)
}

/// POST /crm/people
pub async fn create_person(
    State(state): State<SharedState>,
    Json(person): Json<Person>,
) -> Response {
    let mut state = state.write().await;
    let uid = state.insert_person(person);

    match state.people.get(&uid) {
        Some(person) => (StatusCode::OK, Json(person.clone())).into_response(),
        None => not_found("person", &uid),
    }
}

/// PUT /crm/people/{uid}
pub async fn update_person(
    State(state): State<SharedState>,
    Path(uid): Path<String>,
    Json(update): Json<Person>,
) -> Response {
    let mut state = state.write().await;

    match state.update_person(&uid, update) {
        Some(person) => Json(person.clone()).into_response(),
        None => not_found("person", &uid),
    }
}

/// DELETE /crm/people/{uid}
pub async fn delete_person(State(state): State<SharedState>, Path(uid): Path<String>) -> Response {
    let mut state = state.write().await;

    match state.people.remove(&uid) {
        Some(_) => StatusCode::OK.into_response(),
        None => not_found("person", &uid),
    }
}
