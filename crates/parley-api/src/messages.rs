use axum::{
    Json,
    extract::rejection::JsonRejection,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use chrono::Utc;

use parley_types::api::{RangeQuery, SendMessageRequest};

use crate::AppState;
use crate::error::ApiError;
use crate::query::Window;

pub async fn send_message(
    State(state): State<AppState>,
    body: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body?;
    let message = state
        .store
        .create_message(&req.sender, &req.recipient, &req.content)?;
    Ok(Json(message))
}

pub async fn get_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.store.get_message(&id)?))
}

/// Messages addressed to `to`, oldest first, capped at `limit`.
pub async fn list_messages(
    State(state): State<AppState>,
    Path(to): Path<String>,
    Query(query): Query<RangeQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let window = Window::from_query(&query, Utc::now())?;
    let messages = state.store.list_messages(&to, window.range, window.limit)?;
    Ok(Json(messages))
}
