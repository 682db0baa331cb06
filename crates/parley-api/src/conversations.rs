use axum::{
    Json,
    extract::rejection::JsonRejection,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use chrono::Utc;

use parley_types::api::{CreateConversationRequest, RangeQuery};

use crate::AppState;
use crate::error::ApiError;
use crate::query::Window;

pub async fn create_conversation(
    State(state): State<AppState>,
    body: Result<Json<CreateConversationRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body?;
    let conversation = state.store.create_conversation(&req.sender, &req.recipient)?;
    Ok(Json(conversation))
}

/// `/conversation/{to}/{from}`. Each conversation carries at most `limit`
/// of its most recent messages.
pub async fn get_conversation(
    State(state): State<AppState>,
    Path((to, from)): Path<(String, String)>,
    Query(query): Query<RangeQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let window = Window::from_query(&query, Utc::now())?;
    let mut conversation = state.store.get_conversation(&from, &to, window.range)?;
    conversation.truncate_to_recent(window.limit);
    Ok(Json(conversation))
}

pub async fn list_conversations(
    State(state): State<AppState>,
    Path(to): Path<String>,
    Query(query): Query<RangeQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let window = Window::from_query(&query, Utc::now())?;
    let mut conversations = state.store.list_conversations(&to, window.range)?;
    for conversation in &mut conversations {
        conversation.truncate_to_recent(window.limit);
    }
    Ok(Json(conversations))
}
