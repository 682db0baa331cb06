pub mod conversations;
pub mod error;
pub mod health;
pub mod messages;
pub mod query;
pub mod users;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use parley_db::Store;

use crate::health::Readiness;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub store: Store,
    pub readiness: Readiness,
}

/// All routes, health checks included. Transport layers (tracing, CORS)
/// are added by the binary.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/alive", get(health::alive))
        .route("/ready", get(health::ready))
        .route("/system/status", get(health::status))
        .route("/user", post(users::create_user))
        .route("/user/{id}", get(users::get_user).delete(users::delete_user))
        .route("/message", post(messages::send_message))
        .route("/message/{id}", get(messages::get_message))
        .route("/messages/{to}", get(messages::list_messages))
        .route("/conversation", post(conversations::create_conversation))
        .route("/conversation/{to}", get(conversations::list_conversations))
        .route("/conversation/{to}/{from}", get(conversations::get_conversation))
        .with_state(state)
}
