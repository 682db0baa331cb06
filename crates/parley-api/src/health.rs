use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::{extract::State, http::StatusCode};

use crate::AppState;

/// Readiness flag shared between the `/ready` probe and the shutdown
/// handler. Starts out not ready.
#[derive(Debug, Clone, Default)]
pub struct Readiness(Arc<AtomicBool>);

impl Readiness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_ready(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Called once a shutdown signal arrives, before connections drain.
    pub fn mark_draining(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    pub fn is_ready(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

pub async fn alive() -> StatusCode {
    StatusCode::OK
}

pub async fn ready(State(state): State<AppState>) -> StatusCode {
    if state.readiness.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

pub async fn status() -> &'static str {
    "OK"
}
