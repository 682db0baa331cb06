use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use parley_db::StoreError;
use parley_types::api::ErrorResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    #[error("invalid query parameter `{param}`: {value:?}")]
    InvalidQuery { param: &'static str, value: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Store(StoreError::BadRequest(_)) | Self::InvalidBody(_) | Self::InvalidQuery { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }
        (status, Json(ErrorResponse { error: self.to_string() })).into_response()
    }
}
