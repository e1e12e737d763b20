//! HTTP handlers for the server.
//!
//! Every JSON error body has the shape `{"success": false, "error": "..."}`.

pub mod config;
pub mod convert;
pub mod orders;
pub mod webhook;

use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::OrderDeskError;

/// Handler error: a status code and a message for the JSON error body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl From<OrderDeskError> for ApiError {
    fn from(err: OrderDeskError) -> Self {
        let status = match &err {
            OrderDeskError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            OrderDeskError::Upstream { .. } | OrderDeskError::Http(_) => StatusCode::BAD_GATEWAY,
            OrderDeskError::Config(_)
            | OrderDeskError::Json(_)
            | OrderDeskError::Render(_)
            | OrderDeskError::Server(_)
            | OrderDeskError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({"success": false, "error": self.message})),
        )
            .into_response()
    }
}
