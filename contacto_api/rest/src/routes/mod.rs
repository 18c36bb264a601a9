use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::ApiMessage;

pub mod contact;
pub mod health;

pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err:#}");
    server_error()
}

/// Opaque 500 response without any details.
fn server_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "Error en el servidor").into_response()
}

fn message(code: StatusCode, message: &'static str) -> Response {
    (code, Json(ApiMessage { message })).into_response()
}
