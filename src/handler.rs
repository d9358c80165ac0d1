use std::sync::Arc;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mongodb::bson::oid::ObjectId;
use serde::Serialize;
use tracing::info;

use crate::api::{ErrorResponse, HealthResponse, MessageResponse};
use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        AppState { store }
    }
}

pub async fn healthcheck() -> impl IntoResponse {
    info!("got healthcheck request");
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

pub fn success<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

pub fn created<T: Serialize>(data: T) -> Response {
    (StatusCode::CREATED, Json(data)).into_response()
}

pub fn message(status: StatusCode, msg: &str) -> Response {
    (
        status,
        Json(MessageResponse {
            message: msg.to_string(),
        }),
    )
        .into_response()
}

fn error(status: StatusCode, msg: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: msg.to_string(),
        }),
    )
        .into_response()
}

pub fn bad_request(msg: &str) -> Response {
    error(StatusCode::BAD_REQUEST, msg)
}

pub fn not_found(msg: &str) -> Response {
    error(StatusCode::NOT_FOUND, msg)
}

pub fn internal_error(msg: &str) -> Response {
    error(StatusCode::INTERNAL_SERVER_ERROR, msg)
}

/// Parses the `(ranobe_id, chapter_id)` natural key from path segments,
/// answering with the matching client error when either is malformed.
pub fn parse_chapter_key(ranobe_id: &str, chapter_id: &str) -> Result<(ObjectId, i64), Response> {
    let ranobe_id = ObjectId::parse_str(ranobe_id).map_err(|_| bad_request("Invalid Ranobe ID"))?;
    let chapter_id = chapter_id
        .parse::<i64>()
        .map_err(|_| bad_request("Invalid Chapter ID"))?;
    Ok((ranobe_id, chapter_id))
}
