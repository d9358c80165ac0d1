use axum::{
    Router,
    routing::{delete, get, post},
};

use super::handler;
use crate::handler::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_ranobe))
        .route("/create", post(handler::create_ranobe))
        .route("/delete", delete(handler::delete_ranobe))
        .route("/:id", get(handler::get_ranobe))
}
