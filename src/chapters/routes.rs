use axum::{
    Router,
    routing::{get, post, put},
};

use super::handler;
use crate::handler::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handler::create_or_update_chapter))
        .route("/:ranobe_id", get(handler::list_chapters))
        .route("/:ranobe_id/:chapter_id", get(handler::get_chapter))
        .route(
            "/:ranobe_id/:chapter_id/update_translation",
            put(handler::update_translation),
        )
}
