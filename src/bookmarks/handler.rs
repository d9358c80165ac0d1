use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Response,
};

use crate::api::{Bookmark, BookmarkRequest};
use crate::handler::{AppState, bad_request, internal_error, message, success};

pub async fn list_bookmarks(State(state): State<AppState>) -> Response {
    match state.store.list_bookmarks().await {
        Ok(bookmarks) => success(bookmarks.into_iter().map(Bookmark::from).collect::<Vec<_>>()),
        Err(e) => {
            tracing::error!(error = %e, "failed to fetch bookmarks");
            internal_error("Error fetching bookmarks")
        }
    }
}

pub async fn create_or_update_bookmark(
    State(state): State<AppState>,
    payload: Result<Json<BookmarkRequest>, JsonRejection>,
) -> Response {
    let Some((ranobe_id, chapter_id)) = payload.ok().and_then(|Json(request)| request.key()) else {
        return bad_request("Invalid data");
    };

    match state.store.upsert_bookmark(ranobe_id, chapter_id).await {
        Ok(()) => message(StatusCode::CREATED, "Bookmark created or updated"),
        Err(e) => {
            tracing::error!(ranobe_id = %ranobe_id, chapter_id, error = %e, "failed to upsert bookmark");
            internal_error("Error creating or updating bookmark")
        }
    }
}
