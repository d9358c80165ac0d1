use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::Response,
};
use mongodb::bson::oid::ObjectId;

use crate::api::Chapter;
use crate::handler::{
    AppState, bad_request, created, internal_error, message, not_found, parse_chapter_key, success,
};
use crate::model::TranslationUpdate;

/// Answers 201 with the submitted chapter for both insert and overwrite.
pub async fn create_or_update_chapter(
    State(state): State<AppState>,
    payload: Result<Json<Chapter>, JsonRejection>,
) -> Response {
    let mut chapter = match payload {
        Ok(Json(chapter)) => chapter,
        Err(e) => {
            tracing::info!(error = %e, "invalid chapter payload");
            return bad_request("Invalid data");
        }
    };

    let ranobe_id = match chapter.parse_ranobe_id() {
        Ok(id) => id,
        Err(e) => {
            tracing::info!(error = %e, "invalid ranobe id in chapter payload");
            return bad_request("Invalid Ranobe ID");
        }
    };
    chapter.ranobe_id = ranobe_id.to_hex();

    tracing::debug!(ranobe_id = %ranobe_id, chapter_id = chapter.chapter_id, "received chapter");

    if let Err(e) = state.store.upsert_chapter(&chapter.to_document(ranobe_id)).await {
        tracing::error!(ranobe_id = %ranobe_id, chapter_id = chapter.chapter_id, error = %e, "failed to upsert chapter");
        return internal_error("Creation or update error");
    }

    created(chapter)
}

pub async fn get_chapter(
    State(state): State<AppState>,
    key: Result<Path<(String, String)>, PathRejection>,
) -> Response {
    let Ok(Path((ranobe_id, chapter_id))) = key else {
        return bad_request("Invalid Ranobe ID");
    };
    let (ranobe_id, chapter_id) = match parse_chapter_key(&ranobe_id, &chapter_id) {
        Ok(key) => key,
        Err(response) => return response,
    };

    match state.store.get_chapter(ranobe_id, chapter_id).await {
        Ok(Some(chapter)) => success(Chapter::from(chapter)),
        Ok(None) => not_found("Chapter not found"),
        Err(e) => {
            tracing::error!(ranobe_id = %ranobe_id, chapter_id, error = %e, "failed to fetch chapter");
            internal_error("Error fetching chapters")
        }
    }
}

/// An existing work without chapters yields `[]`; only an unknown work is 404.
pub async fn list_chapters(
    State(state): State<AppState>,
    ranobe_id: Result<Path<String>, PathRejection>,
) -> Response {
    let Some(ranobe_id) = ranobe_id
        .ok()
        .and_then(|Path(id)| ObjectId::parse_str(id).ok())
    else {
        return bad_request("Invalid Ranobe ID");
    };

    let chapters = match state.store.list_chapters(ranobe_id).await {
        Ok(chapters) => chapters,
        Err(e) => {
            tracing::error!(ranobe_id = %ranobe_id, error = %e, "failed to fetch chapters");
            return internal_error("Error fetching chapters");
        }
    };

    if chapters.is_empty() {
        match state.store.get_work(ranobe_id).await {
            Ok(Some(_)) => {}
            Ok(None) => return not_found("No chapters found"),
            Err(e) => {
                tracing::error!(ranobe_id = %ranobe_id, error = %e, "failed to fetch ranobe");
                return internal_error("Error fetching chapters");
            }
        }
    }

    success(chapters.into_iter().map(Chapter::from).collect::<Vec<_>>())
}

pub async fn update_translation(
    State(state): State<AppState>,
    key: Result<Path<(String, String)>, PathRejection>,
    payload: Result<Json<TranslationUpdate>, JsonRejection>,
) -> Response {
    let Ok(Path((ranobe_id, chapter_id))) = key else {
        return bad_request("Invalid Ranobe ID");
    };
    let (ranobe_id, chapter_id) = match parse_chapter_key(&ranobe_id, &chapter_id) {
        Ok(key) => key,
        Err(response) => return response,
    };

    let Ok(Json(translation)) = payload else {
        return bad_request("Invalid data");
    };

    match state.store.update_translation(ranobe_id, chapter_id, &translation).await {
        Ok(true) => message(StatusCode::OK, "Translation updated successfully"),
        Ok(false) => not_found("Chapter not found"),
        Err(e) => {
            tracing::error!(ranobe_id = %ranobe_id, chapter_id, error = %e, "failed to update translation");
            internal_error("Error updating translation")
        }
    }
}
