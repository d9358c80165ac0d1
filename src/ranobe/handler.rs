use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mongodb::bson::oid::ObjectId;

use crate::api::{CreateWorkRequest, DeleteParams, Work};
use crate::handler::{AppState, bad_request, created, internal_error, not_found, success};
use crate::model::WorkDocument;
use crate::store::Store;

const CHAPTERS_UNAVAILABLE: &str = "failed to load chapters";

/// A failed chapter lookup does not fail the work: it comes back with no
/// chapters and a `ChaptersError` marker.
async fn with_chapters(store: &dyn Store, work: WorkDocument) -> Work {
    let Some(id) = work.id else {
        return Work::new(work, vec![]);
    };

    match store.list_chapters(id).await {
        Ok(chapters) => Work::new(work, chapters),
        Err(e) => {
            tracing::warn!(ranobe_id = %id, error = %e, "failed to fetch chapters for ranobe");
            Work::without_chapters(work, CHAPTERS_UNAVAILABLE)
        }
    }
}

pub async fn list_ranobe(State(state): State<AppState>) -> Response {
    let works = match state.store.list_works().await {
        Ok(works) => works,
        Err(e) => {
            tracing::error!(error = %e, "failed to fetch ranobe");
            return internal_error("Server error");
        }
    };

    let mut response = Vec::with_capacity(works.len());
    for work in works {
        response.push(with_chapters(state.store.as_ref(), work).await);
    }

    success(response)
}

/// Same `ID`/`Title`/`Chapters` shape as the list entries.
pub async fn get_ranobe(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Response {
    let Some(id) = id.ok().and_then(|Path(id)| ObjectId::parse_str(id).ok()) else {
        return bad_request("Invalid ID");
    };

    match state.store.get_work(id).await {
        Ok(Some(work)) => success(with_chapters(state.store.as_ref(), work).await),
        Ok(None) => not_found("Ranobe not found"),
        Err(e) => {
            tracing::error!(ranobe_id = %id, error = %e, "failed to fetch ranobe");
            internal_error("Server error")
        }
    }
}

pub async fn create_ranobe(
    State(state): State<AppState>,
    payload: Result<Json<CreateWorkRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) if request.is_valid() => request,
        _ => return bad_request("Invalid data"),
    };

    match state.store.insert_work(&request.title).await {
        Ok(work) => {
            tracing::info!(ranobe_id = ?work.id, "created ranobe");
            created(Work::new(work, vec![]))
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to create ranobe");
            internal_error("Creation error")
        }
    }
}

/// Reports success whether or not the work existed. Its chapters and
/// bookmark are not removed.
pub async fn delete_ranobe(
    State(state): State<AppState>,
    params: Result<Query<DeleteParams>, QueryRejection>,
) -> Response {
    let id = params.ok().and_then(|Query(params)| params.id);
    let Some(Ok(id)) = id.as_deref().map(ObjectId::parse_str) else {
        return bad_request("Invalid ID");
    };

    match state.store.delete_work(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            tracing::error!(ranobe_id = %id, error = %e, "failed to delete ranobe");
            internal_error("Deletion error")
        }
    }
}
