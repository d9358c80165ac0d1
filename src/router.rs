use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::get,
};
use tower_http::cors::CorsLayer;

use crate::config::CorsConfig;
use crate::handler::{AppState, healthcheck};
use crate::{bookmarks, chapters, ranobe};

const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(12 * 60 * 60);

/// One allowed origin, with credentials.
pub fn cors_layer(cfg: &CorsConfig) -> Result<CorsLayer> {
    let origin = HeaderValue::from_str(&cfg.allowed_origin)
        .with_context(|| format!("invalid cors origin {:?}", cfg.allowed_origin))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_LENGTH])
        .allow_credentials(true)
        .max_age(PREFLIGHT_MAX_AGE))
}

pub fn app(state: AppState, cors: &CorsConfig) -> Result<Router> {
    let api = Router::new()
        .nest("/ranobe", ranobe::routes())
        .nest("/chapters", chapters::routes())
        .nest("/bookmarks", bookmarks::routes());

    Ok(Router::new()
        .route("/", get(healthcheck))
        .nest("/api", api)
        .layer(cors_layer(cors)?)
        .with_state(state))
}
