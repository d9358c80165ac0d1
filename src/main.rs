use std::sync::Arc;

use clap::Parser;
use ranoberead::config::{Cli, Config};
use ranoberead::db::Database;
use ranoberead::handler::AppState;
use ranoberead::router;
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let dotenv = dotenvy::dotenv();
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    tracing::info!("ranoberead.svc starting");

    if let Ok(path) = dotenv {
        tracing::info!(path = ?path, "loaded environment file");
    }

    let cfg = Config::load(&args).unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to load config");
        std::process::exit(1);
    });

    let db = Database::connect(&cfg.database).await.unwrap_or_else(|e| {
        tracing::error!(error = ?e, "failed to connect to database");
        std::process::exit(1);
    });

    let app = router::app(AppState::new(Arc::new(db)), &cfg.cors).unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to build router");
        std::process::exit(1);
    });

    let address = format!("0.0.0.0:{}", cfg.app.port);
    let listener = tokio::net::TcpListener::bind(&address).await.unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to setup tcp listener");
        std::process::exit(1);
    });

    tracing::info!("ranoberead.svc running on {}", &address);
    tokio::select! {
        result = axum::serve(listener, app) => {
            if let Err(err) = result {
                tracing::error!(error = %err, "server stopped");
                std::process::exit(1);
            }
        }
        _ = signal::ctrl_c() => {
            tracing::info!("ctrl+c signal received, shutting down");
        }
    }

    tracing::info!("ranoberead.svc going off");
}
