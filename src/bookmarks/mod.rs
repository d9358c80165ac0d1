//! Bookmark endpoints. A work holds at most one bookmark; posting again moves it.

mod handler;
mod routes;

pub use routes::routes;
