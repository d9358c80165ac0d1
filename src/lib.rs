pub mod api;
pub mod bookmarks;
pub mod chapters;
pub mod config;
pub mod db;
pub mod error;
pub mod handler;
pub mod model;
pub mod ranobe;
pub mod router;
pub mod store;
