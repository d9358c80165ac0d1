//! Chapter endpoints
//!
//! A chapter is addressed by its natural key `(ranobe_id, chapter_id)`.
//! Creation and full overwrite share one upsert; the translated title and
//! body can also be replaced on their own.

mod handler;
mod routes;

pub use routes::routes;
