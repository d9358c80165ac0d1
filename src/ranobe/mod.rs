//! Ranobe (work) endpoints
//!
//! Works are stored without their chapters. Both read endpoints join the
//! chapters in at read time with one extra query per work, so a concurrent
//! chapter write may or may not be visible in the result.

mod handler;
mod routes;

pub use routes::routes;
