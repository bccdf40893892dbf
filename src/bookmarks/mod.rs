//! Bookmarks Module
//!
//! CRUD over a single `bookmarks` table: title, URL, description and a
//! 1 to 5 rating per row.
//!
//! # Layout
//!
//! - [`store`]: row-level access, no business rules
//! - [`validate`]: request bodies in, typed inputs (or a [`ValidationError`]) out
//! - handlers and routes: validation, store calls and sanitized output, wired
//!   under `/bookmarks`
//!
//! # Usage
//!
//! ```rust,ignore
//! use bookmarks_api::bookmarks;
//!
//! let app = Router::new()
//!     .nest("/api", bookmarks::routes())
//!     .with_state(app_state);
//! ```
//!
//! [`ValidationError`]: crate::error::ValidationError

mod handler;
mod routes;
pub mod store;
pub mod validate;

pub use routes::routes;
pub use store::Bookmarks;

/// Schema migrations owned by this module, applied by [`crate::db::Database`]
/// at startup.
pub fn migrations() -> &'static [(&'static str, &'static str)] {
    &[("bookmarks_001_schema.sql", include_str!("migrations/001_schema.sql"))]
}
