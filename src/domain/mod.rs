//! Database query modules.
//!
//! All functions use the generic Executor pattern, allowing them to work
//! with both `&PgPool` (for standalone queries) and `&mut PgConnection`
//! (for transactions).

pub mod favorites;
pub mod users;
pub mod videos;
