//! The client-facing catalog engine: filtering, search/ranking, pagination
//! and third-party embed lifecycle over an in-memory video list.
//!
//! Everything here is synchronous and re-derived from view state; the only
//! side effects are script-tag mutations behind the [`embeds::ScriptHost`]
//! trait.

pub mod embeds;
pub mod filter;
pub mod pagination;
pub mod search;
pub mod store;
