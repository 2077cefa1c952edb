//! SEOScribe — typed client and CLI for an AI content-optimization
//! backend: keyword suggestion (optionally trend-verified), SEO rewrite,
//! metadata, JSON-LD schema, and social-post drafting.
//!
//! The backend owns all generation and trend classification; this crate
//! owns the contracts, the timeout-guarded executor, the retry policy,
//! and the persisted session state.

pub mod cache;
pub mod client;
pub mod commands;
pub mod config;
pub mod models;
