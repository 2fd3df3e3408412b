//! Reelfind Web - Server-rendered search UI and JSON API
//!
//! All pages are server-side rendered HTML; the same search controller also
//! backs a small JSON API for programmatic access.

pub mod components;
pub mod handlers;
pub mod server;

pub use server::{AppState, build_router, run_server};
