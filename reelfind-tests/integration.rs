//! Integration tests for Reelfind
//!
//! These tests verify the interaction between the search controller, the
//! lookup service, durable storage, and the web routes as a whole.

#[path = "integration/support.rs"]
mod support;

#[path = "integration/search_flow.rs"]
mod search_flow;

#[path = "integration/persistence.rs"]
mod persistence;

#[path = "integration/detail_flow.rs"]
mod detail_flow;

#[path = "integration/web_routes.rs"]
mod web_routes;
