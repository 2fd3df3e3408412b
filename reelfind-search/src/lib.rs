//! Reelfind Search - Movie lookup over the OMDb HTTP API

#![deny(missing_docs)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
//!
//! Provides paginated title search and per-title detail lookup behind a
//! provider trait, so the HTTP client can be swapped for scripted fakes in
//! tests and demos.

pub mod client;
pub mod errors;
pub mod providers;

// Re-export main types
pub use client::MovieLookupService;
pub use errors::MovieLookupError;
pub use providers::{DemoProvider, MovieLookupProvider, OmdbProvider};

/// Convenience type alias for Results with MovieLookupError.
pub type Result<T> = std::result::Result<T, MovieLookupError>;
