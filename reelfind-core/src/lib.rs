//! Reelfind Core - Search state, persistence and configuration
//!
//! This crate provides the fundamental building blocks for the movie search
//! application: the search/pagination state machine, the durable key-value
//! store that survives restarts, the detail view state machine, and
//! configuration management.

pub mod config;
pub mod controller;
pub mod detail;
pub mod model;
pub mod session;
pub mod storage;
pub mod tracing_setup;

// Re-export main types for convenient access
pub use config::ReelfindConfig;
pub use controller::{LookupRequest, SearchController, SearchOutcome, SearchState};
pub use detail::{DetailOutcome, DetailView};
pub use model::{MovieDetail, MovieSummary, SearchPage, TypeFilter};
pub use session::PersistedSearch;
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore, StorageError};

/// Core errors that can bubble up from any Reelfind subsystem.
#[derive(Debug, thiserror::Error)]
pub enum ReelfindError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {reason}")]
    Configuration { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Web UI error: {reason}")]
    WebUI { reason: String },
}

impl ReelfindError {
    /// Returns a user-friendly error message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            ReelfindError::Storage(_) => "Saved search state could not be accessed".to_string(),
            ReelfindError::Configuration { .. } => "Configuration error occurred".to_string(),
            ReelfindError::Io(_) => "File system error occurred".to_string(),
            ReelfindError::WebUI { reason } => format!("Web interface error: {reason}"),
        }
    }

    /// Convert any displayable web server failure into a `ReelfindError`.
    pub fn from_web_ui_error(error: impl std::fmt::Display) -> Self {
        ReelfindError::WebUI {
            reason: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReelfindError>;
