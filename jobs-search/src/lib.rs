//! # Jobs Search
//!
//! Main library for the position opening search service.
//!
//! This crate provides the configuration and dependency wiring used by the
//! `jobs-search` command line tool.

pub mod config;

pub use config::Dependencies;

use thiserror::Error;

/// Errors that can occur during start-up or while running a command.
#[derive(Error, Debug)]
pub enum IndexingError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Ingest error.
    #[error("Ingest error: {0}")]
    IngestError(#[from] jobs_search_ingest::IngestError),

    /// Search error.
    #[error("Search error: {0}")]
    SearchError(#[from] jobs_search_repository::SearchError),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Malformed input or output JSON.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl IndexingError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
