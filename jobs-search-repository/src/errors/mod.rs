//! Error types for the search repository.

mod search_error;

pub use search_error::SearchError;
