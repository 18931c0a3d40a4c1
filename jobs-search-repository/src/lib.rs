//! # Jobs Search Repository
//!
//! This crate turns search options into structured index requests, projects
//! index hits into public results, and pages through the index for a source's
//! external ids. It defines the `SearchEngineClient` and `GeocodeLookup`
//! traits and a concrete implementation of both for OpenSearch.

pub mod clause;
pub mod client;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod pager;
pub mod projector;
pub mod query_builder;
pub mod types;

pub use client::PositionOpeningClient;
pub use config::IndexConfig;
pub use errors::SearchError;
pub use interfaces::{GeocodeLookup, SearchEngineClient};
pub use opensearch::{OpenSearchClient, OpenSearchGeocoder};
pub use query_builder::build_search_request;
pub use types::{SearchHit, SearchHits};
