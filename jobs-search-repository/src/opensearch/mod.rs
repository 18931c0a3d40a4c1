//! OpenSearch implementation of the search engine client and geocoder.
//!
//! This module provides concrete implementations of `SearchEngineClient`
//! and `GeocodeLookup` using OpenSearch as the backend.

mod client;
mod geocoder;
pub mod index_config;
pub mod queries;

pub use client::OpenSearchClient;
pub use geocoder::OpenSearchGeocoder;
