//! Interface definitions for the search engine and geocoder.
//!
//! These traits allow dependency injection of the backend so the query
//! building, paging and ingest logic can be tested against mocks.

mod geocode_lookup;
mod search_engine_client;

pub use geocode_lookup::GeocodeLookup;
pub use search_engine_client::SearchEngineClient;
