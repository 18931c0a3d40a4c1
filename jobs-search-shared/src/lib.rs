//! # Jobs Search Shared
//!
//! Plain data types shared by the search, ingest and binary crates:
//! index documents and raw feed records, search options, the parsed query
//! model and the public result projection.

pub mod document;
pub mod location;
pub mod options;
pub mod query;
pub mod result;

pub use document::{document_id, GeoPoint, Location, PositionOpening, PositionOpeningRecord};
pub use location::{state_code, QueryLocation};
pub use options::{SearchOptions, DEFAULT_SORT_FIELD, MAX_RETURNED_DOCUMENTS};
pub use query::{OrganizationFormat, Query};
pub use result::{position_opening_url, PositionOpeningResult};
