//! Processor module for position opening ingest.
//!
//! Transforms raw records into search documents.

mod opening_processor;

pub use opening_processor::{normalize_city, OpeningProcessor, CATCHALL_THRESHOLD};
