//! # Jobs Search Ingest
//!
//! This crate provides the ingest components for turning raw position
//! opening records into indexed documents.
//!
//! ## Architecture
//!
//! The ingest follows the Processor-Loader pattern:
//!
//! 1. **Processor**: Builds documents from records and geocodes locations
//! 2. **Loader**: Bulk indexes documents and refreshes the index
//! 3. **Orchestrator**: Runs a batch of records through both

pub mod errors;
pub mod loader;
pub mod orchestrator;
pub mod processor;

pub use errors::IngestError;
pub use loader::SearchLoader;
pub use orchestrator::PositionOpeningImporter;
pub use processor::{normalize_city, OpeningProcessor, CATCHALL_THRESHOLD};
