//! Configuration for the jobs search binary.

mod dependencies;

pub use dependencies::{index_config_from, Dependencies};
