//! Storage management for nomad

mod download;
pub mod paths;

pub use download::*;
pub use paths::*;
