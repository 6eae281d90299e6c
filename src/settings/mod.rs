//! User settings and catalog assembly

mod config;
mod sources;

pub use config::*;
pub use sources::*;
