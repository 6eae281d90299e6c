//! CLI command handlers

mod context;
mod list;
mod status;
mod validate;

pub use context::*;
pub use list::*;
pub use status::*;
pub use validate::*;
