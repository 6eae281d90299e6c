//! Application catalog: definitions, parsing and validation

mod parser;
mod registry;
mod schema;
mod validate;

pub use parser::*;
pub use registry::*;
pub use schema::*;
pub use validate::*;
