//! Validate command implementation

use super::Context;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidateError {
    #[error("{0} invalid definition(s) in catalog")]
    Invalid(usize),
}

/// Report every catalog definition and the problems of the rejected ones
pub fn validate_catalog(ctx: &Context) -> Result<(), ValidateError> {
    for (name, definition) in ctx.catalog.iter() {
        let def = definition.definition();
        let version = def
            .fixed_version()
            .map(str::to_string)
            .or_else(|| def.version_check_url().map(|url| format!("checked at {}", url)))
            .unwrap_or_default();
        println!("  ok       {} ({})", name, version);
    }

    for error in &ctx.rejected {
        println!("  invalid  {}", error);
    }

    println!();
    println!(
        "[nomad] {} valid, {} invalid definition(s)",
        ctx.catalog.len(),
        ctx.rejected.len()
    );

    if ctx.rejected.is_empty() {
        Ok(())
    } else {
        Err(ValidateError::Invalid(ctx.rejected.len()))
    }
}
