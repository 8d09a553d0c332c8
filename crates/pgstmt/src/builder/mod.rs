//! Fluent, parameter-safe statement builder for the Postgres positional
//! placeholder dialect (`$1`, `$2`, ...).
//!
//! ## Design
//!
//! - One builder per statement, owned and single-use; every configuration
//!   method takes and returns ownership so chains read naturally.
//! - Placeholders are numbered automatically in clause-rendering order.
//! - Validation is deferred: setters never panic and never fail mid-chain;
//!   the first error raised anywhere in the chain is returned by `build`.

pub mod ordered;
pub mod param;
pub mod statement;

pub use ordered::OrderedParams;
pub use param::{Param, ParamList};
pub use statement::{BuiltStatement, Mode, StatementBuilder};

/// Create an INSERT builder for the given table.
pub fn insert(table: &str) -> StatementBuilder {
    StatementBuilder::new().insert(table)
}

/// Create an UPDATE builder for the given table.
pub fn update(table: &str) -> StatementBuilder {
    StatementBuilder::new().update(table)
}

/// Create a DELETE builder for the given table.
pub fn delete(table: &str) -> StatementBuilder {
    StatementBuilder::new().delete(table)
}

/// Create a SELECT builder for the given table.
pub fn select(table: &str) -> StatementBuilder {
    StatementBuilder::new().select(table)
}

#[cfg(test)]
mod tests;
