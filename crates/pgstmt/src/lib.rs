//! # pgstmt
//!
//! A fluent, parameter-safe statement builder for the Postgres positional
//! placeholder dialect (`$1`, `$2`, ...), plus a thin row-to-map scanning
//! layer over a generic cursor.
//!
//! ## Features
//!
//! - **One builder, four modes**: INSERT / UPDATE / DELETE / SELECT through
//!   mutually exclusive entry methods on a single single-use builder
//! - **Automatic numbering**: placeholders follow clause-rendering order, so
//!   the Nth bound value is always `$N`
//! - **Deferred validation**: setters never fail mid-chain; the first error
//!   raised anywhere surfaces from `build()`
//! - **Safe defaults**: SELECT/UPDATE/DELETE require a WHERE predicate
//!   unless `match_all()` is explicitly opted into
//!
//! ## Example
//!
//! ```ignore
//! use pgstmt::{insert, select};
//!
//! let stmt = insert("users")
//!     .set("username", "alice")
//!     .set("active", true)
//!     .returning(&["id"])
//!     .build()?;
//! assert_eq!(
//!     stmt.sql,
//!     "INSERT INTO users (username, active) VALUES ($1, $2) RETURNING id"
//! );
//!
//! let stmt = select("users")
//!     .returning(&["id", "username"])
//!     .eq("active", true)
//!     .order_by("username", "ASC")
//!     .limit(20)
//!     .build()?;
//! let rows = client.query(&stmt.sql, &stmt.params_ref()).await?;
//! ```

pub mod builder;
pub mod client;
pub mod error;
pub mod row;

pub use builder::{
    BuiltStatement, Mode, OrderedParams, Param, ParamList, StatementBuilder, delete, insert,
    select, update,
};
pub use client::{Executor, count_rows, count_statement};
pub use error::{StmtError, StmtResult};
pub use row::{Cursor, PgValue, RowCursor, scan_one_to_map, scan_to_map};
