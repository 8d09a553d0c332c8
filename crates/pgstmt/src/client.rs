//! Executor contract for running built statements.
//!
//! The builder never opens connections or manages transactions; it hands a
//! `(sql, positional args)` pair to whatever implements [`Executor`].

use crate::builder::{self, BuiltStatement};
use crate::error::{StmtError, StmtResult};
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

/// A trait that unifies database clients and transactions.
///
/// This allows helpers to accept either a direct client connection or a
/// transaction, making it easy to compose operations within transactions.
pub trait Executor: Send + Sync {
    /// Execute a statement and return all rows.
    fn query(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = StmtResult<Vec<Row>>> + Send;
}

impl Executor for tokio_postgres::Client {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> StmtResult<Vec<Row>> {
        tokio_postgres::Client::query(self, sql, params)
            .await
            .map_err(StmtError::from)
    }
}

impl Executor for tokio_postgres::Transaction<'_> {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> StmtResult<Vec<Row>> {
        tokio_postgres::Transaction::query(self, sql, params)
            .await
            .map_err(StmtError::from)
    }
}

/// Build the statement used by [`count_rows`]:
/// `SELECT count(id) FROM <table> WHERE id>=$1` with `$1 = 0`.
pub fn count_statement(table: &str) -> StmtResult<BuiltStatement> {
    builder::select(table)
        .returning(&["count(id)"])
        .cmp("id", ">=", 0i64)
        .build()
}

/// Count the rows of a table by `id`.
pub async fn count_rows(conn: &impl Executor, table: &str) -> StmtResult<i64> {
    let stmt = count_statement(table)?;
    let rows = conn.query(&stmt.sql, &stmt.params_ref()).await?;
    let row = rows
        .first()
        .ok_or_else(|| StmtError::not_found("Count query returned no rows"))?;
    row.try_get(0)
        .map_err(|e| StmtError::decode("count(id)", e.to_string()))
}
