//! The statement builder itself: mode handling, fluent setters, deferred
//! validation, and clause rendering.

use super::ordered::OrderedParams;
use super::param::{Param, ParamList};
use crate::error::{StmtError, StmtResult};
use tokio_postgres::types::ToSql;

/// Statement mode. Set exactly once by the corresponding entry method;
/// entry methods are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Insert,
    Update,
    Delete,
    Select,
}

impl Mode {
    fn is_set_capable(self) -> bool {
        matches!(self, Mode::Insert | Mode::Update)
    }

    fn is_where_capable(self) -> bool {
        matches!(self, Mode::Update | Mode::Delete | Mode::Select)
    }
}

/// A SET-clause entry: positionally bound, or raw SQL inserted verbatim
/// for values the database must compute.
#[derive(Debug, Clone)]
enum SetValue {
    Bound(Param),
    Verbatim(String),
}

/// A WHERE-clause entry: comparison operator plus bound value.
#[derive(Debug, Clone)]
struct WhereCond {
    op: String,
    value: Param,
}

/// Fluent builder for a single parameterized statement.
///
/// Owned and single-use: configuration methods take and return ownership,
/// [`StatementBuilder::build`] consumes the builder. Errors raised anywhere
/// in the chain are deferred into a write-once slot and surfaced only by
/// `build`; the first error wins and later ones are discarded.
#[derive(Debug, Default)]
pub struct StatementBuilder {
    /// Statement mode, None until an entry method runs
    mode: Option<Mode>,
    /// Target table
    table: String,
    /// SET/VALUES entries, combined insertion order across bound and verbatim
    set_params: OrderedParams<SetValue>,
    /// WHERE predicates; every key carries its operator by construction
    where_params: OrderedParams<WhereCond>,
    /// ORDER BY entries, column -> direction token
    order_by: OrderedParams<String>,
    /// Projection (SELECT) or RETURNING columns
    returning: Vec<String>,
    /// LIMIT, 0 = unset
    limit: u64,
    /// WHERE 1=1 opt-in
    match_all: bool,
    /// Deferred error slot (write-once, first error wins)
    err: Option<StmtError>,
}

/// The output of a successful build.
#[derive(Debug)]
pub struct BuiltStatement {
    /// Rendered statement text with `$1..$N` placeholders
    pub sql: String,
    /// Bound values in positional order
    pub params: ParamList,
    /// Column names parallel to `params`
    pub param_names: Vec<String>,
    /// Projection / RETURNING column names
    pub returning: Vec<String>,
}

impl BuiltStatement {
    /// Get the bound values as references for tokio-postgres.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.as_refs()
    }
}

fn defer(slot: &mut Option<StmtError>, err: StmtError) {
    if slot.is_none() {
        *slot = Some(err);
    }
}

impl StatementBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn defer_err(&mut self, err: StmtError) {
        defer(&mut self.err, err);
    }

    fn enter(mut self, mode: Mode, table: &str) -> Self {
        if self.mode.is_some() {
            self.defer_err(StmtError::ModeAlreadySet);
            return self;
        }
        self.mode = Some(mode);
        self.table = table.trim().to_string();
        if self.table.is_empty() {
            self.defer_err(StmtError::MissingTable);
        }
        self
    }

    /// Start an INSERT statement.
    pub fn insert(self, table: &str) -> Self {
        self.enter(Mode::Insert, table)
    }

    /// Start an UPDATE statement.
    pub fn update(self, table: &str) -> Self {
        self.enter(Mode::Update, table)
    }

    /// Start a DELETE statement.
    pub fn delete(self, table: &str) -> Self {
        self.enter(Mode::Delete, table)
    }

    /// Start a SELECT statement.
    pub fn select(self, table: &str) -> Self {
        self.enter(Mode::Select, table)
    }

    /// Set a column value (INSERT/UPDATE only). Setting the same column
    /// twice overwrites the value without moving the column's position.
    pub fn set<T>(mut self, column: &str, value: T) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        if self.mode.is_some_and(Mode::is_set_capable) {
            self.set_params
                .insert(column, SetValue::Bound(Param::new(value)));
        } else {
            self.defer_err(StmtError::InvalidMode { op: "set" });
        }
        self
    }

    /// Set several column values at once. Values share one `ToSql` type per
    /// call; mix types by chaining [`StatementBuilder::set`] calls.
    pub fn set_many<'a, T, I>(mut self, entries: I) -> Self
    where
        T: ToSql + Send + Sync + 'static,
        I: IntoIterator<Item = (&'a str, T)>,
    {
        for (column, value) in entries {
            self = self.set(column, value);
        }
        self
    }

    /// Set a column to a raw SQL expression, bypassing positional binding.
    /// The fragment is rendered verbatim and contributes no bound argument.
    ///
    /// # Safety
    ///
    /// This directly concatenates SQL. The caller must ensure safety.
    pub fn set_raw(mut self, column: &str, expr: &str) -> Self {
        if self.mode.is_some_and(Mode::is_set_capable) {
            self.set_params
                .insert(column, SetValue::Verbatim(expr.to_string()));
        } else {
            self.defer_err(StmtError::InvalidMode { op: "set_raw" });
        }
        self
    }

    /// Add an equality predicate (`column=$N`). Not available for INSERT.
    pub fn eq<T>(self, column: &str, value: T) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        self.add_where("eq", column, "=", value)
    }

    /// Add a predicate with an explicit comparison operator (`>=`, `<>`,
    /// `LIKE`, ...). The operator is rendered verbatim between the column
    /// and its placeholder.
    pub fn cmp<T>(mut self, column: &str, op: &str, value: T) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        let op = op.trim();
        if op.is_empty() {
            self.defer_err(StmtError::MissingOperator {
                column: column.to_string(),
            });
        }
        self.add_where("cmp", column, op, value)
    }

    fn add_where<T>(mut self, name: &'static str, column: &str, op: &str, value: T) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        if self.mode.is_some_and(Mode::is_where_capable) {
            self.where_params.insert(
                column,
                WhereCond {
                    op: op.to_string(),
                    value: Param::new(value),
                },
            );
        } else {
            self.defer_err(StmtError::InvalidMode { op: name });
        }
        self
    }

    /// Opt in to a predicate that always matches (`WHERE 1=1`), for callers
    /// that want every row. Bypasses the missing-where-clause error and
    /// contributes no bound arguments.
    pub fn match_all(mut self) -> Self {
        if self.mode.is_some_and(Mode::is_where_capable) {
            self.match_all = true;
        } else {
            self.defer_err(StmtError::InvalidMode { op: "match_all" });
        }
        self
    }

    /// Append an ORDER BY entry (SELECT only). Both column and direction
    /// are required.
    pub fn order_by(mut self, column: &str, direction: &str) -> Self {
        if self.mode != Some(Mode::Select) {
            self.defer_err(StmtError::InvalidMode { op: "order_by" });
            return self;
        }
        let column = column.trim();
        let direction = direction.trim();
        if column.is_empty() {
            self.defer_err(StmtError::MissingOrderByColumn);
        }
        if direction.is_empty() {
            self.defer_err(StmtError::MissingOrderByDirection);
        }
        self.order_by.insert(column, direction.to_string());
        self
    }

    /// Set the projection columns (SELECT, required) or the RETURNING list
    /// (INSERT/UPDATE/DELETE, optional). Column names are used verbatim.
    pub fn returning(mut self, columns: &[&str]) -> Self {
        self.returning = columns.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Set the row limit (SELECT only; 0 = unset). Unlike the other
    /// mode-restricted setters this one cannot check the mode immediately —
    /// an entry method may legitimately run after it — so a positive limit
    /// under any non-SELECT mode is reported as `LimitNotSupported` by
    /// `build`.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    /// Render the statement and consume the builder.
    ///
    /// Returns the statement text, bound values in positional order, and the
    /// projection/RETURNING columns. On any deferred error, returns that
    /// error and nothing else; a partially valid statement is never handed
    /// back alongside an error.
    pub fn build(self) -> StmtResult<BuiltStatement> {
        let StatementBuilder {
            mode,
            table,
            set_params,
            where_params,
            order_by,
            returning,
            limit,
            match_all,
            mut err,
        } = self;

        let mut params = ParamList::new();
        let mut names = Vec::new();

        let sql = match mode {
            Some(Mode::Select) => {
                let mut sql = format!(
                    "SELECT {} FROM {} WHERE ",
                    projection_clause(&returning, &mut err),
                    table
                );
                sql.push_str(&where_clause(
                    &where_params,
                    match_all,
                    &mut params,
                    &mut names,
                    &mut err,
                ));
                sql.push_str(&order_by_clause(&order_by, &mut err));
                if limit > 0 {
                    sql.push_str(&format!(" LIMIT {limit}"));
                }
                sql
            }
            Some(Mode::Insert) => {
                let mut sql = format!("INSERT INTO {table} ");
                sql.push_str(&values_clause(&set_params, &mut params, &mut names, &mut err));
                sql.push_str(&returning_clause(&returning));
                sql
            }
            Some(Mode::Update) => {
                let mut sql = format!("UPDATE {table} SET ");
                // SET is rendered before WHERE, so SET values take the lower
                // placeholder numbers regardless of fluent call order.
                sql.push_str(&set_clause(&set_params, &mut params, &mut names, &mut err));
                sql.push_str(" WHERE ");
                sql.push_str(&where_clause(
                    &where_params,
                    match_all,
                    &mut params,
                    &mut names,
                    &mut err,
                ));
                sql.push_str(&returning_clause(&returning));
                sql
            }
            Some(Mode::Delete) => {
                let mut sql = format!("DELETE FROM {table} WHERE ");
                sql.push_str(&where_clause(
                    &where_params,
                    match_all,
                    &mut params,
                    &mut names,
                    &mut err,
                ));
                sql.push_str(&returning_clause(&returning));
                sql
            }
            None => {
                defer(&mut err, StmtError::InvalidMode { op: "build" });
                String::new()
            }
        };

        if limit > 0 && mode != Some(Mode::Select) {
            defer(&mut err, StmtError::LimitNotSupported);
        }

        match err {
            Some(err) => Err(err),
            None => Ok(BuiltStatement {
                sql,
                params,
                param_names: names,
                returning,
            }),
        }
    }
}

/// `(c1, c2) VALUES ($1, expr, ...)` for INSERT. Verbatim entries render
/// their fragment in place of a placeholder and bind nothing.
fn values_clause(
    set_params: &OrderedParams<SetValue>,
    params: &mut ParamList,
    names: &mut Vec<String>,
    err: &mut Option<StmtError>,
) -> String {
    if set_params.is_empty() {
        defer(err, StmtError::MissingSetClause);
    }

    let mut columns = String::from("(");
    let mut values = String::from("VALUES (");
    for (index, column) in set_params.keys().enumerate() {
        let Some(value) = set_params.get(column) else {
            defer(
                err,
                StmtError::IncompleteParameters {
                    column: column.to_string(),
                },
            );
            continue;
        };
        if index > 0 {
            columns.push_str(", ");
            values.push_str(", ");
        }
        columns.push_str(column);
        match value {
            SetValue::Bound(param) => {
                let n = params.push(param.clone());
                names.push(column.to_string());
                values.push_str(&format!("${n}"));
            }
            SetValue::Verbatim(expr) => values.push_str(expr),
        }
    }
    columns.push_str(") ");
    values.push(')');
    columns.push_str(&values);
    columns
}

/// `c1=$1,c2=expr` for UPDATE.
fn set_clause(
    set_params: &OrderedParams<SetValue>,
    params: &mut ParamList,
    names: &mut Vec<String>,
    err: &mut Option<StmtError>,
) -> String {
    if set_params.is_empty() {
        defer(err, StmtError::MissingSetClause);
    }

    let mut sql = String::new();
    for (index, column) in set_params.keys().enumerate() {
        let Some(value) = set_params.get(column) else {
            defer(
                err,
                StmtError::IncompleteParameters {
                    column: column.to_string(),
                },
            );
            continue;
        };
        if index > 0 {
            sql.push(',');
        }
        match value {
            SetValue::Bound(param) => {
                let n = params.push(param.clone());
                names.push(column.to_string());
                sql.push_str(&format!("{column}=${n}"));
            }
            SetValue::Verbatim(expr) => sql.push_str(&format!("{column}={expr}")),
        }
    }
    sql
}

/// Conjunction of predicates, `a=$1 AND b>=$2`; `1=1` under the match-all
/// opt-in when no predicate was added.
fn where_clause(
    where_params: &OrderedParams<WhereCond>,
    match_all: bool,
    params: &mut ParamList,
    names: &mut Vec<String>,
    err: &mut Option<StmtError>,
) -> String {
    if where_params.is_empty() {
        if match_all {
            return "1=1".to_string();
        }
        defer(err, StmtError::MissingWhereClause);
        return String::new();
    }

    let mut sql = String::new();
    for (index, column) in where_params.keys().enumerate() {
        let Some(cond) = where_params.get(column) else {
            defer(
                err,
                StmtError::IncompleteParameters {
                    column: column.to_string(),
                },
            );
            continue;
        };
        if index > 0 {
            sql.push_str(" AND ");
        }
        let n = params.push(cond.value.clone());
        names.push(column.to_string());
        sql.push_str(&format!("{column}{}${n}", cond.op));
    }
    sql
}

fn order_by_clause(order_by: &OrderedParams<String>, err: &mut Option<StmtError>) -> String {
    if order_by.is_empty() {
        return String::new();
    }
    let mut sql = String::from(" ORDER BY ");
    for (index, column) in order_by.keys().enumerate() {
        let Some(direction) = order_by.get(column) else {
            defer(
                err,
                StmtError::IncompleteParameters {
                    column: column.to_string(),
                },
            );
            continue;
        };
        if index > 0 {
            sql.push_str(", ");
        }
        sql.push_str(&format!("{column} {direction}"));
    }
    sql
}

/// SELECT projection list; required, unlike RETURNING.
fn projection_clause(returning: &[String], err: &mut Option<StmtError>) -> String {
    if returning.is_empty() {
        defer(err, StmtError::MissingProjection);
    }
    returning.join(", ")
}

fn returning_clause(returning: &[String]) -> String {
    if returning.is_empty() {
        String::new()
    } else {
        format!(" RETURNING {}", returning.join(", "))
    }
}
