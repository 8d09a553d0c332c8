//! Row-to-map scanning over a generic result-set cursor.

use crate::error::{StmtError, StmtResult};
use std::collections::HashMap;
use tokio_postgres::Row;
use tokio_postgres::types::{FromSql, Type};

/// A raw scanned value in its dialect-native shape.
///
/// Integer widths collapse to `i64` and float widths to `f64`; types outside
/// the mapped set fall back to their wire bytes.
#[derive(Debug, Clone, PartialEq)]
pub enum PgValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Uuid(uuid::Uuid),
    Json(serde_json::Value),
    Timestamp(chrono::NaiveDateTime),
    TimestampTz(chrono::DateTime<chrono::Utc>),
}

impl PgValue {
    pub fn is_null(&self) -> bool {
        matches!(self, PgValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PgValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            PgValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PgValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl<'a> FromSql<'a> for PgValue {
    fn from_sql(
        ty: &Type,
        raw: &'a [u8],
    ) -> Result<Self, Box<dyn std::error::Error + Sync + Send>> {
        let value = if *ty == Type::BOOL {
            PgValue::Bool(bool::from_sql(ty, raw)?)
        } else if *ty == Type::INT2 {
            PgValue::Int(i16::from_sql(ty, raw)? as i64)
        } else if *ty == Type::INT4 {
            PgValue::Int(i32::from_sql(ty, raw)? as i64)
        } else if *ty == Type::INT8 {
            PgValue::Int(i64::from_sql(ty, raw)?)
        } else if *ty == Type::FLOAT4 {
            PgValue::Float(f32::from_sql(ty, raw)? as f64)
        } else if *ty == Type::FLOAT8 {
            PgValue::Float(f64::from_sql(ty, raw)?)
        } else if *ty == Type::TEXT
            || *ty == Type::VARCHAR
            || *ty == Type::BPCHAR
            || *ty == Type::NAME
        {
            PgValue::Text(String::from_sql(ty, raw)?)
        } else if *ty == Type::UUID {
            PgValue::Uuid(uuid::Uuid::from_sql(ty, raw)?)
        } else if *ty == Type::JSON || *ty == Type::JSONB {
            PgValue::Json(serde_json::Value::from_sql(ty, raw)?)
        } else if *ty == Type::TIMESTAMP {
            PgValue::Timestamp(chrono::NaiveDateTime::from_sql(ty, raw)?)
        } else if *ty == Type::TIMESTAMPTZ {
            PgValue::TimestampTz(chrono::DateTime::<chrono::Utc>::from_sql(ty, raw)?)
        } else {
            PgValue::Bytes(raw.to_vec())
        };
        Ok(value)
    }

    fn from_sql_null(_: &Type) -> Result<Self, Box<dyn std::error::Error + Sync + Send>> {
        Ok(PgValue::Null)
    }

    fn accepts(_: &Type) -> bool {
        true
    }
}

/// A cursor-like result set: column-name introspection plus forward
/// iteration yielding one raw value per column per row.
pub trait Cursor {
    /// Column names, in result order.
    fn columns(&self) -> &[String];

    /// Advance to the next row, returning its values or `None` at the end.
    fn try_next(&mut self) -> StmtResult<Option<Vec<PgValue>>>;
}

/// [`Cursor`] over materialized tokio-postgres rows.
pub struct RowCursor {
    columns: Vec<String>,
    rows: std::vec::IntoIter<Row>,
}

impl RowCursor {
    pub fn new(rows: Vec<Row>) -> Self {
        let columns = rows
            .first()
            .map(|row| row.columns().iter().map(|c| c.name().to_string()).collect())
            .unwrap_or_default();
        Self {
            columns,
            rows: rows.into_iter(),
        }
    }
}

impl Cursor for RowCursor {
    fn columns(&self) -> &[String] {
        &self.columns
    }

    fn try_next(&mut self) -> StmtResult<Option<Vec<PgValue>>> {
        let Some(row) = self.rows.next() else {
            return Ok(None);
        };
        let mut values = Vec::with_capacity(self.columns.len());
        for (index, column) in self.columns.iter().enumerate() {
            let value: PgValue = row
                .try_get(index)
                .map_err(|e| StmtError::decode(column, e.to_string()))?;
            values.push(value);
        }
        Ok(Some(values))
    }
}

/// Scan up to `limit` rows into column-name -> value mappings.
/// A limit of 0 means unlimited; scanning stops early once the limit is hit.
pub fn scan_to_map(
    cursor: &mut impl Cursor,
    limit: usize,
) -> StmtResult<Vec<HashMap<String, PgValue>>> {
    let columns = cursor.columns().to_vec();
    let mut res = Vec::new();
    while let Some(values) = cursor.try_next()? {
        let mapping: HashMap<String, PgValue> = columns.iter().cloned().zip(values).collect();
        res.push(mapping);
        if limit != 0 && res.len() >= limit {
            break;
        }
    }
    Ok(res)
}

/// Scan exactly one row; zero rows is an error.
pub fn scan_one_to_map(cursor: &mut impl Cursor) -> StmtResult<HashMap<String, PgValue>> {
    scan_to_map(cursor, 1)?
        .into_iter()
        .next()
        .ok_or_else(|| StmtError::not_found("No matches found"))
}
