//! Error types for pgstmt

use thiserror::Error;

/// Result type alias for pgstmt operations
pub type StmtResult<T> = Result<T, StmtError>;

/// Error types for statement construction and row mapping
#[derive(Debug, Error)]
pub enum StmtError {
    /// Entry method called with an empty/whitespace table identifier
    #[error("Table name has to be specified")]
    MissingTable,

    /// A second entry method was called on a builder whose mode is already set
    #[error("Statement mode already set")]
    ModeAlreadySet,

    /// A mode-restricted method was called while the builder is in an
    /// incompatible mode (or before any entry method)
    #[error("In this mode usage of {op} is not appropriate")]
    InvalidMode { op: &'static str },

    /// INSERT/UPDATE built with no set parameters
    #[error("No insertion or update parameters passed")]
    MissingSetClause,

    /// SELECT/UPDATE/DELETE built with no where predicate and no match-all opt-in
    #[error("Where clause has to be specified")]
    MissingWhereClause,

    /// SELECT built with no projection columns
    #[error("Returning params have to be specified")]
    MissingProjection,

    /// Explicit relationship call with an empty operator string
    #[error("Relationship is not defined for column '{column}'")]
    MissingOperator { column: String },

    /// ORDER BY called with an empty column
    #[error("OrderBy column is not defined")]
    MissingOrderByColumn,

    /// ORDER BY called with an empty direction token
    #[error("OrderBy direction is not defined")]
    MissingOrderByDirection,

    /// LIMIT set on a non-SELECT statement
    #[error("Limit clause only supported for select")]
    LimitNotSupported,

    /// A parameter key is present but its value lookup failed during rendering
    #[error("Incomplete parameter state for column '{column}'")]
    IncompleteParameters { column: String },

    /// Row not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Row decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Query execution error
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),
}

impl StmtError {
    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this error was deferred by the builder (as opposed to
    /// execution or row-mapping failures)
    pub fn is_build_error(&self) -> bool {
        !matches!(self, Self::NotFound(_) | Self::Decode { .. } | Self::Query(_))
    }
}
