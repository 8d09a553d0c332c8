//! Bound-value storage for positional parameters.

use std::sync::Arc;
use tokio_postgres::types::ToSql;

/// A bound value, captured once when the fluent setter runs.
///
/// The Arc keeps `Param` cheaply cloneable, which the renderer relies on
/// when it copies values out of the ordered collections into the final
/// positional list.
#[derive(Clone)]
pub struct Param(pub(crate) Arc<dyn ToSql + Send + Sync>);

impl Param {
    /// Wrap any ToSql value.
    pub fn new<T: ToSql + Send + Sync + 'static>(value: T) -> Self {
        Param(Arc::new(value))
    }

    /// Borrow the value in the shape tokio-postgres wants. Dropping `Send`
    /// from the stored trait object's bounds is a pure narrowing.
    pub fn as_ref(&self) -> &(dyn ToSql + Sync) {
        &*self.0 as &(dyn ToSql + Sync)
    }
}

// The wrapped value is opaque; only the fact that a binding exists is shown.
impl std::fmt::Debug for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Param(<dyn ToSql>)")
    }
}

/// The positional argument vector of a built statement.
///
/// The Nth value pushed corresponds to placeholder `$N` in the rendered SQL.
#[derive(Clone, Debug, Default)]
pub struct ParamList {
    params: Vec<Param>,
}

impl ParamList {
    /// Create a new empty parameter list.
    pub fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Add a pre-wrapped Param and return its 1-based index.
    pub fn push(&mut self, param: Param) -> usize {
        self.params.push(param);
        self.params.len()
    }

    /// Get the current parameter count.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Get all parameters as references for tokio-postgres.
    pub fn as_refs(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.iter().map(|p| p.as_ref()).collect()
    }
}
