use thiserror::Error;

use crate::types::ColumnName;

/// Error type for ratio specification, schema, and column lookup failures.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SplitError {
    /// Ratio or option value that cannot describe a split.
    #[error("invalid split specification: {0}")]
    InvalidSpec(String),
    /// Named column is absent from the table.
    #[error("column '{column}' not found (available: {})", .available.join(", "))]
    ColumnNotFound {
        /// Requested column name.
        column: ColumnName,
        /// Columns the table does have, in schema order.
        available: Vec<ColumnName>,
    },
    /// Duplicate column names, row width mismatch, or incompatible schemas.
    #[error("table schema mismatch: {0}")]
    SchemaMismatch(String),
}
