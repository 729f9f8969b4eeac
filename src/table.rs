//! In-memory interaction table.
//!
//! Splitting only depends on grouping keys and a timestamp order, so the
//! table is a plain row-major container with named columns. Rows are opaque
//! payloads otherwise and are cloned, never rewritten, into output tables.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::config::ColumnConfig;
use crate::errors::SplitError;
use crate::types::{ColumnName, RowIndex};

/// A single cell value.
///
/// Values have a total order (`Null < Int < Float < Text < Time`, then by
/// payload) and a hash consistent with equality, so any column can act as a
/// grouping key or an ordering key.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Value {
    /// Missing value.
    Null,
    /// Integer identifier, rating, or epoch timestamp.
    Int(i64),
    /// Floating-point rating or score.
    Float(f64),
    /// String identifier.
    Text(String),
    /// UTC timestamp.
    Time(DateTime<Utc>),
}

impl Value {
    fn rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Int(_) => 1,
            Value::Float(_) => 2,
            Value::Text(_) => 3,
            Value::Time(_) => 4,
        }
    }

    /// Returns `true` for `Value::Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::Time(a), Value::Time(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            Value::Null => {}
            Value::Int(v) => v.hash(state),
            // `total_cmp` equality is bitwise equality, so hashing the bits agrees with `Eq`.
            Value::Float(v) => v.to_bits().hash(state),
            Value::Text(v) => v.hash(state),
            Value::Time(v) => v.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Text(v) => write!(f, "{v}"),
            Value::Time(v) => write!(f, "{}", v.to_rfc3339()),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Time(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// One table row; cells are positional and follow the table's column order.
pub type Row = Vec<Value>;

/// Ordered multiset of rows with a named-column schema.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<ColumnName>,
    rows: Vec<Row>,
}

impl Table {
    /// Create an empty table with the given column names.
    pub fn new<I, S>(columns: I) -> Result<Self, SplitError>
    where
        I: IntoIterator<Item = S>,
        S: Into<ColumnName>,
    {
        let columns: Vec<ColumnName> = columns.into_iter().map(Into::into).collect();
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(SplitError::SchemaMismatch(format!(
                    "duplicate column name '{column}'"
                )));
            }
        }
        Ok(Self {
            columns,
            rows: Vec::new(),
        })
    }

    /// Create a table and append `rows`, validating each row's width.
    pub fn from_rows<I, S>(columns: I, rows: Vec<Row>) -> Result<Self, SplitError>
    where
        I: IntoIterator<Item = S>,
        S: Into<ColumnName>,
    {
        let mut table = Self::new(columns)?;
        table.rows.reserve(rows.len());
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Build a four-column interaction table named after `columns`.
    ///
    /// Each tuple is `(user, item, rating, timestamp)`.
    pub fn from_interactions<I, U, T, R, S>(
        columns: &ColumnConfig,
        interactions: I,
    ) -> Result<Self, SplitError>
    where
        I: IntoIterator<Item = (U, T, R, S)>,
        U: Into<Value>,
        T: Into<Value>,
        R: Into<Value>,
        S: Into<Value>,
    {
        let mut table = Self::new([
            columns.user.clone(),
            columns.item.clone(),
            columns.rating.clone(),
            columns.timestamp.clone(),
        ])?;
        for (user, item, rating, timestamp) in interactions {
            table
                .rows
                .push(vec![user.into(), item.into(), rating.into(), timestamp.into()]);
        }
        Ok(table)
    }

    /// Append one row. Fails when the row width does not match the schema.
    pub fn push_row(&mut self, row: Row) -> Result<(), SplitError> {
        if row.len() != self.columns.len() {
            return Err(SplitError::SchemaMismatch(format!(
                "row {} has {} values, expected {}",
                self.rows.len(),
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Column names in schema order.
    pub fn columns(&self) -> &[ColumnName] {
        &self.columns
    }

    /// Resolve a column name to its position.
    pub fn column_index(&self, name: &str) -> Result<usize, SplitError> {
        self.columns
            .iter()
            .position(|column| column == name)
            .ok_or_else(|| SplitError::ColumnNotFound {
                column: name.to_string(),
                available: self.columns.clone(),
            })
    }

    /// Iterate the values of one column in row order.
    pub fn column<'a>(
        &'a self,
        name: &str,
    ) -> Result<impl Iterator<Item = &'a Value> + use<'a>, SplitError> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(move |row| &row[idx]))
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows in table order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Row at `idx`, if present.
    pub fn row(&self, idx: RowIndex) -> Option<&Row> {
        self.rows.get(idx)
    }

    /// Value at (`row`, column position), if present.
    pub fn value(&self, row: RowIndex, column: usize) -> Option<&Value> {
        self.rows.get(row).and_then(|cells| cells.get(column))
    }

    /// Empty table sharing this table's schema.
    pub fn empty_like(&self) -> Self {
        Self {
            columns: self.columns.clone(),
            rows: Vec::new(),
        }
    }

    /// New table holding the rows at `indices`, in the order given.
    ///
    /// Indices must be in bounds; splitters only pass indices derived from
    /// `0..self.len()`.
    pub fn take(&self, indices: &[RowIndex]) -> Self {
        Self {
            columns: self.columns.clone(),
            rows: indices.iter().map(|&idx| self.rows[idx].clone()).collect(),
        }
    }

    /// Concatenate tables sharing one schema, preserving part order then row order.
    pub fn concat<'a, I>(parts: I) -> Result<Self, SplitError>
    where
        I: IntoIterator<Item = &'a Table>,
    {
        let mut parts = parts.into_iter();
        let Some(first) = parts.next() else {
            return Ok(Self::default());
        };
        let mut out = first.clone();
        for part in parts {
            if part.columns != out.columns {
                return Err(SplitError::SchemaMismatch(format!(
                    "cannot concatenate columns [{}] onto [{}]",
                    part.columns.join(", "),
                    out.columns.join(", ")
                )));
            }
            out.rows.extend(part.rows.iter().cloned());
        }
        Ok(out)
    }
}
