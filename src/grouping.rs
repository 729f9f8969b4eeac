//! Stable group-by over table rows.
//!
//! Groups are keyed by a column value and hold row indices in table order.
//! Group iteration order is the order in which each key first appears, so
//! downstream concatenation is reproducible without sorting keys.

use indexmap::IndexMap;

use crate::errors::SplitError;
use crate::table::{Table, Value};
use crate::types::RowIndex;

/// Key -> row indices (ascending), in first-appearance order of the keys.
pub type RowGroups<'a> = IndexMap<&'a Value, Vec<RowIndex>>;

/// Group the rows of `table` by the values in `column`.
pub fn group_rows<'a>(table: &'a Table, column: &str) -> Result<RowGroups<'a>, SplitError> {
    let mut groups: RowGroups<'a> = IndexMap::new();
    for (idx, key) in table.column(column)?.enumerate() {
        groups.entry(key).or_default().push(idx);
    }
    Ok(groups)
}

/// Per-key row counts, in first-appearance order of the keys.
pub fn group_sizes<'a>(
    table: &'a Table,
    column: &str,
) -> Result<IndexMap<&'a Value, usize>, SplitError> {
    let mut sizes: IndexMap<&'a Value, usize> = IndexMap::new();
    for key in table.column(column)? {
        *sizes.entry(key).or_default() += 1;
    }
    Ok(sizes)
}
