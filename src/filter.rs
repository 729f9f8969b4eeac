//! Minimum-count group filter.

use tracing::{debug, warn};

use crate::config::{ColumnConfig, FilterBy};
use crate::constants::splits::{LOG_FILTER, MIN_EFFECTIVE_RATING_FILTER};
use crate::errors::SplitError;
use crate::grouping::group_sizes;
use crate::table::Table;
use crate::types::RowIndex;

/// Keep only rows whose user (or item) group has at least `min_rating` rows.
///
/// Counts are taken once over the input; dropping items never shrinks user
/// counts in the same pass. Retained rows keep their original order. A
/// threshold of `0` or `1` returns the input unchanged, and a threshold above
/// every group's size returns an empty table with the same schema.
pub fn min_rating_filter(
    table: &Table,
    min_rating: usize,
    filter_by: FilterBy,
    columns: &ColumnConfig,
) -> Result<Table, SplitError> {
    let column = columns.key_column(filter_by);
    let sizes = group_sizes(table, column)?;
    if min_rating <= MIN_EFFECTIVE_RATING_FILTER {
        return Ok(table.clone());
    }

    let keep: Vec<RowIndex> = table
        .column(column)?
        .enumerate()
        .filter(|(_, key)| sizes.get(*key).is_some_and(|count| *count >= min_rating))
        .map(|(idx, _)| idx)
        .collect();

    let kept_groups = sizes.values().filter(|count| **count >= min_rating).count();
    if keep.is_empty() && !table.is_empty() {
        warn!(
            "{LOG_FILTER} min_rating={min_rating} by {filter_by} removed all {} rows ({} groups)",
            table.len(),
            sizes.len()
        );
    } else {
        debug!(
            "{LOG_FILTER} min_rating={min_rating} by {filter_by}: kept {}/{} rows in {kept_groups}/{} groups",
            keep.len(),
            table.len(),
            sizes.len()
        );
    }
    Ok(table.take(&keep))
}
