//! Proportional allocation of row counts across N-way splits.
//!
//! Every splitter funnels its row-count math through [`allocate`], so split
//! sizes only depend on `(n_rows, fractions)` and never on strategy.

use std::ops::Range;
use tracing::debug;

use crate::constants::splits::LOG_ALLOCATION;
use crate::errors::SplitError;
use crate::ratio::RatioSpec;
use crate::table::Table;
use crate::types::{Fraction, RowIndex};

/// Split `0..n_rows` into one contiguous range per fraction.
///
/// Boundaries are the cumulative sums `fraction_i * n_rows`, each rounded to
/// the nearest integer on its own, with exact halves going to the even
/// neighbor. Segment lengths are never rounded
/// individually, so their total is always exactly `n_rows`. The first
/// boundary is `0`, the last is `n_rows`, and boundaries never decrease;
/// equal neighbors yield an empty range.
///
/// An empty `fractions` slice yields no ranges.
pub fn allocate(n_rows: usize, fractions: &[Fraction]) -> Vec<Range<RowIndex>> {
    let Some(last) = fractions.len().checked_sub(1) else {
        return Vec::new();
    };
    let mut ranges = Vec::with_capacity(fractions.len());
    let mut cumulative = 0.0;
    let mut start = 0;
    for (idx, fraction) in fractions.iter().enumerate() {
        cumulative += fraction;
        let end = if idx == last {
            n_rows
        } else {
            // Clamp keeps float drift in the cumulative sum from overshooting or reversing.
            let boundary = (cumulative * n_rows as f64).round_ties_even().max(0.0);
            (boundary as usize).clamp(start, n_rows)
        };
        ranges.push(start..end);
        start = end;
    }
    ranges
}

/// Partition `items` in order according to `fractions`.
pub fn partition<T: Clone>(items: &[T], fractions: &[Fraction]) -> Vec<Vec<T>> {
    allocate(items.len(), fractions)
        .into_iter()
        .map(|range| items[range].to_vec())
        .collect()
}

/// Slice `table` in its current row order according to `ratio`.
///
/// No shuffling or grouping is applied; see `random_split` for the shuffled
/// variant.
pub fn split_with_ratios(
    table: &Table,
    ratio: impl Into<RatioSpec>,
) -> Result<Vec<Table>, SplitError> {
    let fractions = ratio.into().normalize()?;
    let order: Vec<RowIndex> = (0..table.len()).collect();
    let splits: Vec<Table> = partition(&order, &fractions)
        .iter()
        .map(|indices| table.take(indices))
        .collect();
    debug!(
        "{LOG_ALLOCATION} sliced {} rows into {:?}",
        table.len(),
        splits.iter().map(Table::len).collect::<Vec<_>>()
    );
    Ok(splits)
}
