use indexmap::{IndexMap, IndexSet};

use crate::errors::SplitError;
use crate::table::{Table, Value};
use crate::types::SplitIndex;

/// Aggregate size and group-coverage metrics for a set of splits.
#[derive(Clone, Debug, PartialEq)]
pub struct SplitSummary {
    /// Rows across all splits.
    pub total: usize,
    /// Distinct groups seen in any split.
    pub groups: usize,
    /// Groups present in every split.
    pub groups_in_every_split: usize,
    /// Per-split breakdown, in split order.
    pub per_split: Vec<SplitShare>,
}

/// One split's share of the total rows.
#[derive(Clone, Debug, PartialEq)]
pub struct SplitShare {
    /// Position of the split in the input slice.
    pub split: SplitIndex,
    /// Rows in this split.
    pub rows: usize,
    /// `rows / total`, or `0.0` when every split is empty.
    pub share: f64,
    /// Distinct groups in this split.
    pub groups: usize,
}

impl SplitSummary {
    /// Returns `true` when every group with rows appears in every split.
    pub fn is_fully_stratified(&self) -> bool {
        self.groups == self.groups_in_every_split
    }
}

/// Summarize splits by row share and by coverage of the groups in `group_column`.
pub fn summarize_splits(splits: &[Table], group_column: &str) -> Result<SplitSummary, SplitError> {
    let total: usize = splits.iter().map(Table::len).sum();
    // group -> number of splits it appears in
    let mut presence: IndexMap<&Value, usize> = IndexMap::new();
    let mut per_split = Vec::with_capacity(splits.len());
    for (split, table) in splits.iter().enumerate() {
        let seen: IndexSet<&Value> = table.column(group_column)?.collect();
        for key in &seen {
            *presence.entry(*key).or_default() += 1;
        }
        per_split.push(SplitShare {
            split,
            rows: table.len(),
            share: if total == 0 {
                0.0
            } else {
                table.len() as f64 / total as f64
            },
            groups: seen.len(),
        });
    }
    let groups_in_every_split = presence
        .values()
        .filter(|count| **count == splits.len())
        .count();
    Ok(SplitSummary {
        total,
        groups: presence.len(),
        groups_in_every_split,
        per_split,
    })
}
