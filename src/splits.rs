//! Random, chronological, and stratified splitters.
//!
//! All three normalize the ratio spec, decide a row order, and hand the
//! row-count math to [`allocate`]. They differ only in which rows are
//! considered together (whole table vs. per group) and in what order.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::allocation::{allocate, partition};
use crate::config::SplitConfig;
use crate::constants::splits::{LOG_CHRONO, LOG_RANDOM, LOG_STRATIFIED};
use crate::errors::SplitError;
use crate::filter::min_rating_filter;
use crate::grouping::group_rows;
use crate::ratio::RatioSpec;
use crate::table::Table;
use crate::types::{Fraction, RowIndex};

/// Shuffle every row with a generator seeded from `seed`, then slice by `ratio`.
///
/// The same `(table, ratio, seed)` always yields the same splits. No grouping
/// is applied, so a user may be missing from some splits.
pub fn random_split(
    table: &Table,
    ratio: impl Into<RatioSpec>,
    seed: u64,
) -> Result<Vec<Table>, SplitError> {
    let mut rng = StdRng::seed_from_u64(seed);
    random_split_with_rng(table, ratio, &mut rng)
}

/// [`random_split`] with a caller-provided generator.
pub fn random_split_with_rng<R: Rng + ?Sized>(
    table: &Table,
    ratio: impl Into<RatioSpec>,
    rng: &mut R,
) -> Result<Vec<Table>, SplitError> {
    let fractions = ratio.into().normalize()?;
    let mut order: Vec<RowIndex> = (0..table.len()).collect();
    order.shuffle(rng);
    let splits: Vec<Table> = partition(&order, &fractions)
        .iter()
        .map(|indices| table.take(indices))
        .collect();
    debug!(
        "{LOG_RANDOM} split {} rows into {:?}",
        table.len(),
        split_sizes(&splits)
    );
    Ok(splits)
}

/// Split each group in timestamp order so earlier rows land in earlier splits.
///
/// Rows are optionally pre-filtered with `config.min_rating` on
/// `config.filter_by`, then grouped by `config.stratify_by` (the user by
/// default). Each group is sorted by timestamp ascending (ties keep table
/// order) and allocated on its own; split `i` is the concatenation of every
/// group's `i`-th segment, in group first-appearance order.
///
/// For every group and consecutive splits `i` and `i + 1`, each timestamp in
/// split `i` is `<=` each timestamp in split `i + 1`.
pub fn chrono_split(
    table: &Table,
    ratio: impl Into<RatioSpec>,
    config: &SplitConfig,
) -> Result<Vec<Table>, SplitError> {
    let fractions = ratio.into().normalize()?;
    let time_col = table.column_index(&config.columns.timestamp)?;
    let data = prefilter(table, config)?;
    let splits = split_by_group(&data, &fractions, config, |data, indices| {
        // `sort_by` is stable, so equal timestamps keep their table order.
        indices.sort_by(|a, b| data.rows()[*a][time_col].cmp(&data.rows()[*b][time_col]));
    })?;
    debug!(
        "{LOG_CHRONO} split {} of {} rows by {} into {:?}",
        data.len(),
        table.len(),
        config.stratify_by,
        split_sizes(&splits)
    );
    Ok(splits)
}

/// Split each group after a seeded within-group shuffle.
///
/// Identical to [`chrono_split`] except rows are shuffled (seeded with
/// `config.seed`) instead of sorted by timestamp. Every group appears in each
/// split where its allocated segment is non-empty.
pub fn stratified_split(
    table: &Table,
    ratio: impl Into<RatioSpec>,
    config: &SplitConfig,
) -> Result<Vec<Table>, SplitError> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    stratified_split_with_rng(table, ratio, config, &mut rng)
}

/// [`stratified_split`] with a caller-provided generator; `config.seed` is ignored.
///
/// Groups draw from `rng` in first-appearance order.
pub fn stratified_split_with_rng<R: Rng + ?Sized>(
    table: &Table,
    ratio: impl Into<RatioSpec>,
    config: &SplitConfig,
    rng: &mut R,
) -> Result<Vec<Table>, SplitError> {
    let fractions = ratio.into().normalize()?;
    let data = prefilter(table, config)?;
    let splits = split_by_group(&data, &fractions, config, |_, indices| {
        indices.shuffle(&mut *rng)
    })?;
    debug!(
        "{LOG_STRATIFIED} split {} of {} rows by {} into {:?}",
        data.len(),
        table.len(),
        config.stratify_by,
        split_sizes(&splits)
    );
    Ok(splits)
}

fn prefilter(table: &Table, config: &SplitConfig) -> Result<Table, SplitError> {
    // A bad stratification column must fail even when filtering empties the table.
    table.column_index(config.columns.key_column(config.stratify_by))?;
    min_rating_filter(table, config.min_rating, config.filter_by, &config.columns)
}

/// Order each group's rows with `order`, allocate per group, and gather split `i`
/// from every group's `i`-th segment.
fn split_by_group<F>(
    data: &Table,
    fractions: &[Fraction],
    config: &SplitConfig,
    mut order: F,
) -> Result<Vec<Table>, SplitError>
where
    F: FnMut(&Table, &mut Vec<RowIndex>),
{
    let groups = group_rows(data, config.columns.key_column(config.stratify_by))?;
    let mut assigned: Vec<Vec<RowIndex>> = vec![Vec::new(); fractions.len()];
    for (_, mut indices) in groups {
        order(data, &mut indices);
        for (split, range) in assigned.iter_mut().zip(allocate(indices.len(), fractions)) {
            split.extend_from_slice(&indices[range]);
        }
    }
    Ok(assigned.iter().map(|indices| data.take(indices)).collect())
}

fn split_sizes(splits: &[Table]) -> Vec<usize> {
    splits.iter().map(Table::len).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ColumnConfig, FilterBy};
    use crate::table::Value;
    use std::collections::HashSet;

    fn table() -> Table {
        // Three users with 4, 4, and 2 rows; timestamps deliberately out of order.
        Table::from_interactions(
            &ColumnConfig::default(),
            vec![
                (1, 100, 5.0, 40),
                (2, 101, 4.0, 15),
                (1, 102, 3.0, 10),
                (3, 103, 2.0, 7),
                (2, 104, 1.0, 12),
                (1, 105, 4.0, 30),
                (2, 106, 3.0, 11),
                (3, 107, 5.0, 3),
                (1, 108, 2.0, 20),
                (2, 109, 4.0, 14),
            ],
        )
        .unwrap()
    }

    fn ints(table: &Table, column: &str) -> Vec<i64> {
        table
            .column(column)
            .unwrap()
            .map(|v| match v {
                Value::Int(x) => *x,
                other => panic!("unexpected value {other}"),
            })
            .collect()
    }

    #[test]
    fn random_split_is_reproducible_per_seed() {
        let table = table();
        let a = random_split(&table, 0.7, 7).unwrap();
        let b = random_split(&table, 0.7, 7).unwrap();
        assert_eq!(a, b);
        assert_eq!(split_sizes(&a), vec![7, 3]);

        let mut all = ints(&Table::concat(&a).unwrap(), "itemID");
        all.sort_unstable();
        assert_eq!(all, (100..110).collect::<Vec<_>>());
    }

    #[test]
    fn random_split_with_rng_matches_seeded_entry_point() {
        let table = table();
        let mut rng = StdRng::seed_from_u64(11);
        let injected = random_split_with_rng(&table, [0.2, 0.3, 0.5], &mut rng).unwrap();
        assert_eq!(injected, random_split(&table, [0.2, 0.3, 0.5], 11).unwrap());
    }

    #[test]
    fn chrono_split_orders_each_user_by_time() {
        let table = table();
        let splits = chrono_split(&table, 0.5, &SplitConfig::default()).unwrap();
        // user 1: [10, 20 | 30, 40], user 2: [11, 12 | 14, 15], user 3: [3 | 7]
        assert_eq!(ints(&splits[0], "timestamp"), vec![10, 20, 11, 12, 3]);
        assert_eq!(ints(&splits[1], "timestamp"), vec![30, 40, 14, 15, 7]);
        assert_eq!(ints(&splits[0], "userID"), vec![1, 1, 2, 2, 3]);
    }

    #[test]
    fn chrono_split_ties_keep_table_order() {
        let table = Table::from_interactions(
            &ColumnConfig::default(),
            vec![(1, 1, 1.0, 5), (1, 2, 1.0, 5), (1, 3, 1.0, 1), (1, 4, 1.0, 5)],
        )
        .unwrap();
        let splits = chrono_split(&table, [0.5, 0.5], &SplitConfig::default()).unwrap();
        assert_eq!(ints(&splits[0], "itemID"), vec![3, 1]);
        assert_eq!(ints(&splits[1], "itemID"), vec![2, 4]);
    }

    #[test]
    fn chrono_split_rounds_odd_groups_half_to_even() {
        // Five rows at 0.5: the 2.5 boundary rounds down to 2.
        let table = Table::from_interactions(
            &ColumnConfig::default(),
            (0..5).map(|i| (1, i, 1.0, i)),
        )
        .unwrap();
        let splits = chrono_split(&table, 0.5, &SplitConfig::default()).unwrap();
        assert_eq!(split_sizes(&splits), vec![2, 3]);
        assert_eq!(ints(&splits[0], "timestamp"), vec![0, 1]);

        // A lone row goes to the later split.
        let single = Table::from_interactions(&ColumnConfig::default(), vec![(1, 1, 1.0, 1)])
            .unwrap();
        let splits = stratified_split(&single, 0.5, &SplitConfig::default()).unwrap();
        assert_eq!(split_sizes(&splits), vec![0, 1]);
    }

    #[test]
    fn chrono_split_applies_min_rating_filter() {
        let table = table();
        let config = SplitConfig {
            min_rating: 3,
            ..SplitConfig::default()
        };
        let splits = chrono_split(&table, 0.5, &config).unwrap();
        let users: HashSet<i64> = splits.iter().flat_map(|s| ints(s, "userID")).collect();
        assert_eq!(users, HashSet::from([1, 2]));
        assert_eq!(split_sizes(&splits), vec![4, 4]);
    }

    #[test]
    fn chrono_split_requires_timestamp_column() {
        let table = table();
        let config = SplitConfig {
            columns: ColumnConfig {
                timestamp: "ts".into(),
                ..ColumnConfig::default()
            },
            ..SplitConfig::default()
        };
        assert!(matches!(
            chrono_split(&table, 0.5, &config),
            Err(SplitError::ColumnNotFound { ref column, .. }) if column == "ts"
        ));
    }

    #[test]
    fn chrono_split_can_stratify_by_item() {
        let table = Table::from_interactions(
            &ColumnConfig::default(),
            vec![(1, 9, 1.0, 2), (2, 9, 1.0, 1), (3, 8, 1.0, 4), (4, 8, 1.0, 3)],
        )
        .unwrap();
        let config = SplitConfig {
            stratify_by: FilterBy::Item,
            ..SplitConfig::default()
        };
        let splits = chrono_split(&table, 0.5, &config).unwrap();
        assert_eq!(ints(&splits[0], "userID"), vec![2, 4]);
        assert_eq!(ints(&splits[1], "userID"), vec![1, 3]);
    }

    #[test]
    fn stratified_split_keeps_every_user_in_every_split() {
        let table = table();
        let splits = stratified_split(&table, 0.5, &SplitConfig::default()).unwrap();
        for split in &splits {
            let users: HashSet<i64> = ints(split, "userID").into_iter().collect();
            assert_eq!(users, HashSet::from([1, 2, 3]));
        }
        assert_eq!(split_sizes(&splits), vec![5, 5]);
    }

    #[test]
    fn stratified_split_is_reproducible_per_seed() {
        let table = table();
        let config = SplitConfig {
            seed: 123,
            ..SplitConfig::default()
        };
        assert_eq!(
            stratified_split(&table, [0.25, 0.75], &config).unwrap(),
            stratified_split(&table, [0.25, 0.75], &config).unwrap()
        );
    }

    #[test]
    fn stratified_split_requires_stratification_column() {
        let table = table();
        let config = SplitConfig {
            columns: ColumnConfig {
                user: "customer".into(),
                ..ColumnConfig::default()
            },
            ..SplitConfig::default()
        };
        assert!(matches!(
            stratified_split(&table, 0.5, &config),
            Err(SplitError::ColumnNotFound { ref column, .. }) if column == "customer"
        ));

        // Still reported when the filter would drop every row.
        let config = SplitConfig {
            min_rating: 50,
            ..config
        };
        assert!(matches!(
            stratified_split(&table, 0.5, &config),
            Err(SplitError::ColumnNotFound { .. })
        ));
    }

    #[test]
    fn empty_input_yields_empty_splits() {
        let table = table().empty_like();
        for splits in [
            random_split(&table, [0.2, 0.3, 0.5], 1).unwrap(),
            chrono_split(&table, [0.2, 0.3, 0.5], &SplitConfig::default()).unwrap(),
            stratified_split(&table, [0.2, 0.3, 0.5], &SplitConfig::default()).unwrap(),
        ] {
            assert_eq!(split_sizes(&splits), vec![0, 0, 0]);
        }
    }

    #[test]
    fn filter_removing_everything_yields_empty_splits() {
        let config = SplitConfig {
            min_rating: 50,
            ..SplitConfig::default()
        };
        let splits = stratified_split(&table(), 0.6, &config).unwrap();
        assert_eq!(split_sizes(&splits), vec![0, 0]);
    }

    #[test]
    fn invalid_ratio_propagates() {
        let table = table();
        assert!(matches!(
            random_split(&table, Vec::<f64>::new(), 1),
            Err(SplitError::InvalidSpec(_))
        ));
        assert!(matches!(
            chrono_split(&table, [-1.0, 2.0], &SplitConfig::default()),
            Err(SplitError::InvalidSpec(_))
        ));
        assert!(matches!(
            stratified_split(&table, 1.0, &SplitConfig::default()),
            Err(SplitError::InvalidSpec(_))
        ));
    }
}
