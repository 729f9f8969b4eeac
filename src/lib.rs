#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Proportional allocation of rows across splits.
pub mod allocation;
/// Column names and split options.
pub mod config;
/// Centralized constants used across ratios, filters, and splitters.
pub mod constants;
/// Minimum-count group filtering.
pub mod filter;
/// Stable group-by helpers.
pub mod grouping;
/// Split size and coverage summaries.
pub mod metrics;
/// Ratio specifications and normalization.
pub mod ratio;
/// Random, chronological, and stratified splitters.
pub mod splits;
/// In-memory interaction table.
pub mod table;
/// Shared type aliases.
pub mod types;

mod errors;

pub use allocation::{allocate, partition, split_with_ratios};
pub use config::{ColumnConfig, FilterBy, SplitConfig};
pub use errors::SplitError;
pub use filter::min_rating_filter;
pub use metrics::{SplitShare, SplitSummary, summarize_splits};
pub use ratio::{RatioSpec, normalize_ratio};
pub use splits::{
    chrono_split, random_split, random_split_with_rng, stratified_split,
    stratified_split_with_rng,
};
pub use table::{Row, Table, Value};
pub use types::{ColumnName, Fraction, RowIndex, SplitIndex};
