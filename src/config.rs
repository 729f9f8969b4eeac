use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::columns::{
    DEFAULT_ITEM_COL, DEFAULT_RATING_COL, DEFAULT_TIMESTAMP_COL, DEFAULT_USER_COL,
};
use crate::constants::splits::DEFAULT_SEED;
use crate::errors::SplitError;
use crate::types::ColumnName;

/// Column names used to locate interaction fields in a `Table`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    /// User identifier column.
    pub user: ColumnName,
    /// Item identifier column.
    pub item: ColumnName,
    /// Rating column; carried through untouched.
    pub rating: ColumnName,
    /// Timestamp column used by chronological splits.
    pub timestamp: ColumnName,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            user: DEFAULT_USER_COL.to_string(),
            item: DEFAULT_ITEM_COL.to_string(),
            rating: DEFAULT_RATING_COL.to_string(),
            timestamp: DEFAULT_TIMESTAMP_COL.to_string(),
        }
    }
}

impl ColumnConfig {
    /// Column holding the key selected by `by`.
    pub fn key_column(&self, by: FilterBy) -> &str {
        match by {
            FilterBy::User => &self.user,
            FilterBy::Item => &self.item,
        }
    }
}

/// Which identifier defines a group.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterBy {
    /// Group rows by user identifier.
    #[default]
    User,
    /// Group rows by item identifier.
    Item,
}

impl fmt::Display for FilterBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterBy::User => write!(f, "user"),
            FilterBy::Item => write!(f, "item"),
        }
    }
}

impl FromStr for FilterBy {
    type Err = SplitError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(FilterBy::User),
            "item" => Ok(FilterBy::Item),
            other => Err(SplitError::InvalidSpec(format!(
                "filter_by must be either 'user' or 'item', got '{other}'"
            ))),
        }
    }
}

/// Options shared by the grouped splitters (`chrono_split`, `stratified_split`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Minimum rows a group needs to survive pre-filtering; `0` disables the filter.
    pub min_rating: usize,
    /// Key used by the minimum-count filter.
    pub filter_by: FilterBy,
    /// Key whose groups are split proportionally. Independent of `filter_by`.
    pub stratify_by: FilterBy,
    /// RNG seed for the within-group shuffle of stratified splits.
    pub seed: u64,
    /// Column names for the interaction fields.
    pub columns: ColumnConfig,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            min_rating: 0,
            filter_by: FilterBy::User,
            stratify_by: FilterBy::User,
            seed: DEFAULT_SEED,
            columns: ColumnConfig::default(),
        }
    }
}
