/// Default column names for interaction tables.
pub mod columns {
    /// Default user identifier column.
    pub const DEFAULT_USER_COL: &str = "userID";
    /// Default item identifier column.
    pub const DEFAULT_ITEM_COL: &str = "itemID";
    /// Default rating column. Carried through splits, never inspected.
    pub const DEFAULT_RATING_COL: &str = "rating";
    /// Default timestamp column used for chronological ordering.
    pub const DEFAULT_TIMESTAMP_COL: &str = "timestamp";
}

/// Constants used by ratio normalization and split allocation.
pub mod ratio {
    /// Absolute tolerance when deciding whether a list of values already sums to `1.0`.
    pub const RATIO_SUM_TOLERANCE: f64 = 1e-6;
    /// Separators accepted when parsing a multi-way ratio string (`0.2,0.3,0.5` or `2:3:5`).
    pub const RATIO_SEPARATORS: [char; 2] = [',', ':'];
}

/// Constants used by the splitter entry points.
pub mod splits {
    /// Seed used by `SplitConfig::default()`.
    pub const DEFAULT_SEED: u64 = 42;
    /// Minimum per-group row count at which filtering has any effect.
    ///
    /// Every group has at least one row, so thresholds at or below this value
    /// return the input unchanged.
    pub const MIN_EFFECTIVE_RATING_FILTER: usize = 1;
    /// Log prefix for random splits.
    pub const LOG_RANDOM: &str = "[reco_splitters:random]";
    /// Log prefix for chronological splits.
    pub const LOG_CHRONO: &str = "[reco_splitters:chrono]";
    /// Log prefix for stratified splits.
    pub const LOG_STRATIFIED: &str = "[reco_splitters:stratified]";
    /// Log prefix for ratio normalization.
    pub const LOG_RATIO: &str = "[reco_splitters:ratio]";
    /// Log prefix for in-order ratio slicing.
    pub const LOG_ALLOCATION: &str = "[reco_splitters:allocation]";
    /// Log prefix for min-count filtering.
    pub const LOG_FILTER: &str = "[reco_splitters:filter]";
}
