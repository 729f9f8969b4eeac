/// Column name in a `Table` schema.
/// Examples: `userID`, `itemID`, `timestamp`
pub type ColumnName = String;
/// Position of a row inside the table it was taken from.
/// Example: `0` for the first row
pub type RowIndex = usize;
/// Normalized share of rows assigned to one split.
/// Examples: `0.2`, `0.75`
pub type Fraction = f64;
/// One output partition of a split, in the same order as the requested fractions.
/// Example: `splits[0]` is the train table for `[0.8, 0.2]`
pub type SplitIndex = usize;
