//! Ratio specifications and their normalization to split fractions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

use crate::constants::ratio::{RATIO_SEPARATORS, RATIO_SUM_TOLERANCE};
use crate::constants::splits::LOG_RATIO;
use crate::errors::SplitError;
use crate::types::Fraction;

/// Caller-provided description of how many splits to produce and their sizes.
///
/// - `Single(r)` with `0 < r < 1` is a two-way split `[r, 1 - r]`.
/// - `Multi(values)` is an N-way split. Values that are all `<= 1` and sum to
///   `1` are fractions; anything else is a list of relative weights.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RatioSpec {
    /// Train fraction of a two-way split.
    Single(f64),
    /// Fractions or relative weights of an N-way split.
    Multi(Vec<f64>),
}

impl RatioSpec {
    /// Normalize into fractions that are all positive and sum to `1.0`.
    pub fn normalize(&self) -> Result<Vec<Fraction>, SplitError> {
        match self {
            RatioSpec::Single(ratio) => normalize_single(*ratio),
            RatioSpec::Multi(values) => normalize_multi(values),
        }
    }

    /// Number of splits this spec produces.
    pub fn split_count(&self) -> usize {
        match self {
            RatioSpec::Single(_) => 2,
            RatioSpec::Multi(values) => values.len(),
        }
    }
}

/// Normalize any ratio-like input. See [`RatioSpec::normalize`].
pub fn normalize_ratio(ratio: impl Into<RatioSpec>) -> Result<Vec<Fraction>, SplitError> {
    ratio.into().normalize()
}

fn normalize_single(ratio: f64) -> Result<Vec<Fraction>, SplitError> {
    if !ratio.is_finite() || ratio <= 0.0 || ratio >= 1.0 {
        return Err(SplitError::InvalidSpec(format!(
            "single split ratio must be strictly between 0 and 1, got {ratio}"
        )));
    }
    Ok(vec![ratio, 1.0 - ratio])
}

fn normalize_multi(values: &[f64]) -> Result<Vec<Fraction>, SplitError> {
    if values.is_empty() {
        return Err(SplitError::InvalidSpec(
            "split ratio list must not be empty".to_string(),
        ));
    }
    if let Some(bad) = values.iter().find(|v| !v.is_finite() || **v <= 0.0) {
        return Err(SplitError::InvalidSpec(format!(
            "split ratios must be positive finite numbers, got {bad}"
        )));
    }
    let sum: f64 = values.iter().sum();
    let as_fractions =
        values.iter().all(|v| *v <= 1.0) && (sum - 1.0).abs() <= RATIO_SUM_TOLERANCE;
    // Fractions are still divided by their sum so float drift does not reach the allocator.
    debug!(
        "{LOG_RATIO} treating {:?} as {} (sum={sum})",
        values,
        if as_fractions { "fractions" } else { "weights" }
    );
    Ok(values.iter().map(|v| v / sum).collect())
}

impl From<f64> for RatioSpec {
    fn from(ratio: f64) -> Self {
        RatioSpec::Single(ratio)
    }
}

impl From<Vec<f64>> for RatioSpec {
    fn from(values: Vec<f64>) -> Self {
        RatioSpec::Multi(values)
    }
}

impl From<&[f64]> for RatioSpec {
    fn from(values: &[f64]) -> Self {
        RatioSpec::Multi(values.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for RatioSpec {
    fn from(values: [f64; N]) -> Self {
        RatioSpec::Multi(values.to_vec())
    }
}

impl FromStr for RatioSpec {
    type Err = SplitError;

    /// Parse `"0.75"` as a single ratio, `"0.2,0.3,0.5"` or `"2:3:5"` as a list.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        let parse = |part: &str| {
            let part = part.trim();
            part.parse::<f64>().map_err(|_| {
                SplitError::InvalidSpec(format!("invalid split ratio '{part}': must be a number"))
            })
        };
        if raw.contains(RATIO_SEPARATORS) {
            let values = raw
                .split(RATIO_SEPARATORS)
                .map(parse)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(RatioSpec::Multi(values))
        } else {
            Ok(RatioSpec::Single(parse(raw)?))
        }
    }
}
