//! Read-model row types returned by the aggregate queries.
//!
//! Field names match the JSON wire format of the API one-to-one, so these
//! serialise straight into response bodies without a mapping layer.

use serde::{Deserialize, Serialize};

/// One point in a country's time series, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelinePoint {
  pub year:         i32,
  pub top1_share:   f64,
  pub country_name: String,
}

/// A (country, share) pair for a fixed year — sub-region snapshots and
/// top-N rankings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryShare {
  pub country_name: String,
  pub top1_share:   f64,
}

/// Average share across one sub-region for a fixed year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubregionAverage {
  pub subregion_name: String,
  pub avg_share:      f64,
}

/// Average share across a whole region for one year — time-series charting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
  pub year:      i32,
  pub avg_share: f64,
}

/// A country annotated with a share for a specific year — keyword search
/// (per-country latest year) and multi-country comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryYearShare {
  pub country_name: String,
  pub top1_share:   f64,
  pub year:         i32,
}
