//! Year and income-share records — the mutable half of the data model.

use serde::{Deserialize, Serialize};

/// A calendar year. `year_value` is unique; rows are created lazily the
/// first time a write references a new year (get-or-create).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Year {
  pub year_id:    i64,
  pub year_value: i32,
}

/// One observation: the share of total income received by the top 1% of
/// earners in `country_id` during `year_id`, as a fraction of 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IncomeShare {
  pub share_id:   i64,
  pub country_id: i64,
  pub year_id:    i64,
  pub top1_share: f64,
}

/// Input for [`crate::store::IncomeStore::insert_record`]. The year is given
/// by value; the store resolves (or creates) the matching `Year` row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewRecord {
  pub country_id: i64,
  pub year_value: i32,
  pub top1_share: f64,
}

/// The result of a successful record insertion: the new share row plus the
/// year it was attached to (freshly created or pre-existing).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InsertedRecord {
  pub share_id:   i64,
  pub year_id:    i64,
  pub year_value: i32,
}
