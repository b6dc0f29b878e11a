//! Geographic reference entities: countries and the regions that group them.
//!
//! Both tables are bootstrap data. Nothing in the HTTP surface ever mutates
//! them; they are created by seed tooling and read by the aggregate queries.

use serde::{Deserialize, Serialize};

/// A country, referencing the region it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
  pub country_id: i64,
  pub name:       String,
  pub region_id:  Option<i64>,
}

/// A (region, sub-region) grouping, e.g. ("Europe", "Northern Europe").
///
/// Either name may be missing in the source dataset; aggregation queries
/// exclude rows whose sub-region is null or empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
  pub region_id:       i64,
  pub region_name:     Option<String>,
  pub sub_region_name: Option<String>,
}
