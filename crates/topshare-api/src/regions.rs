//! Regional aggregate endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/subregion-data/{subregion_name}/{year}` | Share ASC, name tiebreak |
//! | `GET`  | `/region-averages/{region_name}/{year}` | AVG per sub-region |
//! | `GET`  | `/regional-trends/{region_name}` | AVG per year, for charting |
//!
//! Region and sub-region names arrive percent-encoded in the path; axum's
//! `Path` extractor decodes them before the handler runs.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use topshare_core::{
  report::{CountryShare, SubregionAverage, TrendPoint},
  store::IncomeStore,
};

use crate::error::ApiError;

/// `GET /subregion-data/{subregion_name}/{year}`
pub async fn subregion_data<S>(
  State(store): State<Arc<S>>,
  Path((subregion_name, year)): Path<(String, i32)>,
) -> Result<Json<Vec<CountryShare>>, ApiError>
where
  S: IncomeStore,
{
  let rows = store
    .subregion_snapshot(&subregion_name, year)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(rows))
}

/// `GET /region-averages/{region_name}/{year}`
pub async fn averages<S>(
  State(store): State<Arc<S>>,
  Path((region_name, year)): Path<(String, i32)>,
) -> Result<Json<Vec<SubregionAverage>>, ApiError>
where
  S: IncomeStore,
{
  let rows = store
    .region_averages(&region_name, year)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(rows))
}

/// `GET /regional-trends/{region_name}`
pub async fn trends<S>(
  State(store): State<Arc<S>>,
  Path(region_name): Path<String>,
) -> Result<Json<Vec<TrendPoint>>, ApiError>
where
  S: IncomeStore,
{
  let rows = store
    .regional_trend(&region_name)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(rows))
}
