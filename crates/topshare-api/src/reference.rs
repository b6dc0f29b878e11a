//! Handlers for the reference-data listing endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/countries`  | All countries, ordered by name |
//! | `GET`  | `/years`      | All years, ordered by value |
//! | `GET`  | `/regions`    | Distinct region names |
//! | `GET`  | `/subregions` | Distinct sub-region names |

use std::sync::Arc;

use axum::{Json, extract::State};
use topshare_core::{geo::Country, record::Year, store::IncomeStore};

use crate::error::ApiError;

/// `GET /countries`
pub async fn countries<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Country>>, ApiError>
where
  S: IncomeStore,
{
  let countries = store.list_countries().await.map_err(ApiError::store)?;
  Ok(Json(countries))
}

/// `GET /years`
pub async fn years<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Year>>, ApiError>
where
  S: IncomeStore,
{
  let years = store.list_years().await.map_err(ApiError::store)?;
  Ok(Json(years))
}

/// `GET /regions`
pub async fn regions<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<String>>, ApiError>
where
  S: IncomeStore,
{
  let regions = store.list_regions().await.map_err(ApiError::store)?;
  Ok(Json(regions))
}

/// `GET /subregions`
pub async fn subregions<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<String>>, ApiError>
where
  S: IncomeStore,
{
  let subregions = store.list_subregions().await.map_err(ApiError::store)?;
  Ok(Json(subregions))
}
