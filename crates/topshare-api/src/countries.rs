//! Per-country read endpoints: timeline, year helpers, search, comparison
//! and the top-N ranking.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/country-timeline/{country_id}` | Year DESC |
//! | `GET`  | `/latest-year/{country_id}` | `{latest_year: null}` when no data |
//! | `GET`  | `/country-years/{country_id}` | `[{year}]`, DESC |
//! | `GET`  | `/search-countries?keyword=` | Per-country latest share |
//! | `GET`  | `/comparison-data?countries=1,2&year=` | 400 on malformed ids |
//! | `GET`  | `/top-countries/{year}` | Top 10, ties alphabetical |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use topshare_core::{
  report::{CountryShare, CountryYearShare, TimelinePoint},
  store::IncomeStore,
};

use crate::error::ApiError;

/// Ranking size for `/top-countries`, matching the original feature.
const TOP_LIMIT: u32 = 10;

// ─── Timeline ────────────────────────────────────────────────────────────────

/// `GET /country-timeline/{country_id}`
pub async fn timeline<S>(
  State(store): State<Arc<S>>,
  Path(country_id): Path<i64>,
) -> Result<Json<Vec<TimelinePoint>>, ApiError>
where
  S: IncomeStore,
{
  let points = store
    .country_timeline(country_id)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(points))
}

// ─── Year helpers ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct LatestYearResponse {
  pub latest_year: Option<i32>,
}

/// `GET /latest-year/{country_id}`
pub async fn latest_year<S>(
  State(store): State<Arc<S>>,
  Path(country_id): Path<i64>,
) -> Result<Json<LatestYearResponse>, ApiError>
where
  S: IncomeStore,
{
  let latest_year = store
    .latest_year(country_id)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(LatestYearResponse { latest_year }))
}

#[derive(Debug, Serialize)]
pub struct YearRow {
  pub year: i32,
}

/// `GET /country-years/{country_id}`
pub async fn years<S>(
  State(store): State<Arc<S>>,
  Path(country_id): Path<i64>,
) -> Result<Json<Vec<YearRow>>, ApiError>
where
  S: IncomeStore,
{
  let years = store
    .country_years(country_id)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(years.into_iter().map(|year| YearRow { year }).collect()))
}

// ─── Search ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct SearchParams {
  pub keyword: Option<String>,
}

/// `GET /search-countries[?keyword=...]`
///
/// An absent keyword matches every country, as in the original UI.
pub async fn search<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<SearchParams>,
) -> Result<Json<Vec<CountryYearShare>>, ApiError>
where
  S: IncomeStore,
{
  let keyword = params.keyword.unwrap_or_default();
  let hits = store
    .search_countries(&keyword)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(hits))
}

// ─── Comparison ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ComparisonParams {
  /// Comma-separated country ids, e.g. `3,17,42`.
  pub countries: String,
  pub year:      i32,
}

/// `GET /comparison-data?countries=id1,id2&year=...`
pub async fn comparison<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ComparisonParams>,
) -> Result<Json<Vec<CountryYearShare>>, ApiError>
where
  S: IncomeStore,
{
  let ids = parse_country_ids(&params.countries)?;
  let rows = store
    .comparison(&ids, params.year)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(rows))
}

fn parse_country_ids(raw: &str) -> Result<Vec<i64>, ApiError> {
  let ids: Vec<i64> = raw
    .split(',')
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(|s| {
      s.parse().map_err(|_| {
        ApiError::BadRequest(format!("invalid country id: {s:?}"))
      })
    })
    .collect::<Result<_, _>>()?;

  if ids.is_empty() {
    return Err(ApiError::BadRequest(
      "countries must contain at least one id".to_string(),
    ));
  }
  Ok(ids)
}

// ─── Ranking ─────────────────────────────────────────────────────────────────

/// `GET /top-countries/{year}`
pub async fn top<S>(
  State(store): State<Arc<S>>,
  Path(year): Path<i32>,
) -> Result<Json<Vec<CountryShare>>, ApiError>
where
  S: IncomeStore,
{
  let ranking = store
    .top_countries(year, TOP_LIMIT)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(ranking))
}
