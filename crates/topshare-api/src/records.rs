//! Write endpoints for income-share records.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/add-record` | Get-or-create year + insert, transactional |
//! | `POST`   | `/add-next-record` | 404 when the country has no data |
//! | `PUT`    | `/update-record` | `affectedRows: 0` = nothing matched, still 200 |
//! | `DELETE` | `/delete-records` | Inclusive year range; 0 deleted is a success |
//!
//! Request and response bodies use the camelCase field names of the original
//! wire format.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use topshare_core::{record::NewRecord, store::IncomeStore};

use crate::error::ApiError;

// ─── Add record ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddRecordBody {
  pub country_id: i64,
  pub year:       i32,
  pub top1_share: f64,
}

#[derive(Debug, Serialize)]
pub struct AddRecordResponse {
  pub success: bool,
  pub id:      i64,
}

/// `POST /add-record` — body: `{"countryId":1,"year":2020,"top1Share":14.2}`
pub async fn add<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<AddRecordBody>,
) -> Result<Json<AddRecordResponse>, ApiError>
where
  S: IncomeStore,
{
  let inserted = store
    .insert_record(NewRecord {
      country_id: body.country_id,
      year_value: body.year,
      top1_share: body.top1_share,
    })
    .await
    .map_err(ApiError::store)?;
  Ok(Json(AddRecordResponse { success: true, id: inserted.share_id }))
}

// ─── Add next year ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddNextBody {
  pub country_id: i64,
  pub top1_share: f64,
}

#[derive(Debug, Serialize)]
pub struct AddNextResponse {
  pub success: bool,
  pub year:    i32,
  pub id:      i64,
}

/// `POST /add-next-record` — body: `{"countryId":1,"top1Share":25.3}`
///
/// Inserts a record for the year after the country's latest one. A country
/// with no existing data is a business-rule violation, reported as 404.
pub async fn add_next<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<AddNextBody>,
) -> Result<Json<AddNextResponse>, ApiError>
where
  S: IncomeStore,
{
  let inserted = store
    .insert_next_year(body.country_id, body.top1_share)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| {
      ApiError::NotFound(format!(
        "no existing data for country {}",
        body.country_id
      ))
    })?;
  Ok(Json(AddNextResponse {
    success: true,
    year:    inserted.year_value,
    id:      inserted.share_id,
  }))
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBody {
  pub country_id: i64,
  pub year:       i32,
  pub top1_share: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResponse {
  pub success:       bool,
  pub affected_rows: u64,
}

/// `PUT /update-record`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<UpdateBody>,
) -> Result<Json<UpdateResponse>, ApiError>
where
  S: IncomeStore,
{
  let affected_rows = store
    .update_record(body.country_id, body.year, body.top1_share)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(UpdateResponse { success: true, affected_rows }))
}

// ─── Delete range ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteBody {
  pub country_id: i64,
  pub start_year: i32,
  pub end_year:   i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
  pub success:      bool,
  pub deleted_rows: u64,
}

/// `DELETE /delete-records`
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<DeleteBody>,
) -> Result<Json<DeleteResponse>, ApiError>
where
  S: IncomeStore,
{
  let deleted_rows = store
    .delete_range(body.country_id, body.start_year, body.end_year)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(DeleteResponse { success: true, deleted_rows }))
}
