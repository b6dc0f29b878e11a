//! The `IncomeStore` trait — the query layer behind the HTTP surface.
//!
//! The trait is implemented by storage backends (e.g.
//! `topshare-store-sqlite`). The API crate depends on this abstraction, not
//! on any concrete backend, so tests can substitute a fake store.

use std::future::Future;

use crate::{
  geo::{Country, Region},
  record::{InsertedRecord, NewRecord, Year},
  report::{
    CountryShare, CountryYearShare, SubregionAverage, TimelinePoint,
    TrendPoint,
  },
};

/// Abstraction over the income-share relational store.
///
/// Every operation is a single synchronous round trip from the caller's
/// perspective: the returned future resolves once the statement (or the
/// enclosing transaction, for the two-step writes) has committed. Concurrent
/// writers are arbitrated by the store itself; last-write-wins applies to
/// updates of the same (country, year).
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait IncomeStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Reference data ────────────────────────────────────────────────────

  /// All countries, ordered by name.
  fn list_countries(
    &self,
  ) -> impl Future<Output = Result<Vec<Country>, Self::Error>> + Send + '_;

  /// All years, ordered by value.
  fn list_years(
    &self,
  ) -> impl Future<Output = Result<Vec<Year>, Self::Error>> + Send + '_;

  /// Distinct non-null, non-empty region names, ordered.
  fn list_regions(
    &self,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;

  /// Distinct non-null, non-empty sub-region names, ordered.
  fn list_subregions(
    &self,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;

  // ── Seeding (bootstrap tooling and tests; never exposed over HTTP) ────

  /// Insert a region row and return it.
  fn add_region(
    &self,
    region_name: Option<String>,
    sub_region_name: Option<String>,
  ) -> impl Future<Output = Result<Region, Self::Error>> + Send + '_;

  /// Insert a country row and return it.
  fn add_country(
    &self,
    name: String,
    region_id: Option<i64>,
  ) -> impl Future<Output = Result<Country, Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// All (year, share) pairs for one country, descending by year.
  fn country_timeline(
    &self,
    country_id: i64,
  ) -> impl Future<Output = Result<Vec<TimelinePoint>, Self::Error>> + Send + '_;

  /// Every country in a sub-region with its share for one year, ascending
  /// by share, ties broken by country name.
  fn subregion_snapshot<'a>(
    &'a self,
    sub_region_name: &'a str,
    year_value: i32,
  ) -> impl Future<Output = Result<Vec<CountryShare>, Self::Error>> + Send + 'a;

  /// Average share per sub-region of a region for one year, ascending by
  /// average. Rows with a null or empty sub-region are excluded.
  fn region_averages<'a>(
    &'a self,
    region_name: &'a str,
    year_value: i32,
  ) -> impl Future<Output = Result<Vec<SubregionAverage>, Self::Error>> + Send + 'a;

  /// Average share across a region per year, ascending by year.
  fn regional_trend<'a>(
    &'a self,
    region_name: &'a str,
  ) -> impl Future<Output = Result<Vec<TrendPoint>, Self::Error>> + Send + 'a;

  /// Countries whose name contains `keyword` (case-insensitive), each
  /// annotated with its own most recent year's share. Countries with no
  /// income data are omitted.
  fn search_countries<'a>(
    &'a self,
    keyword: &'a str,
  ) -> impl Future<Output = Result<Vec<CountryYearShare>, Self::Error>> + Send + 'a;

  /// The `limit` highest shares for one year, descending, ties broken
  /// alphabetically by country name.
  fn top_countries(
    &self,
    year_value: i32,
    limit: u32,
  ) -> impl Future<Output = Result<Vec<CountryShare>, Self::Error>> + Send + '_;

  /// One row per requested country that has data for `year_value`,
  /// ordered by country name.
  fn comparison<'a>(
    &'a self,
    country_ids: &'a [i64],
    year_value: i32,
  ) -> impl Future<Output = Result<Vec<CountryYearShare>, Self::Error>> + Send + 'a;

  /// The most recent year for which a country has data, if any.
  fn latest_year(
    &self,
    country_id: i64,
  ) -> impl Future<Output = Result<Option<i32>, Self::Error>> + Send + '_;

  /// Distinct years for which a country has data, descending.
  fn country_years(
    &self,
    country_id: i64,
  ) -> impl Future<Output = Result<Vec<i32>, Self::Error>> + Send + '_;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Insert an income-share record, creating the `Year` row first if the
  /// year value is new. Both statements run in one transaction: a failure
  /// leaves neither an orphan year nor a dangling share.
  fn insert_record(
    &self,
    record: NewRecord,
  ) -> impl Future<Output = Result<InsertedRecord, Self::Error>> + Send + '_;

  /// Insert a record for the year after the country's latest one.
  ///
  /// Returns `Ok(None)` when the country has no existing data — a business
  /// rule violation reported to the caller, not a store fault.
  fn insert_next_year(
    &self,
    country_id: i64,
    top1_share: f64,
  ) -> impl Future<Output = Result<Option<InsertedRecord>, Self::Error>> + Send + '_;

  /// Set the share for the record matching (country, year value). Returns
  /// the affected-row count; 0 means "no matching record", not an error.
  fn update_record(
    &self,
    country_id: i64,
    year_value: i32,
    top1_share: f64,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Delete every record for `country_id` whose year falls in the
  /// inclusive range. BETWEEN semantics: an inverted range deletes nothing
  /// and returns 0, which is a valid outcome.
  fn delete_range(
    &self,
    country_id: i64,
    start_year: i32,
    end_year: i32,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;
}
