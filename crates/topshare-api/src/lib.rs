//! JSON HTTP API for the top-1% income share dataset.
//!
//! Exposes an axum [`Router`] backed by any
//! [`topshare_core::store::IncomeStore`]. Transport concerns (TLS, request
//! tracing, the listening socket) are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", topshare_api::api_router(store.clone()))
//! ```

pub mod countries;
pub mod error;
pub mod records;
pub mod reference;
pub mod regions;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, post, put},
};
use topshare_core::store::IncomeStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: IncomeStore + Clone + Send + Sync + 'static,
{
  Router::new()
    // Reference data
    .route("/countries", get(reference::countries::<S>))
    .route("/years", get(reference::years::<S>))
    .route("/regions", get(reference::regions::<S>))
    .route("/subregions", get(reference::subregions::<S>))
    // Per-country reads
    .route("/country-timeline/{country_id}", get(countries::timeline::<S>))
    .route("/latest-year/{country_id}", get(countries::latest_year::<S>))
    .route("/country-years/{country_id}", get(countries::years::<S>))
    .route("/search-countries", get(countries::search::<S>))
    .route("/comparison-data", get(countries::comparison::<S>))
    .route("/top-countries/{year}", get(countries::top::<S>))
    // Regional aggregates
    .route(
      "/subregion-data/{subregion_name}/{year}",
      get(regions::subregion_data::<S>),
    )
    .route(
      "/region-averages/{region_name}/{year}",
      get(regions::averages::<S>),
    )
    .route("/regional-trends/{region_name}", get(regions::trends::<S>))
    // Writes
    .route("/add-record", post(records::add::<S>))
    .route("/add-next-record", post(records::add_next::<S>))
    .route("/update-record", put(records::update::<S>))
    .route("/delete-records", delete(records::delete::<S>))
    .with_state(store)
}

// ─── Integration tests ───────────────────────────────────────────────────────
