//! Integration tests for `SqliteStore` against an in-memory database.

use topshare_core::{record::NewRecord, store::IncomeStore};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

/// A small seeded world: two European sub-regions, one bare region row
/// (null sub-region), one American sub-region, and a country with no data.
struct Fixture {
  store:   SqliteStore,
  uk:      i64,
  sweden:  i64,
  france:  i64,
  andorra: i64,
  us:      i64,
  monaco:  i64,
}

async fn fixture() -> Fixture {
  let s = store().await;

  let n_europe = s
    .add_region(Some("Europe".into()), Some("Northern Europe".into()))
    .await
    .unwrap();
  let w_europe = s
    .add_region(Some("Europe".into()), Some("Western Europe".into()))
    .await
    .unwrap();
  let bare = s.add_region(Some("Europe".into()), None).await.unwrap();
  let n_america = s
    .add_region(Some("Americas".into()), Some("Northern America".into()))
    .await
    .unwrap();

  let uk = s
    .add_country("United Kingdom".into(), Some(n_europe.region_id))
    .await
    .unwrap();
  let sweden = s
    .add_country("Sweden".into(), Some(n_europe.region_id))
    .await
    .unwrap();
  let france = s
    .add_country("France".into(), Some(w_europe.region_id))
    .await
    .unwrap();
  let andorra = s
    .add_country("Andorra".into(), Some(bare.region_id))
    .await
    .unwrap();
  let us = s
    .add_country("United States".into(), Some(n_america.region_id))
    .await
    .unwrap();
  let monaco = s
    .add_country("Monaco".into(), Some(n_europe.region_id))
    .await
    .unwrap();

  let records = [
    (uk.country_id, 2018, 12.0),
    (uk.country_id, 2019, 13.0),
    (uk.country_id, 2020, 14.0),
    (sweden.country_id, 2019, 9.0),
    (sweden.country_id, 2020, 8.5),
    (france.country_id, 2019, 10.0),
    (france.country_id, 2020, 11.0),
    (andorra.country_id, 2019, 20.0),
    (us.country_id, 2019, 19.0),
    (us.country_id, 2020, 18.5),
  ];
  for (country_id, year_value, top1_share) in records {
    s.insert_record(NewRecord { country_id, year_value, top1_share })
      .await
      .unwrap();
  }

  Fixture {
    store:   s,
    uk:      uk.country_id,
    sweden:  sweden.country_id,
    france:  france.country_id,
    andorra: andorra.country_id,
    us:      us.country_id,
    monaco:  monaco.country_id,
  }
}

// ─── Reference data ──────────────────────────────────────────────────────────

#[tokio::test]
async fn list_countries_ordered_by_name() {
  let f = fixture().await;
  let names: Vec<String> = f
    .store
    .list_countries()
    .await
    .unwrap()
    .into_iter()
    .map(|c| c.name)
    .collect();
  assert_eq!(
    names,
    [
      "Andorra",
      "France",
      "Monaco",
      "Sweden",
      "United Kingdom",
      "United States"
    ]
  );
}

#[tokio::test]
async fn list_regions_and_subregions_distinct_and_ordered() {
  let f = fixture().await;

  let regions = f.store.list_regions().await.unwrap();
  assert_eq!(regions, ["Americas", "Europe"]);

  // The bare Europe row (null sub-region) must not surface.
  let subregions = f.store.list_subregions().await.unwrap();
  assert_eq!(
    subregions,
    ["Northern America", "Northern Europe", "Western Europe"]
  );
}

// ─── Timeline ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn timeline_descending_and_scoped_to_country() {
  let f = fixture().await;

  let timeline = f.store.country_timeline(f.uk).await.unwrap();
  let years: Vec<i32> = timeline.iter().map(|p| p.year).collect();
  assert_eq!(years, [2020, 2019, 2018]);
  assert!(timeline.iter().all(|p| p.country_name == "United Kingdom"));
}

#[tokio::test]
async fn timeline_empty_for_country_without_data() {
  let f = fixture().await;
  let timeline = f.store.country_timeline(f.monaco).await.unwrap();
  assert!(timeline.is_empty());
}

// ─── Sub-region snapshot ─────────────────────────────────────────────────────

#[tokio::test]
async fn subregion_snapshot_ascending_with_name_tiebreak() {
  let f = fixture().await;

  // Norway ties with the UK at 13.0 in 2019; alphabetical order breaks it.
  let uk_region = f
    .store
    .list_countries()
    .await
    .unwrap()
    .into_iter()
    .find(|c| c.country_id == f.uk)
    .unwrap()
    .region_id;
  let norway = f
    .store
    .add_country("Norway".into(), uk_region)
    .await
    .unwrap();
  f.store
    .insert_record(NewRecord {
      country_id: norway.country_id,
      year_value: 2019,
      top1_share: 13.0,
    })
    .await
    .unwrap();

  let snapshot = f
    .store
    .subregion_snapshot("Northern Europe", 2019)
    .await
    .unwrap();
  let names: Vec<&str> =
    snapshot.iter().map(|r| r.country_name.as_str()).collect();
  assert_eq!(names, ["Sweden", "Norway", "United Kingdom"]);
}

// ─── Region averages ─────────────────────────────────────────────────────────

#[tokio::test]
async fn region_averages_mean_per_subregion_nulls_excluded() {
  let f = fixture().await;

  let averages = f.store.region_averages("Europe", 2019).await.unwrap();

  // Andorra (share 20.0) sits in a region row with no sub-region and must
  // not contribute. Ascending by average: Western 10.0, Northern 11.0.
  assert_eq!(averages.len(), 2);
  assert_eq!(averages[0].subregion_name, "Western Europe");
  assert!((averages[0].avg_share - 10.0).abs() < 1e-9);
  assert_eq!(averages[1].subregion_name, "Northern Europe");
  assert!((averages[1].avg_share - 11.0).abs() < 1e-9);
}

#[tokio::test]
async fn regional_trend_ascending_by_year() {
  let f = fixture().await;

  let trend = f.store.regional_trend("Europe").await.unwrap();
  let years: Vec<i32> = trend.iter().map(|p| p.year).collect();
  assert_eq!(years, [2018, 2019, 2020]);

  // 2018: only the UK at 12.0.
  assert!((trend[0].avg_share - 12.0).abs() < 1e-9);
  // 2019: UK 13, Sweden 9, France 10, Andorra 20 → 13.0. The trend spans
  // the whole region, so the null-sub-region row does count here.
  assert!((trend[1].avg_share - 13.0).abs() < 1e-9);
}

// ─── Search ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn search_is_case_insensitive_and_uses_per_country_latest() {
  let f = fixture().await;

  let hits = f.store.search_countries("united").await.unwrap();
  assert_eq!(hits.len(), 2);

  assert_eq!(hits[0].country_name, "United Kingdom");
  assert_eq!(hits[0].year, 2020);
  assert!((hits[0].top1_share - 14.0).abs() < 1e-9);

  assert_eq!(hits[1].country_name, "United States");
  assert_eq!(hits[1].year, 2020);
  assert!((hits[1].top1_share - 18.5).abs() < 1e-9);
}

#[tokio::test]
async fn search_omits_countries_without_data() {
  let f = fixture().await;
  // Monaco matches the substring but has no income rows.
  let hits = f.store.search_countries("Mona").await.unwrap();
  assert!(hits.is_empty());
}

// ─── Ranking and comparison ──────────────────────────────────────────────────

#[tokio::test]
async fn top_countries_descending_with_alphabetical_tiebreak() {
  let f = fixture().await;

  // Put France level with the UK at 13.0 to exercise the tie-break.
  let affected = f.store.update_record(f.france, 2019, 13.0).await.unwrap();
  assert_eq!(affected, 1);

  let top = f.store.top_countries(2019, 3).await.unwrap();
  let names: Vec<&str> = top.iter().map(|r| r.country_name.as_str()).collect();
  assert_eq!(names, ["Andorra", "United States", "France"]);

  let all = f.store.top_countries(2019, 10).await.unwrap();
  let names: Vec<&str> = all.iter().map(|r| r.country_name.as_str()).collect();
  assert_eq!(
    names,
    ["Andorra", "United States", "France", "United Kingdom", "Sweden"]
  );
}

#[tokio::test]
async fn comparison_returns_requested_countries_by_name() {
  let f = fixture().await;

  let rows = f
    .store
    .comparison(&[f.uk, f.france, f.andorra], 2019)
    .await
    .unwrap();
  assert_eq!(rows.len(), 3);
  assert_eq!(rows[0].country_name, "Andorra");
  assert_eq!(rows[1].country_name, "France");
  assert_eq!(rows[2].country_name, "United Kingdom");
  assert!(rows.iter().all(|r| r.year == 2019));

  let none = f.store.comparison(&[], 2019).await.unwrap();
  assert!(none.is_empty());
}

// ─── Year helpers ────────────────────────────────────────────────────────────

#[tokio::test]
async fn latest_year_and_country_years() {
  let f = fixture().await;

  assert_eq!(f.store.latest_year(f.uk).await.unwrap(), Some(2020));
  assert_eq!(f.store.latest_year(f.monaco).await.unwrap(), None);

  let years = f.store.country_years(f.uk).await.unwrap();
  assert_eq!(years, [2020, 2019, 2018]);
}

// ─── Writes ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_record_never_duplicates_a_year_row() {
  let f = fixture().await;
  let before = f.store.list_years().await.unwrap().len();

  f.store
    .insert_record(NewRecord {
      country_id: f.uk,
      year_value: 1999,
      top1_share: 11.1,
    })
    .await
    .unwrap();
  f.store
    .insert_record(NewRecord {
      country_id: f.france,
      year_value: 1999,
      top1_share: 9.9,
    })
    .await
    .unwrap();

  let years = f.store.list_years().await.unwrap();
  assert_eq!(years.len(), before + 1);
  assert_eq!(
    years.iter().filter(|y| y.year_value == 1999).count(),
    1
  );
}

#[tokio::test]
async fn insert_record_reuses_existing_year_id() {
  let f = fixture().await;

  let first = f
    .store
    .insert_record(NewRecord {
      country_id: f.uk,
      year_value: 1980,
      top1_share: 7.5,
    })
    .await
    .unwrap();
  let second = f
    .store
    .insert_record(NewRecord {
      country_id: f.us,
      year_value: 1980,
      top1_share: 8.0,
    })
    .await
    .unwrap();

  assert_eq!(first.year_id, second.year_id);
  assert_ne!(first.share_id, second.share_id);
}

#[tokio::test]
async fn insert_record_rejects_unknown_country() {
  let f = fixture().await;

  let err = f
    .store
    .insert_record(NewRecord {
      country_id: 9999,
      year_value: 2031,
      top1_share: 10.0,
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Constraint(_)), "got: {err}");

  // The year get-or-create ran in the same transaction, so the fresh
  // year row must have been rolled back with the failed insert.
  let years = f.store.list_years().await.unwrap();
  assert!(years.iter().all(|y| y.year_value != 2031));
}

#[tokio::test]
async fn insert_next_year_advances_from_latest() {
  let f = fixture().await;

  let first = f
    .store
    .insert_next_year(f.uk, 25.3)
    .await
    .unwrap()
    .expect("uk has data");
  assert_eq!(first.year_value, 2021);

  let second = f
    .store
    .insert_next_year(f.uk, 26.0)
    .await
    .unwrap()
    .expect("uk has data");
  assert_eq!(second.year_value, 2022);

  let years = f.store.list_years().await.unwrap();
  assert_eq!(years.iter().filter(|y| y.year_value == 2021).count(), 1);
  assert_eq!(years.iter().filter(|y| y.year_value == 2022).count(), 1);
}

#[tokio::test]
async fn insert_next_year_without_data_is_reported() {
  let f = fixture().await;
  let outcome = f.store.insert_next_year(f.monaco, 25.3).await.unwrap();
  assert!(outcome.is_none());
}

#[tokio::test]
async fn update_nonmatching_record_affects_nothing() {
  let f = fixture().await;

  let affected = f.store.update_record(f.monaco, 2019, 50.0).await.unwrap();
  assert_eq!(affected, 0);

  // No other row was touched.
  let timeline = f.store.country_timeline(f.uk).await.unwrap();
  let p2019 = timeline.iter().find(|p| p.year == 2019).unwrap();
  assert!((p2019.top1_share - 13.0).abs() < 1e-9);
}

#[tokio::test]
async fn update_matching_record_sets_new_share() {
  let f = fixture().await;

  let affected = f.store.update_record(f.uk, 2019, 13.7).await.unwrap();
  assert_eq!(affected, 1);

  let timeline = f.store.country_timeline(f.uk).await.unwrap();
  let p2019 = timeline.iter().find(|p| p.year == 2019).unwrap();
  assert!((p2019.top1_share - 13.7).abs() < 1e-9);
}

#[tokio::test]
async fn delete_range_is_inclusive_and_scoped() {
  let f = fixture().await;

  let deleted = f.store.delete_range(f.uk, 2018, 2019).await.unwrap();
  assert_eq!(deleted, 2);

  let years = f.store.country_years(f.uk).await.unwrap();
  assert_eq!(years, [2020]);

  // Other countries' rows in the same range survive.
  let sweden = f.store.country_years(f.sweden).await.unwrap();
  assert_eq!(sweden, [2020, 2019]);
}

#[tokio::test]
async fn delete_inverted_range_deletes_nothing() {
  let f = fixture().await;

  let deleted = f.store.delete_range(f.uk, 2020, 2018).await.unwrap();
  assert_eq!(deleted, 0);

  let years = f.store.country_years(f.uk).await.unwrap();
  assert_eq!(years, [2020, 2019, 2018]);
}
