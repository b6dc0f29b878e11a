//! [`SqliteStore`] — the SQLite implementation of [`IncomeStore`].

use std::path::Path;

use topshare_core::{
  geo::{Country, Region},
  record::{InsertedRecord, NewRecord, Year},
  report::{
    CountryShare, CountryYearShare, SubregionAverage, TimelinePoint,
    TrendPoint,
  },
  store::IncomeStore,
};

use crate::{Error, Result, schema::SCHEMA};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An income-share store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. One clone
/// per request handler is the intended usage; SQLite arbitrates concurrent
/// writers itself.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── IncomeStore impl ────────────────────────────────────────────────────────

impl IncomeStore for SqliteStore {
  type Error = Error;

  // ── Reference data ────────────────────────────────────────────────────────

  async fn list_countries(&self) -> Result<Vec<Country>> {
    let rows = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT country_id, name, region_id FROM countries ORDER BY name",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(Country {
              country_id: row.get(0)?,
              name:       row.get(1)?,
              region_id:  row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  async fn list_years(&self) -> Result<Vec<Year>> {
    let rows = self
      .conn
      .call(|conn| {
        let mut stmt = conn
          .prepare("SELECT year_id, year_value FROM years ORDER BY year_value")?;
        let rows = stmt
          .query_map([], |row| {
            Ok(Year { year_id: row.get(0)?, year_value: row.get(1)? })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  async fn list_regions(&self) -> Result<Vec<String>> {
    let rows = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT DISTINCT region_name FROM regions
           WHERE region_name IS NOT NULL AND region_name != ''
           ORDER BY region_name",
        )?;
        let rows = stmt
          .query_map([], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  async fn list_subregions(&self) -> Result<Vec<String>> {
    let rows = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT DISTINCT sub_region_name FROM regions
           WHERE sub_region_name IS NOT NULL AND sub_region_name != ''
           ORDER BY sub_region_name",
        )?;
        let rows = stmt
          .query_map([], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  // ── Seeding ───────────────────────────────────────────────────────────────

  async fn add_region(
    &self,
    region_name: Option<String>,
    sub_region_name: Option<String>,
  ) -> Result<Region> {
    let region = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO regions (region_name, sub_region_name) VALUES (?1, ?2)",
          rusqlite::params![region_name, sub_region_name],
        )?;
        Ok(Region {
          region_id: conn.last_insert_rowid(),
          region_name,
          sub_region_name,
        })
      })
      .await?;
    Ok(region)
  }

  async fn add_country(
    &self,
    name: String,
    region_id: Option<i64>,
  ) -> Result<Country> {
    let country = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO countries (name, region_id) VALUES (?1, ?2)",
          rusqlite::params![name, region_id],
        )?;
        Ok(Country { country_id: conn.last_insert_rowid(), name, region_id })
      })
      .await?;
    Ok(country)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn country_timeline(&self, country_id: i64) -> Result<Vec<TimelinePoint>> {
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT y.year_value, i.top1_share, c.name
           FROM income_shares i
           JOIN countries c ON i.country_id = c.country_id
           JOIN years     y ON i.year_id    = y.year_id
           WHERE i.country_id = ?1
           ORDER BY y.year_value DESC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![country_id], |row| {
            Ok(TimelinePoint {
              year:         row.get(0)?,
              top1_share:   row.get(1)?,
              country_name: row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  async fn subregion_snapshot(
    &self,
    sub_region_name: &str,
    year_value: i32,
  ) -> Result<Vec<CountryShare>> {
    let sub_region_name = sub_region_name.to_owned();
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT c.name, i.top1_share
           FROM income_shares i
           JOIN countries c ON i.country_id = c.country_id
           JOIN regions   r ON c.region_id  = r.region_id
           JOIN years     y ON i.year_id    = y.year_id
           WHERE r.sub_region_name = ?1 AND y.year_value = ?2
           ORDER BY i.top1_share ASC, c.name ASC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![sub_region_name, year_value], |row| {
            Ok(CountryShare {
              country_name: row.get(0)?,
              top1_share:   row.get(1)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  async fn region_averages(
    &self,
    region_name: &str,
    year_value: i32,
  ) -> Result<Vec<SubregionAverage>> {
    let region_name = region_name.to_owned();
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT r.sub_region_name, AVG(i.top1_share) AS avg_share
           FROM income_shares i
           JOIN countries c ON i.country_id = c.country_id
           JOIN regions   r ON c.region_id  = r.region_id
           JOIN years     y ON i.year_id    = y.year_id
           WHERE r.region_name = ?1 AND y.year_value = ?2
             AND r.sub_region_name IS NOT NULL AND r.sub_region_name != ''
           GROUP BY r.sub_region_name
           ORDER BY avg_share ASC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![region_name, year_value], |row| {
            Ok(SubregionAverage {
              subregion_name: row.get(0)?,
              avg_share:      row.get(1)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  async fn regional_trend(&self, region_name: &str) -> Result<Vec<TrendPoint>> {
    let region_name = region_name.to_owned();
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT y.year_value, AVG(i.top1_share) AS avg_share
           FROM income_shares i
           JOIN countries c ON i.country_id = c.country_id
           JOIN regions   r ON c.region_id  = r.region_id
           JOIN years     y ON i.year_id    = y.year_id
           WHERE r.region_name = ?1
           GROUP BY y.year_value
           ORDER BY y.year_value ASC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![region_name], |row| {
            Ok(TrendPoint { year: row.get(0)?, avg_share: row.get(1)? })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  async fn search_countries(&self, keyword: &str) -> Result<Vec<CountryYearShare>> {
    // SQLite LIKE is case-insensitive for ASCII, matching the intended
    // keyword semantics. "Latest" is resolved per country via the
    // correlated MAX subquery.
    let pattern = format!("%{keyword}%");
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT c.name, i.top1_share, y.year_value
           FROM countries c
           JOIN income_shares i ON i.country_id = c.country_id
           JOIN years         y ON i.year_id    = y.year_id
           WHERE c.name LIKE ?1
             AND y.year_value = (
               SELECT MAX(y2.year_value)
               FROM income_shares i2
               JOIN years y2 ON i2.year_id = y2.year_id
               WHERE i2.country_id = c.country_id
             )
           ORDER BY c.name",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![pattern], |row| {
            Ok(CountryYearShare {
              country_name: row.get(0)?,
              top1_share:   row.get(1)?,
              year:         row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  async fn top_countries(
    &self,
    year_value: i32,
    limit: u32,
  ) -> Result<Vec<CountryShare>> {
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT c.name, i.top1_share
           FROM income_shares i
           JOIN countries c ON i.country_id = c.country_id
           JOIN years     y ON i.year_id    = y.year_id
           WHERE y.year_value = ?1
           ORDER BY i.top1_share DESC, c.name ASC
           LIMIT ?2",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![year_value, limit], |row| {
            Ok(CountryShare {
              country_name: row.get(0)?,
              top1_share:   row.get(1)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  async fn comparison(
    &self,
    country_ids: &[i64],
    year_value: i32,
  ) -> Result<Vec<CountryYearShare>> {
    if country_ids.is_empty() {
      return Ok(vec![]);
    }

    let ids = country_ids.to_vec();
    let rows = self
      .conn
      .call(move |conn| {
        // Placeholder list built to size; values are still bound, never
        // interpolated.
        let placeholders = vec!["?"; ids.len()].join(",");
        let sql = format!(
          "SELECT c.name, i.top1_share, y.year_value
           FROM income_shares i
           JOIN countries c ON i.country_id = c.country_id
           JOIN years     y ON i.year_id    = y.year_id
           WHERE c.country_id IN ({placeholders}) AND y.year_value = ?
           ORDER BY c.name"
        );

        let mut stmt = conn.prepare(&sql)?;
        let params = ids
          .iter()
          .copied()
          .chain(std::iter::once(i64::from(year_value)));
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), |row| {
            Ok(CountryYearShare {
              country_name: row.get(0)?,
              top1_share:   row.get(1)?,
              year:         row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  async fn latest_year(&self, country_id: i64) -> Result<Option<i32>> {
    let latest = self
      .conn
      .call(move |conn| {
        // MAX over zero rows yields a single NULL row.
        let latest: Option<i32> = conn.query_row(
          "SELECT MAX(y.year_value)
           FROM income_shares i
           JOIN years y ON i.year_id = y.year_id
           WHERE i.country_id = ?1",
          rusqlite::params![country_id],
          |row| row.get(0),
        )?;
        Ok(latest)
      })
      .await?;
    Ok(latest)
  }

  async fn country_years(&self, country_id: i64) -> Result<Vec<i32>> {
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT DISTINCT y.year_value
           FROM income_shares i
           JOIN years y ON i.year_id = y.year_id
           WHERE i.country_id = ?1
           ORDER BY y.year_value DESC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![country_id], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn insert_record(&self, record: NewRecord) -> Result<InsertedRecord> {
    let inserted = self
      .conn
      .call(move |conn| {
        // Get-or-create the year and insert the share in one transaction:
        // a failure between the statements leaves no orphan year row.
        // INSERT OR IGNORE rides the UNIQUE(year_value) constraint, so a
        // concurrent creator of the same year collapses to a no-op.
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT OR IGNORE INTO years (year_value) VALUES (?1)",
          rusqlite::params![record.year_value],
        )?;
        let year_id: i64 = tx.query_row(
          "SELECT year_id FROM years WHERE year_value = ?1",
          rusqlite::params![record.year_value],
          |row| row.get(0),
        )?;
        tx.execute(
          "INSERT INTO income_shares (country_id, year_id, top1_share)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![record.country_id, year_id, record.top1_share],
        )?;
        let share_id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(InsertedRecord { share_id, year_id, year_value: record.year_value })
      })
      .await?;
    Ok(inserted)
  }

  async fn insert_next_year(
    &self,
    country_id: i64,
    top1_share: f64,
  ) -> Result<Option<InsertedRecord>> {
    let latest = match self.latest_year(country_id).await? {
      Some(latest) => latest,
      None => return Ok(None),
    };

    let inserted = self
      .insert_record(NewRecord {
        country_id,
        year_value: latest + 1,
        top1_share,
      })
      .await?;
    Ok(Some(inserted))
  }

  async fn update_record(
    &self,
    country_id: i64,
    year_value: i32,
    top1_share: f64,
  ) -> Result<u64> {
    let affected = self
      .conn
      .call(move |conn| {
        let affected = conn.execute(
          "UPDATE income_shares
           SET top1_share = ?1
           WHERE country_id = ?2
             AND year_id IN (SELECT year_id FROM years WHERE year_value = ?3)",
          rusqlite::params![top1_share, country_id, year_value],
        )?;
        Ok(affected as u64)
      })
      .await?;
    Ok(affected)
  }

  async fn delete_range(
    &self,
    country_id: i64,
    start_year: i32,
    end_year: i32,
  ) -> Result<u64> {
    let deleted = self
      .conn
      .call(move |conn| {
        let deleted = conn.execute(
          "DELETE FROM income_shares
           WHERE country_id = ?1
             AND year_id IN (
               SELECT year_id FROM years WHERE year_value BETWEEN ?2 AND ?3
             )",
          rusqlite::params![country_id, start_year, end_year],
        )?;
        Ok(deleted as u64)
      })
      .await?;
    Ok(deleted)
  }
}
