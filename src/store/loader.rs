//! Seed loading
//!
//! The dataset is loaded once, at deployment time, from a JSON seed file:
//!
//! ```json
//! {
//!   "stations": [{"station": "USC00519397", "name": "WAIKIKI 717.2, HI US"}],
//!   "measurements": [{"station": "USC00519397", "date": "2010-01-01", "prcp": 0.08, "tobs": 65.0}]
//! }
//! ```
//!
//! Everything is inserted in a single transaction; a bad record leaves the
//! database untouched. Loading into a store that already holds rows is
//! refused, so a repeated `load` cannot duplicate measurements.

use std::fs;
use std::path::Path;

use rusqlite::params;
use serde::{Deserialize, Serialize};

use super::dates::IsoDate;
use super::errors::{StoreError, StoreResult};
use super::schema::{Measurement, Station};
use super::session::ClimateStore;

/// Contents of a seed file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub stations: Vec<Station>,
    #[serde(default)]
    pub measurements: Vec<Measurement>,
}

impl Seed {
    pub fn from_path(path: &Path) -> StoreResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> StoreResult<Self> {
        let seed: Seed = serde_json::from_str(json)?;
        seed.validate()?;
        Ok(seed)
    }

    /// Reject records that would break the data model
    pub fn validate(&self) -> StoreResult<()> {
        for (i, station) in self.stations.iter().enumerate() {
            if station.station.trim().is_empty() {
                return Err(StoreError::InvalidSeed(format!(
                    "stations[{}]: empty station code",
                    i
                )));
            }
        }

        for (i, measurement) in self.measurements.iter().enumerate() {
            if measurement.station.trim().is_empty() {
                return Err(StoreError::InvalidSeed(format!(
                    "measurements[{}]: empty station code",
                    i
                )));
            }
            measurement.date.parse::<IsoDate>().map_err(|e| {
                StoreError::InvalidSeed(format!("measurements[{}]: {}", i, e))
            })?;
        }

        Ok(())
    }
}

/// Row counts written by a load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub stations: usize,
    pub measurements: usize,
}

impl ClimateStore {
    /// Insert a seed into the store in one transaction
    pub fn load(&self, seed: &Seed) -> StoreResult<LoadSummary> {
        seed.validate()?;

        let mut conn = self.writer()?;
        let tx = conn.transaction()?;

        let stations: i64 = tx.query_row("SELECT COUNT(*) FROM station", [], |row| row.get(0))?;
        let measurements: i64 =
            tx.query_row("SELECT COUNT(*) FROM measurement", [], |row| row.get(0))?;
        if stations > 0 || measurements > 0 {
            return Err(StoreError::AlreadyLoaded {
                stations,
                measurements,
            });
        }

        {
            let mut insert_station = tx.prepare(
                "INSERT INTO station (station, name, latitude, longitude, elevation) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for s in &seed.stations {
                insert_station.execute(params![
                    s.station,
                    s.name,
                    s.latitude,
                    s.longitude,
                    s.elevation
                ])?;
            }

            let mut insert_measurement = tx.prepare(
                "INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for m in &seed.measurements {
                insert_measurement.execute(params![m.station, m.date, m.prcp, m.tobs])?;
            }
        }
        tx.commit()?;

        Ok(LoadSummary {
            stations: seed.stations.len(),
            measurements: seed.measurements.len(),
        })
    }
}
