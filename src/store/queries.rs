//! Aggregate read queries
//!
//! Date filters compare the stored `YYYY-MM-DD` text directly. Cutoffs and
//! request dates are always rendered through [`IsoDate`] so the comparison
//! matches calendar order.

use std::collections::BTreeMap;

use rusqlite::{params, OptionalExtension};
use serde::Serialize;

use super::dates::{DateRange, IsoDate};
use super::errors::{StoreError, StoreResult};
use super::session::ClimateSession;

/// Precipitation keyed by date
pub type PrecipitationByDate = BTreeMap<String, Option<f64>>;

/// Station listing entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationEntry {
    pub station: String,
    pub name: String,
}

/// Temperature observation for one day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TobsEntry {
    pub date: String,
    pub tobs: Option<f64>,
}

/// Station ranked by number of measurements
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationActivity {
    pub station: String,
    pub count: i64,
}

/// Min/avg/max of `tobs` over a date window. All `None` when the window is empty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemperatureStats {
    #[serde(rename = "TMIN")]
    pub min: Option<f64>,
    #[serde(rename = "TAVG")]
    pub avg: Option<f64>,
    #[serde(rename = "TMAX")]
    pub max: Option<f64>,
}

impl TemperatureStats {
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.avg.is_none() && self.max.is_none()
    }
}

impl ClimateSession {
    /// Most recent measurement date, `None` if there are no measurements
    pub fn latest_date(&self) -> StoreResult<Option<String>> {
        let latest: Option<String> =
            self.conn
                .query_row("SELECT MAX(date) FROM measurement", [], |row| row.get(0))?;
        Ok(latest)
    }

    /// Latest date minus 365 days
    pub fn last_year_cutoff(&self) -> StoreResult<Option<IsoDate>> {
        let Some(latest) = self.latest_date()? else {
            return Ok(None);
        };

        let latest: IsoDate = latest
            .parse()
            .map_err(|_| StoreError::InvalidStoredDate(latest.clone()))?;

        latest
            .year_earlier()
            .map(Some)
            .ok_or_else(|| StoreError::InvalidStoredDate(latest.to_string()))
    }

    /// Precipitation for every measurement in the last year of data.
    ///
    /// Several stations report on the same day; the row stored last wins.
    pub fn precipitation_last_year(&self) -> StoreResult<PrecipitationByDate> {
        let mut by_date = PrecipitationByDate::new();

        let Some(cutoff) = self.last_year_cutoff()? else {
            return Ok(by_date);
        };

        let mut stmt = self
            .conn
            .prepare("SELECT date, prcp FROM measurement WHERE date >= ?1 ORDER BY id")?;
        let rows = stmt.query_map(params![cutoff.to_string()], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, Option<f64>>(1)?))
        })?;

        for row in rows {
            let (date, prcp) = row?;
            by_date.insert(date, prcp);
        }

        Ok(by_date)
    }

    /// All stations in storage order
    pub fn stations(&self) -> StoreResult<Vec<StationEntry>> {
        let mut stmt = self
            .conn
            .prepare("SELECT station, name FROM station ORDER BY id")?;
        let stations = stmt
            .query_map([], |row| {
                Ok(StationEntry {
                    station: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(stations)
    }

    /// Station with the most measurements. Ties go to the lowest station code.
    pub fn most_active_station(&self) -> StoreResult<Option<StationActivity>> {
        let activity = self
            .conn
            .query_row(
                "SELECT station, COUNT(*) AS n FROM measurement \
                 GROUP BY station ORDER BY n DESC, station ASC LIMIT 1",
                [],
                |row| {
                    Ok(StationActivity {
                        station: row.get(0)?,
                        count: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(activity)
    }

    /// Temperature observations from the most active station over the last year
    pub fn tobs_last_year(&self) -> StoreResult<Vec<TobsEntry>> {
        let Some(activity) = self.most_active_station()? else {
            return Ok(Vec::new());
        };
        let Some(cutoff) = self.last_year_cutoff()? else {
            return Ok(Vec::new());
        };

        let mut stmt = self.conn.prepare(
            "SELECT date, tobs FROM measurement \
             WHERE station = ?1 AND date >= ?2 ORDER BY date, id",
        )?;
        let entries = stmt
            .query_map(params![activity.station, cutoff.to_string()], |row| {
                Ok(TobsEntry {
                    date: row.get(0)?,
                    tobs: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    /// Min/avg/max temperature over an inclusive date window
    pub fn temperature_stats(&self, range: &DateRange) -> StoreResult<TemperatureStats> {
        const SELECT: &str = "SELECT MIN(tobs), AVG(tobs), MAX(tobs) FROM measurement";

        let start = range.start().to_string();
        let stats = match range.end() {
            Some(end) => self.conn.query_row(
                &format!("{SELECT} WHERE date >= ?1 AND date <= ?2"),
                params![start, end.to_string()],
                stats_from_row,
            )?,
            None => self.conn.query_row(
                &format!("{SELECT} WHERE date >= ?1"),
                params![start],
                stats_from_row,
            )?,
        };
        Ok(stats)
    }
}

fn stats_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<TemperatureStats> {
    Ok(TemperatureStats {
        min: row.get(0)?,
        avg: row.get(1)?,
        max: row.get(2)?,
    })
}
