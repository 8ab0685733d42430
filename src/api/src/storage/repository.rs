//! Read queries over the reflected climate tables
//!
//! Date bounds are bound as text and compared by SQLite, so they only order
//! correctly against zero-padded `YYYY-MM-DD` values. Malformed bounds match
//! nothing (or everything) rather than erroring.

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, Row};
use serde_json::Number;

use crate::types::TemperatureSummary;

/// Last recorded day in the Hawaii dataset; "last year" windows count back from here
pub const REFERENCE_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2018, 6, 2) {
    Some(date) => date,
    None => panic!("invalid reference date"),
};

/// Length of the "last year" window
pub const LAST_YEAR_DAYS: i64 = 365;

/// Exclusive lower bound of the "last year" window, as stored in `measurement.date`
pub fn last_year_cutoff() -> String {
    (REFERENCE_DATE - Duration::days(LAST_YEAR_DAYS))
        .format("%Y-%m-%d")
        .to_string()
}

/// A single (date, temperature) observation
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub date: String,
    pub tobs: Option<Number>,
}

/// Map a stored cell onto a JSON number, keeping integers as integers
fn numeric(value: ValueRef<'_>) -> Option<Number> {
    match value {
        ValueRef::Integer(i) => Some(Number::from(i)),
        ValueRef::Real(f) => Number::from_f64(f),
        ValueRef::Text(text) => std::str::from_utf8(text)
            .ok()
            .and_then(|s| s.trim().parse::<f64>().ok())
            .and_then(Number::from_f64),
        ValueRef::Null | ValueRef::Blob(_) => None,
    }
}

fn summary_row(row: &Row<'_>) -> rusqlite::Result<TemperatureSummary> {
    Ok(TemperatureSummary {
        min: numeric(row.get_ref(0)?),
        avg: numeric(row.get_ref(1)?),
        max: numeric(row.get_ref(2)?),
    })
}

/// Queries against one scoped connection
pub struct ClimateRepository<'a> {
    conn: &'a Connection,
}

impl<'a> ClimateRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Date and temperature of every measurement after `after`, ordered by date
    pub fn observations_after(&self, after: &str) -> Result<Vec<Observation>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT date, tobs
            FROM measurement
            WHERE date > ?1
            ORDER BY date, rowid
            "#,
        )?;

        let observations = stmt
            .query_map([after], |row| {
                Ok(Observation {
                    date: row.get(0)?,
                    tobs: numeric(row.get_ref(1)?),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("Failed to read observations")?;

        Ok(observations)
    }

    /// Distinct station names in first-seen order
    pub fn station_names(&self) -> Result<Vec<Option<String>>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT name
            FROM station
            GROUP BY name
            ORDER BY MIN(rowid)
            "#,
        )?;

        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<Option<String>>, _>>()
            .context("Failed to read station names")?;

        Ok(names)
    }

    /// Temperatures of every measurement after `after`, in result order
    pub fn temperatures_after(&self, after: &str) -> Result<Vec<Option<Number>>> {
        let mut stmt = self
            .conn
            .prepare("SELECT tobs FROM measurement WHERE date > ?1")?;

        let temps = stmt
            .query_map([after], |row| Ok(numeric(row.get_ref(0)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("Failed to read temperatures")?;

        Ok(temps)
    }

    /// Min/avg/max temperature strictly after `start` and, if given, strictly before `end`.
    ///
    /// An aggregate always yields one row, so an empty match gives all-`None` fields.
    pub fn temperature_summary(&self, start: &str, end: Option<&str>) -> Result<TemperatureSummary> {
        let summary = match end {
            Some(end) => self.conn.query_row(
                r#"
                SELECT MIN(tobs), AVG(tobs), MAX(tobs)
                FROM measurement
                WHERE date < ?1 AND date > ?2
                "#,
                [end, start],
                summary_row,
            ),
            None => self.conn.query_row(
                r#"
                SELECT MIN(tobs), AVG(tobs), MAX(tobs)
                FROM measurement
                WHERE date > ?1
                "#,
                [start],
                summary_row,
            ),
        }
        .context("Failed to summarize temperatures")?;

        Ok(summary)
    }
}
