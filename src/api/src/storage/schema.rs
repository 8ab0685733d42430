//! Schema reflection for the climate store
//!
//! The store is created and owned elsewhere; nothing here issues DDL.
//! Tables read by the API:
//! - station: one row per weather station
//! - measurement: daily precipitation and temperature observations

use anyhow::{bail, Context, Result};
use rusqlite::Connection;

pub const STATION_TABLE: &str = "station";
pub const MEASUREMENT_TABLE: &str = "measurement";

/// Columns the API reads from `station`
pub const STATION_COLUMNS: [&str; 5] = ["station", "name", "latitude", "longitude", "elevation"];

/// Columns the API reads from `measurement`
pub const MEASUREMENT_COLUMNS: [&str; 4] = ["station", "date", "prcp", "tobs"];

/// A column as reported by `pragma_table_info`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    pub decl_type: String,
}

/// A reflected table
#[derive(Debug, Clone)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<ColumnInfo>,
}

impl TableSchema {
    pub fn column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns.iter().find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// `name TYPE, ...` for startup logging
    pub fn describe(&self) -> String {
        self.columns
            .iter()
            .map(|c| format!("{} {}", c.name, c.decl_type))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn require_columns(&self, required: &[&str]) -> Result<()> {
        let missing: Vec<&str> = required
            .iter()
            .copied()
            .filter(|name| self.column(name).is_none())
            .collect();

        if !missing.is_empty() {
            bail!(
                "Table '{}' is missing required columns: {}",
                self.name,
                missing.join(", ")
            );
        }
        Ok(())
    }
}

/// Entity descriptors for the two tables the API serves
#[derive(Debug, Clone)]
pub struct ReflectedSchema {
    pub station: TableSchema,
    pub measurement: TableSchema,
}

/// List user tables in the store
pub fn list_tables(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
    )?;

    let tables = stmt
        .query_map([], |row| row.get(0))?
        .collect::<std::result::Result<Vec<String>, _>>()?;

    Ok(tables)
}

/// Read column descriptors for one table
pub fn reflect_table(conn: &Connection, table: &str) -> Result<TableSchema> {
    let mut stmt = conn.prepare("SELECT name, type FROM pragma_table_info(?1) ORDER BY cid")?;

    let columns = stmt
        .query_map([table], |row| {
            Ok(ColumnInfo {
                name: row.get(0)?,
                decl_type: row.get(1)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()
        .with_context(|| format!("Failed to read columns of '{}'", table))?;

    if columns.is_empty() {
        bail!("Table '{}' not found in database", table);
    }

    Ok(TableSchema {
        name: table.to_string(),
        columns,
    })
}

/// Reflect `station` and `measurement`, failing if either is absent or
/// lacks a column the API reads
pub fn reflect(conn: &Connection) -> Result<ReflectedSchema> {
    let tables = list_tables(conn)?;
    for required in [STATION_TABLE, MEASUREMENT_TABLE] {
        if !tables.iter().any(|t| t == required) {
            bail!(
                "Table '{}' not found in database (found: [{}])",
                required,
                tables.join(", ")
            );
        }
    }

    let station = reflect_table(conn, STATION_TABLE)?;
    station.require_columns(&STATION_COLUMNS)?;

    let measurement = reflect_table(conn, MEASUREMENT_TABLE)?;
    measurement.require_columns(&MEASUREMENT_COLUMNS)?;

    Ok(ReflectedSchema {
        station,
        measurement,
    })
}
