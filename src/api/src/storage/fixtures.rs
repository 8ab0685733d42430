//! Test stores shaped like the Hawaii climate database

use rusqlite::{params, Connection, Result};
use std::path::PathBuf;
use tempfile::TempDir;

pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute(
        r#"
        CREATE TABLE station (
            id INTEGER PRIMARY KEY,
            station TEXT,
            name TEXT,
            latitude FLOAT,
            longitude FLOAT,
            elevation FLOAT
        )
        "#,
        [],
    )?;

    conn.execute(
        r#"
        CREATE TABLE measurement (
            id INTEGER PRIMARY KEY,
            station TEXT,
            date TEXT,
            prcp FLOAT,
            tobs FLOAT
        )
        "#,
        [],
    )?;

    Ok(())
}

pub fn insert_station(conn: &Connection, station: &str, name: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO station (station, name, latitude, longitude, elevation) VALUES (?1, ?2, 21.2716, -157.8168, 3.0)",
        params![station, name],
    )?;
    Ok(())
}

pub fn insert_measurement(
    conn: &Connection,
    station: &str,
    date: &str,
    prcp: Option<f64>,
    tobs: Option<f64>,
) -> Result<()> {
    conn.execute(
        "INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)",
        params![station, date, prcp, tobs],
    )?;
    Ok(())
}

/// Create an empty store file with both tables; the directory must outlive the path
pub fn empty_store() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hawaii.sqlite");
    let conn = Connection::open(&path).unwrap();
    create_tables(&conn).unwrap();
    (dir, path)
}

/// Store with two stations and a handful of measurements around the one-year cutoff
pub fn seeded_store() -> (TempDir, PathBuf) {
    let (dir, path) = empty_store();
    let conn = Connection::open(&path).unwrap();

    insert_station(&conn, "USC00519397", "WAIKIKI 717.2, HI US").unwrap();
    insert_station(&conn, "USC00513117", "KANEOHE 838.1, HI US").unwrap();

    let rows = [
        ("USC00519397", "2017-06-01", Some(0.0), Some(70.0)),
        ("USC00519397", "2017-06-02", Some(0.1), Some(71.0)),
        ("USC00519397", "2017-06-03", Some(0.0), Some(74.0)),
        ("USC00513117", "2017-06-03", None, Some(76.0)),
        ("USC00519397", "2018-01-15", Some(0.5), None),
        ("USC00513117", "2018-05-30", Some(0.2), Some(79.0)),
    ];
    for (station, date, prcp, tobs) in rows {
        insert_measurement(&conn, station, date, prcp, tobs).unwrap();
    }

    (dir, path)
}
