//! Scoped access to the climate store
//!
//! Each request opens its own read-only connection on the blocking pool and
//! drops it when the query returns, so no connection is shared between requests.

use anyhow::{Context, Result};
use rusqlite::{Connection, OpenFlags};
use std::path::PathBuf;

use super::repository::ClimateRepository;
use super::schema::{reflect, ReflectedSchema};

/// Handle to the store; cheap to clone
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Open the store and reflect its schema, failing if it is unreachable or
    /// does not carry the tables the API reads
    pub fn open(path: impl Into<PathBuf>) -> Result<(Self, ReflectedSchema)> {
        let db = Self::new(path);
        let conn = db.connect()?;
        let schema = reflect(&conn)
            .with_context(|| format!("Failed to reflect schema of {}", db.path.display()))?;
        Ok((db, schema))
    }

    /// Open a read-only connection; never creates the file
    pub fn connect(&self) -> Result<Connection> {
        Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("Failed to open database {}", self.path.display()))
    }

    /// Run one repository operation on a fresh connection
    pub async fn run<T, F>(&self, operation: F) -> Result<T>
    where
        F: FnOnce(&ClimateRepository<'_>) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = self.clone();
        tokio::task::spawn_blocking(move || {
            let conn = db.connect()?;
            let repo = ClimateRepository::new(&conn);
            operation(&repo)
        })
        .await
        .context("Database task failed")?
    }
}
