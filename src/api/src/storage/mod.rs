//! SQLite storage for the Hawaii climate store
//!
//! The schema is reflected once at startup; every request then reads through
//! its own short-lived connection.

pub mod database;
pub mod repository;
pub mod schema;

#[cfg(test)]
pub(crate) mod fixtures;

pub use database::Database;
pub use repository::last_year_cutoff;
