// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Airlift allocation office.
//!
//! Stores missions, waitlist entries and manifest entries in `SQLite`
//! through Diesel, and implements the core `StationStore` trait.
//!
//! ## Tables
//!
//! - `missions` — one row per mission; the route is a JSON array
//! - `waitlist_entries` — one row per registered passenger; the
//!   nullable `allocated_mission_id` column is the allocation state
//! - `manifest_entries` — one row per passenger on a manifest, with an
//!   optional back-reference to the originating waitlist entry
//!
//! ## Atomicity
//!
//! Every `commit` is a single unit. The allocation commit runs inside a
//! transaction and claims the waitlist row with a guarded update, so two
//! writers can never allocate the same entry.
//!
//! ## Testing
//!
//! Tests run against isolated in-memory databases created by
//! [`Persistence::new_in_memory`].

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use airlift::{StateChange, StationStore};
use airlift_domain::{Mission, Station, WaitlistEntry};
use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// `SQLite`-backed storage for stations, missions and manifests.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives its own database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String =
            format!("file:airlift_memdb_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        info!(path = path_str, "Opened file database");
        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    /// Returns the station that owns a mission.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the mission does not exist.
    pub fn mission_station(&mut self, mission_id: i64) -> Result<Station, PersistenceError> {
        queries::missions::lookup_mission_station(&mut self.conn, mission_id)
    }

    /// Counts the unallocated waitlist entries of a station.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_waiting(&mut self, station: &Station) -> Result<usize, PersistenceError> {
        queries::waitlist::count_waiting(&mut self.conn, station)
    }
}

impl StationStore for Persistence {
    type Error = PersistenceError;

    fn load_waitlist(&mut self, station: &Station) -> Result<Vec<WaitlistEntry>, PersistenceError> {
        queries::waitlist::load_waitlist(&mut self.conn, station)
    }

    fn load_missions(&mut self, station: &Station) -> Result<Vec<Mission>, PersistenceError> {
        queries::missions::load_missions(&mut self.conn, station)
    }

    fn commit(&mut self, change: &StateChange) -> Result<Option<i64>, PersistenceError> {
        mutations::commit_change(&mut self.conn, change)
    }
}
