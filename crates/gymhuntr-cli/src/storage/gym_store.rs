//! SQLite-backed gym document store
//!
//! One table keyed by the gym's external id, written with insert-if-absent
//! semantics: an existing document is never overwritten.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{HuntrError, Result};
use crate::models::{GeoPoint, Gym};

/// SQLite database holding discovered gyms
pub struct GymStore {
    conn: Connection,
}

impl GymStore {
    /// Open or create the gym store
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())
            .map_err(|e| HuntrError::Database(format!("Failed to open gym store: {}", e)))?;

        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| HuntrError::Database(format!("Failed to open in-memory store: {}", e)))?;

        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Run migrations
    fn migrate(&self) -> Result<()> {
        self.conn
            .execute_batch(
                r#"
                CREATE TABLE IF NOT EXISTS gyms (
                    gym_id INTEGER PRIMARY KEY,
                    name TEXT NOT NULL,
                    lat REAL NOT NULL,
                    lon REAL NOT NULL,
                    enabled INTEGER NOT NULL,
                    url TEXT NOT NULL,
                    inid TEXT NOT NULL
                );
                "#,
            )
            .map_err(|e| HuntrError::Database(format!("Failed to run migrations: {}", e)))?;

        Ok(())
    }

    /// Insert a gym unless a document with its id already exists.
    ///
    /// Returns true when a row was written, false on the idempotent skip.
    /// Never updates an existing document.
    pub fn upsert_if_absent(&self, gym: &Gym) -> Result<bool> {
        let existing: Option<i64> = self
            .conn
            .query_row(
                "SELECT gym_id FROM gyms WHERE gym_id = ?",
                params![gym.gym_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| HuntrError::Database(format!("Failed to look up gym: {}", e)))?;

        if existing.is_some() {
            return Ok(false);
        }

        self.conn
            .execute(
                "INSERT INTO gyms (gym_id, name, lat, lon, enabled, url, inid)
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
                params![
                    gym.gym_id,
                    gym.name,
                    gym.location.lat,
                    gym.location.lon,
                    gym.enabled,
                    gym.url,
                    gym.inid
                ],
            )
            .map_err(|e| HuntrError::Database(format!("Failed to insert gym: {}", e)))?;

        Ok(true)
    }

    /// Fetch a gym by its external id
    pub fn get(&self, gym_id: i64) -> Result<Option<Gym>> {
        self.conn
            .query_row(
                "SELECT gym_id, name, lat, lon, enabled, url, inid
                 FROM gyms WHERE gym_id = ?",
                params![gym_id],
                |row| {
                    Ok(Gym {
                        gym_id: row.get(0)?,
                        name: row.get(1)?,
                        location: GeoPoint {
                            lat: row.get(2)?,
                            lon: row.get(3)?,
                        },
                        enabled: row.get(4)?,
                        url: row.get(5)?,
                        inid: row.get(6)?,
                    })
                },
            )
            .optional()
            .map_err(|e| HuntrError::Database(format!("Failed to get gym: {}", e)))
    }

    /// Number of gyms stored
    pub fn count(&self) -> Result<u64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM gyms", [], |row| row.get::<_, i64>(0))
            .map(|n| n as u64)
            .map_err(|e| HuntrError::Database(format!("Failed to count gyms: {}", e)))
    }
}
