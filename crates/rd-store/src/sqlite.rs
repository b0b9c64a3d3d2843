//! SQLite store backend (feature `sqlite`).
//!
//! Two tables, `facilities` and `units`.  Timestamps are stored as Unix
//! milliseconds.  The connection sits behind a `parking_lot::Mutex`; a busy
//! timeout turns a locked database file into an error instead of a hang.

use std::path::Path;
use std::time::Duration;

use chrono::DateTime;
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, Row};

use rd_core::{Facility, FacilityId, GeoPoint, MobileUnit, Timestamp, UnitId, UnitPosition, UnitStatus};

use crate::{FacilityStore, StoreError, StoreResult, UnitStore};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const UNIT_COLUMNS: &str = "id, identifier, latitude, longitude, status, updated_at_ms";

/// Implements [`FacilityStore`] and [`UnitStore`] over one SQLite database.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database at `path`.  Call
    /// [`init_schema`](Self::init_schema) before first use.
    pub fn open(path: &Path) -> StoreResult<Self> {
        Self::configure(Connection::open(path)?)
    }

    /// A private in-memory database, mostly for tests.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::configure(Connection::open_in_memory()?)
    }

    fn configure(conn: Connection) -> StoreResult<Self> {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    /// Create tables and indexes if they do not exist.
    pub fn init_schema(&self) -> StoreResult<()> {
        self.conn.lock().execute_batch(
            "PRAGMA journal_mode = WAL;
             CREATE TABLE IF NOT EXISTS facilities (
                 id        INTEGER PRIMARY KEY,
                 name      TEXT    NOT NULL,
                 address   TEXT    NOT NULL DEFAULT '',
                 latitude  REAL    NOT NULL,
                 longitude REAL    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS units (
                 id            INTEGER PRIMARY KEY,
                 identifier    TEXT    NOT NULL UNIQUE,
                 latitude      REAL    NOT NULL,
                 longitude     REAL    NOT NULL,
                 status        TEXT    NOT NULL DEFAULT 'available'
                               CHECK (status IN ('available', 'unavailable')),
                 updated_at_ms INTEGER NOT NULL
             );
             CREATE INDEX IF NOT EXISTS idx_units_status ON units (status);",
        )?;
        Ok(())
    }

    pub fn insert_facility(&self, facility: &Facility) -> StoreResult<()> {
        GeoPoint::try_new(facility.position.lat, facility.position.lon)?;
        self.conn.lock().execute(
            "INSERT OR REPLACE INTO facilities (id, name, address, latitude, longitude) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![
                facility.id.get(),
                facility.name,
                facility.address,
                facility.position.lat,
                facility.position.lon,
            ],
        )?;
        Ok(())
    }

    /// # Errors
    ///
    /// [`StoreError::DuplicateIdentifier`] if the identifier is already used.
    pub fn insert_unit(&self, unit: &MobileUnit) -> StoreResult<()> {
        GeoPoint::try_new(unit.position.lat, unit.position.lon)?;
        let res = self.conn.lock().execute(
            "INSERT INTO units (id, identifier, latitude, longitude, status, updated_at_ms) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                unit.id.get(),
                unit.identifier,
                unit.position.lat,
                unit.position.lon,
                unit.status.as_str(),
                unit.updated_at.timestamp_millis(),
            ],
        );
        match res {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                Err(StoreError::DuplicateIdentifier(unit.identifier.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn mutate_unit(&self, id: UnitId, set_clause: &str, value: &dyn rusqlite::ToSql, at: Timestamp) -> StoreResult<MobileUnit> {
        let sql = format!(
            "UPDATE units SET {set_clause}, updated_at_ms = ?2 WHERE id = ?3 RETURNING {UNIT_COLUMNS}"
        );
        let conn = self.conn.lock();
        let mut stmt = conn.prepare_cached(&sql)?;
        let row = stmt
            .query_row(rusqlite::params![value, at.timestamp_millis(), id.get()], UnitRow::read)
            .optional()?;
        row.ok_or(StoreError::UnitNotFound(id))?.into_unit()
    }
}

impl FacilityStore for SqliteStore {
    fn facility(&self, id: FacilityId) -> StoreResult<Option<Facility>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare_cached(
            "SELECT id, name, address, latitude, longitude FROM facilities WHERE id = ?1",
        )?;
        Ok(stmt.query_row([id.get()], read_facility).optional()?)
    }

    fn facilities(&self) -> StoreResult<Vec<Facility>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare_cached(
            "SELECT id, name, address, latitude, longitude FROM facilities ORDER BY id",
        )?;
        let rows = stmt.query_map([], read_facility)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

impl UnitStore for SqliteStore {
    fn list_available(&self) -> StoreResult<Vec<UnitPosition>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare_cached(
            "SELECT id, identifier, latitude, longitude FROM units \
             WHERE status = 'available' ORDER BY id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(UnitPosition {
                id:         UnitId(row.get(0)?),
                identifier: row.get(1)?,
                position:   GeoPoint::new(row.get(2)?, row.get(3)?),
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn units(&self) -> StoreResult<Vec<MobileUnit>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare_cached(&format!(
            "SELECT {UNIT_COLUMNS} FROM units ORDER BY identifier"
        ))?;
        let rows = stmt.query_map([], UnitRow::read)?;
        rows.map(|r| r.map_err(StoreError::from).and_then(UnitRow::into_unit))
            .collect()
    }

    fn update_position(&self, id: UnitId, position: GeoPoint, at: Timestamp) -> StoreResult<MobileUnit> {
        GeoPoint::try_new(position.lat, position.lon)?;
        // One statement: coordinates and timestamp land together or not at all.
        let conn = self.conn.lock();
        let mut stmt = conn.prepare_cached(&format!(
            "UPDATE units SET latitude = ?1, longitude = ?2, updated_at_ms = ?3 \
             WHERE id = ?4 RETURNING {UNIT_COLUMNS}"
        ))?;
        let row = stmt
            .query_row(
                rusqlite::params![position.lat, position.lon, at.timestamp_millis(), id.get()],
                UnitRow::read,
            )
            .optional()?;
        row.ok_or(StoreError::UnitNotFound(id))?.into_unit()
    }

    fn set_status(&self, id: UnitId, status: UnitStatus, at: Timestamp) -> StoreResult<MobileUnit> {
        self.mutate_unit(id, "status = ?1", &status.as_str(), at)
    }
}

// ── Row decoding ──────────────────────────────────────────────────────────────

fn read_facility(row: &Row<'_>) -> rusqlite::Result<Facility> {
    Ok(Facility {
        id:       FacilityId(row.get(0)?),
        name:     row.get(1)?,
        address:  row.get(2)?,
        position: GeoPoint::new(row.get(3)?, row.get(4)?),
    })
}

/// Raw `units` row; status and timestamp are validated in `into_unit`.
struct UnitRow {
    id:            u32,
    identifier:    String,
    latitude:      f64,
    longitude:     f64,
    status:        String,
    updated_at_ms: i64,
}

impl UnitRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id:            row.get(0)?,
            identifier:    row.get(1)?,
            latitude:      row.get(2)?,
            longitude:     row.get(3)?,
            status:        row.get(4)?,
            updated_at_ms: row.get(5)?,
        })
    }

    fn into_unit(self) -> StoreResult<MobileUnit> {
        let updated_at = DateTime::from_timestamp_millis(self.updated_at_ms).ok_or_else(|| {
            StoreError::InvalidData(format!("updated_at_ms {} out of range", self.updated_at_ms))
        })?;
        Ok(MobileUnit {
            id:         UnitId(self.id),
            identifier: self.identifier,
            position:   GeoPoint::new(self.latitude, self.longitude),
            status:     self.status.parse()?,
            updated_at,
        })
    }
}
