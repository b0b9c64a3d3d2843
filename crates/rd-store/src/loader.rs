//! CSV seed loader.
//!
//! # CSV formats
//!
//! ```csv
//! id,name,address,latitude,longitude
//! 2,Abuja National Medical Center,"Garki, Abuja",9.0765,7.3986
//! ```
//!
//! ```csv
//! id,identifier,latitude,longitude,status
//! 2,AMB-002,9.0579,7.4951,available
//! ```
//!
//! `status` may be left empty, in which case the unit is `available`.  Every
//! coordinate is range-checked; the first bad row aborts the load.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use rd_core::{Facility, FacilityId, GeoPoint, MobileUnit, Timestamp, UnitId, UnitStatus};

use crate::{StoreError, StoreResult};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct FacilityRecord {
    id:        u32,
    name:      String,
    #[serde(default)]
    address:   String,
    latitude:  f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct UnitRecord {
    id:         u32,
    identifier: String,
    latitude:   f64,
    longitude:  f64,
    #[serde(default)]
    status:     String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load facilities from a CSV file.
pub fn load_facilities_csv(path: &Path) -> StoreResult<Vec<Facility>> {
    load_facilities_reader(std::fs::File::open(path)?)
}

/// Like [`load_facilities_csv`] but accepts any `Read` source.
pub fn load_facilities_reader<R: Read>(reader: R) -> StoreResult<Vec<Facility>> {
    let mut rdr = csv::Reader::from_reader(reader);
    rdr.deserialize::<FacilityRecord>()
        .map(|row| -> StoreResult<Facility> {
            let r = row?;
            Ok(Facility {
                id:       FacilityId(r.id),
                name:     r.name,
                address:  r.address,
                position: checked_point(r.latitude, r.longitude, "facility", r.id)?,
            })
        })
        .collect()
}

/// Load units from a CSV file, stamping each with `loaded_at`.
pub fn load_units_csv(path: &Path, loaded_at: Timestamp) -> StoreResult<Vec<MobileUnit>> {
    load_units_reader(std::fs::File::open(path)?, loaded_at)
}

/// Like [`load_units_csv`] but accepts any `Read` source.
pub fn load_units_reader<R: Read>(reader: R, loaded_at: Timestamp) -> StoreResult<Vec<MobileUnit>> {
    let mut rdr = csv::Reader::from_reader(reader);
    rdr.deserialize::<UnitRecord>()
        .map(|row| -> StoreResult<MobileUnit> {
            let r = row?;
            let status = match r.status.trim() {
                "" => UnitStatus::Available,
                s  => s.parse()?,
            };
            Ok(MobileUnit {
                id:         UnitId(r.id),
                position:   checked_point(r.latitude, r.longitude, "unit", r.id)?,
                identifier: r.identifier,
                status,
                updated_at: loaded_at,
            })
        })
        .collect()
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn checked_point(lat: f64, lon: f64, what: &str, id: u32) -> StoreResult<GeoPoint> {
    GeoPoint::try_new(lat, lon)
        .map_err(|e| StoreError::InvalidData(format!("{what} {id}: {e}")))
}
