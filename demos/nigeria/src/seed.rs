//! Seed data: ten hospitals and five ambulances across Nigeria.
//!
//! Each ambulance starts a short drive from one of the first five hospitals.

use std::io::Cursor;
use std::path::Path;

use anyhow::Result;
use chrono::Utc;

use rd_core::{Facility, MobileUnit};
use rd_store::{MemoryStore, SqliteStore, UnitStore, load_facilities_reader, load_units_reader};

const HOSPITALS_CSV: &str = "\
id,name,address,latitude,longitude\n\
1,Lagos General Hospital,\"Ikeja, Lagos\",6.5244,3.3792\n\
2,Abuja National Medical Center,\"Garki, Abuja\",9.0765,7.3986\n\
3,Kano State Hospital,\"Nassarawa, Kano\",12.0022,8.5167\n\
4,Port Harcourt Medical,\"Rumuola, Port Harcourt\",4.8156,7.0498\n\
5,Ibadan Health Center,\"Bodija, Ibadan\",7.3775,3.9470\n\
6,Kaduna Central Hospital,Kaduna North,10.5264,7.4381\n\
7,Benin City Medical,\"GRA, Benin City\",6.3350,5.6037\n\
8,Enugu Teaching Hospital,\"Independence Layout, Enugu\",6.4474,7.5139\n\
9,Jos Plateau Medical,\"Rayfield, Jos\",9.8965,8.8583\n\
10,Aba General Hospital,\"Aba South, Abia\",5.1066,7.3667\n\
";

const AMBULANCES_CSV: &str = "\
id,identifier,latitude,longitude,status\n\
1,AMB-001,6.4550,3.3941,available\n\
2,AMB-002,9.0579,7.4951,available\n\
3,AMB-003,11.9964,8.5267,available\n\
4,AMB-004,4.8417,7.0025,available\n\
5,AMB-005,7.4014,3.9193,available\n\
";

fn parse() -> Result<(Vec<Facility>, Vec<MobileUnit>)> {
    let hospitals  = load_facilities_reader(Cursor::new(HOSPITALS_CSV))?;
    let ambulances = load_units_reader(Cursor::new(AMBULANCES_CSV), Utc::now())?;
    Ok((hospitals, ambulances))
}

pub fn memory_store() -> Result<MemoryStore> {
    let store = MemoryStore::new();
    let (hospitals, ambulances) = parse()?;
    for h in hospitals {
        store.insert_facility(h)?;
    }
    for a in ambulances {
        store.insert_unit(a)?;
    }
    Ok(store)
}

/// Open `path`, seeding it only if it holds no units yet.  Positions moved
/// by an earlier run are kept.
pub fn sqlite_store(path: &Path) -> Result<SqliteStore> {
    let store = SqliteStore::open(path)?;
    store.init_schema()?;
    if store.units()?.is_empty() {
        let (hospitals, ambulances) = parse()?;
        for h in &hospitals {
            store.insert_facility(h)?;
        }
        for a in &ambulances {
            store.insert_unit(a)?;
        }
        tracing::info!(path = %path.display(), hospitals = hospitals.len(), ambulances = ambulances.len(), "seeded database");
    }
    Ok(store)
}
