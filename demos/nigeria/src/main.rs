//! nigeria — nearest-ambulance demo for the response-dispatch core.
//!
//! Seeds ten hospitals and five ambulances, answers "nearest available
//! ambulance" for every hospital, moves one ambulance and takes another out
//! of service, then answers again.  The second pass recomputes because each
//! mutation clears the proximity cache.
//!
//! ```text
//! cargo run -p nigeria                  # in-memory store
//! cargo run -p nigeria -- dispatch.db   # SQLite file, seeded on first run
//! RUST_LOG=debug cargo run -p nigeria   # show cache hits and misses
//! ```

mod seed;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use rd_core::{FacilityId, UnitId, UnitStatus};
use rd_service::{DispatchBuilder, PositionPayload, ProximityService, ServiceConfig};
use rd_spatial::{RTreeIndex, SpatialIndex};
use rd_store::{FacilityStore, UnitStore};

// ── Logging ───────────────────────────────────────────────────────────────────

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(filter)
        .init();
}

// ── Output ────────────────────────────────────────────────────────────────────

fn print_table<I: SpatialIndex>(
    title:     &str,
    proximity: &ProximityService<I>,
    names:     &HashMap<FacilityId, String>,
) -> Result<()> {
    println!();
    println!("{title}");
    println!("{:<32} {:<8} {:>10}", "hospital", "unit", "km");
    for r in proximity.nearest_units_for_all()? {
        let name = names.get(&r.facility_id).map(String::as_str).unwrap_or("?");
        println!(
            "{:<32} {:<8} {:>10.1}",
            name,
            r.nearest_unit.identifier,
            r.nearest_unit.distance_meters as f64 / 1_000.0
        );
    }
    Ok(())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_logging();

    let config = ServiceConfig::from_env()?;
    let db_path = std::env::args().nth(1).map(PathBuf::from);

    let (facilities, units): (Arc<dyn FacilityStore>, Arc<dyn UnitStore>) = match &db_path {
        Some(path) => {
            let store = Arc::new(seed::sqlite_store(path)?);
            (store.clone(), store)
        }
        None => {
            let store = Arc::new(seed::memory_store()?);
            (store.clone(), store)
        }
    };

    let names: HashMap<FacilityId, String> =
        facilities.facilities()?.into_iter().map(|f| (f.id, f.name)).collect();
    info!(
        hospitals = names.len(),
        ambulances = units.units()?.len(),
        ttl_secs = config.cache_ttl.as_secs(),
        backend = if db_path.is_some() { "sqlite" } else { "memory" },
        "starting"
    );

    let dispatch = DispatchBuilder::new(facilities, units)
        .index(RTreeIndex)
        .config(config)
        .build();

    println!("=== nigeria — nearest ambulance per hospital ===");
    print_table("Initial positions", &dispatch.proximity, &names)?;

    // Served from cache: same computedAt as the first pass.
    let abuja = dispatch.proximity.nearest_unit_for(FacilityId(2))?;
    println!();
    println!("Abuja, cached: {}", serde_json::to_string_pretty(&abuja)?);

    // AMB-002 drives north to Kaduna; coordinates arrive as a request body.
    let body = r#"{"latitude": "10.5200", "longitude": 7.4400}"#;
    let payload: PositionPayload = serde_json::from_str(body)?;
    let moved = dispatch.positions.apply_payload(UnitId(2), &payload)?;
    println!();
    println!("{} moved to {}", moved.identifier, moved.position);

    // Rejected before the store is touched.
    if let Err(e) = dispatch.positions.apply_payload(UnitId(3), &PositionPayload::new(200.0, 8.5)) {
        warn!(error = %e, "position update rejected");
    }

    let parked = dispatch.positions.set_status(UnitId(5), UnitStatus::Unavailable)?;
    println!("{} is now {}", parked.identifier, parked.status);

    print_table("After updates", &dispatch.proximity, &names)?;

    match dispatch.proximity.nearest_unit_for(FacilityId(99)) {
        Ok(r)  => println!("unexpected answer for hospital 99: {r:?}"),
        Err(e) => println!("\nHospital 99: {e} (not found: {})", e.is_not_found()),
    }

    let stats = dispatch.proximity.cache_stats();
    println!();
    println!(
        "Cache: {} hits, {} misses, {} writes, {} invalidations (hit rate {:.0}%)",
        stats.hits,
        stats.misses,
        stats.writes,
        stats.invalidations,
        stats.hit_rate() * 100.0
    );

    Ok(())
}
