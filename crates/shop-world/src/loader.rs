//! CSV station loader.
//!
//! # CSV format
//!
//! One row per station, registered in file order (which is also the
//! tie-break order for nearest-station queries):
//!
//! ```csv
//! product_id,x,z,gather_secs,price
//! 0,2.0,1.5,3.0,10
//! 0,8.0,1.5,3.0,10
//! 1,5.0,1.5,4.5,25
//! ```

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use shop_core::{ProductId, StationId, WorldPoint};

use crate::registry::StationRegistry;
use crate::station::Station;
use crate::WorldError;

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct StationRecord {
    product_id:  u16,
    x:           f32,
    z:           f32,
    gather_secs: f32,
    price:       u32,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`StationRegistry`] from a CSV file.
pub fn load_stations_csv(path: &Path) -> Result<StationRegistry, WorldError> {
    let file = std::fs::File::open(path).map_err(WorldError::Io)?;
    load_stations_reader(file)
}

/// Like [`load_stations_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or loading from embedded
/// assets.
pub fn load_stations_reader<R: Read>(reader: R) -> Result<StationRegistry, WorldError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut registry = StationRegistry::new();

    for result in csv_reader.deserialize::<StationRecord>() {
        let row = result.map_err(|e| WorldError::Parse(e.to_string()))?;
        if !row.gather_secs.is_finite() || row.gather_secs < 0.0 {
            return Err(WorldError::Parse(format!(
                "invalid gather_secs {}: expected a non-negative number",
                row.gather_secs
            )));
        }
        registry.register(Station {
            id:          StationId::INVALID, // assigned by register()
            product:     ProductId(row.product_id),
            anchor:      WorldPoint::new(row.x, row.z),
            gather_secs: row.gather_secs,
            price:       row.price,
        });
    }

    Ok(registry)
}
