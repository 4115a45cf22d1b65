//! Station registry and nearest-station query.

use shop_core::{ProductId, StationId, WorldPoint};

use crate::station::Station;

/// Holds every registered [`Station`] in a stable order.
///
/// Registration order is the tie-break order for [`find_station`]: of two
/// matching stations at equal distance, the first-registered one wins.  The
/// registry is append-only and queries never mutate it.
///
/// [`find_station`]: StationRegistry::find_station
#[derive(Debug, Default)]
pub struct StationRegistry {
    stations: Vec<Station>,
}

impl StationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `station` and return its assigned [`StationId`].
    ///
    /// The id recorded on the station is overwritten with its registration
    /// index so ids and scan order always agree.
    pub fn register(&mut self, mut station: Station) -> StationId {
        let id = StationId(self.stations.len() as u16);
        station.id = id;
        self.stations.push(station);
        id
    }

    /// The nearest station providing `product`, measured from `from`.
    ///
    /// Scans all stations in registration order; a later station replaces an
    /// earlier candidate only when strictly closer, so ties resolve to the
    /// first-registered match.  Returns `None` when no station provides the
    /// product — the caller treats that as "cannot proceed", not an error.
    pub fn find_station(&self, product: ProductId, from: WorldPoint) -> Option<&Station> {
        let mut best: Option<&Station> = None;
        let mut best_dist = f32::MAX;

        for s in &self.stations {
            if s.product != product {
                continue;
            }
            let d = from.distance(s.anchor);
            if d < best_dist {
                best_dist = d;
                best = Some(s);
            }
        }

        best
    }

    /// Look a station up by id.
    #[inline]
    pub fn get(&self, id: StationId) -> Option<&Station> {
        self.stations.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter()
    }
}
