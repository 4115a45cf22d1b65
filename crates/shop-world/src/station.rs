//! Service stations.

use shop_core::{ProductId, StationId, WorldPoint};

/// Gather durations below this are clamped up so progress always spans at
/// least one visible frame.
const MIN_GATHER_SECS: f32 = 0.1;

/// A fixed service station providing one product.
///
/// Stations are registered once at startup and never added or removed at
/// runtime.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Station {
    /// Identity — equals the station's registration index.
    pub id: StationId,

    /// The product this station provides.
    pub product: ProductId,

    /// Where the employee stands to gather.
    pub anchor: WorldPoint,

    /// Seconds of gathering before the product is ready.
    pub gather_secs: f32,

    /// Amount credited to the ledger per delivery.
    pub price: u32,
}

impl Station {
    /// Effective gather duration, floored at [`MIN_GATHER_SECS`].
    #[inline]
    pub fn gather_duration(&self) -> f32 {
        self.gather_secs.max(MIN_GATHER_SECS)
    }
}
