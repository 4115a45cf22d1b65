//! `shop-core` — foundational types for the shop counter simulation.
//!
//! This crate is a dependency of every other `shop-*` crate.  It intentionally
//! has no `shop-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`ids`]    | `CustomerId`, `SlotIndex`, `StationId`, `ProductId`        |
//! | [`vec`]    | `WorldPoint`, planar Euclidean distance                    |
//! | [`time`]   | `Tick`, `SimClock`                                         |
//! | [`config`] | `SimConfig`, `Tuning`, `CounterLayout`                     |
//! | [`rng`]    | `SimRng` (deterministic, seeded)                           |
//! | [`error`]  | `ShopError`, `ShopResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                               |
//! |---------|------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.  |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;
pub mod vec;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{CounterLayout, SimConfig, Tuning};
pub use error::{ShopError, ShopResult};
pub use ids::{CustomerId, ProductId, SlotIndex, StationId};
pub use rng::SimRng;
pub use time::{SimClock, Tick};
pub use vec::WorldPoint;
