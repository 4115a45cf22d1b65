//! `shop-world` — the static world and external collaborators of the counter
//! simulation.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                       |
//! |---------------|----------------------------------------------------------------|
//! | [`navigator`] | `Navigator` / `NavigatorFactory` traits, shared arrival policy |
//! | [`line`]      | `LineNavigator` — deterministic straight-line reference impl   |
//! | [`station`]   | `Station` (product, anchor, gather duration, price)            |
//! | [`registry`]  | `StationRegistry` — nearest-station-for-product query          |
//! | [`fx`]        | `SceneFx` (cosmetics), `Ledger` (economy), provided impls      |
//! | [`loader`]    | CSV station loader                                             |
//! | [`error`]     | `WorldError`, `WorldResult`                                    |
//!
//! # Design notes
//!
//! Locomotion, facing animation, prop visuals, progress rings, and the money
//! ledger are all *consumed* by the core through the narrow traits in this
//! crate — the state machines never implement any of them.  The provided
//! implementations ([`LineNavigator`], [`NoopFx`], [`CashLedger`]) exist so
//! the simulation is runnable and testable without a game engine attached.

pub mod error;
pub mod fx;
pub mod line;
pub mod loader;
pub mod navigator;
pub mod registry;
pub mod station;


pub use error::{WorldError, WorldResult};
pub use fx::{Actor, CashLedger, Ledger, NoopFx, PropHandle, PropKind, SceneFx};
pub use line::{LineNavFactory, LineNavigator};
pub use loader::{load_stations_csv, load_stations_reader};
pub use navigator::{arrived, Navigator, NavigatorFactory};
pub use registry::StationRegistry;
pub use station::Station;
