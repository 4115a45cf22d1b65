//! `shop-sim` — tick loop orchestrator for the shop counter simulation.
//!
//! # Four-phase tick loop
//!
//! ```text
//! for each tick:
//!   ① Spawn     — poll the spawn timer; bind a new customer to the first
//!                 free slot when the timer fires and capacity allows.
//!   ② Customers — tick every customer in ascending slot order.
//!   ③ Exits     — despawn customers that reached the exit; release slots.
//!   ④ Employee  — tick the single employee (may serve a customer that
//!                 became Waiting in phase ②, same tick).
//! ```
//!
//! Phase order is fixed so that runs with the same seed, layout, and
//! stations are bit-for-bit identical.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use shop_core::{SimConfig, CounterLayout};
//! use shop_sim::{NoopObserver, SimBuilder};
//! use shop_world::load_stations_csv;
//!
//! let mut sim = SimBuilder::new(config, layout)
//!     .stations(load_stations_csv("stations.csv")?)
//!     .build()?;
//! sim.run_ticks(10_000, &mut NoopObserver)?;
//! println!("earned {}", sim.ledger().balance());
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
