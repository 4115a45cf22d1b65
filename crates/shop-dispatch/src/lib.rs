//! `shop-dispatch` — slot allocation, spawn timing, and service ordering.
//!
//! # Crate layout
//!
//! | Module         | Contents                                            |
//! |----------------|-----------------------------------------------------|
//! | [`slot`]       | `QueueSlot` — anchors + occupant                    |
//! | [`dispatcher`] | `Dispatcher` — spawn timer, bind/release, scan      |
//! | [`error`]      | `DispatchError`, `DispatchResult`                   |
//!
//! # Design notes
//!
//! The dispatcher owns the *only* mutable view of slot occupancy.  Agents
//! read slots through accessor calls and never write them; all mutation
//! happens through `bind` and `release` on the single simulation thread.
//!
//! The dispatcher deliberately knows nothing about customer state.  The
//! service-order scan takes an `is_waiting` predicate from the caller, which
//! keeps this crate below the agents crate in the dependency DAG.

pub mod dispatcher;
pub mod error;
pub mod slot;


pub use dispatcher::Dispatcher;
pub use error::{DispatchError, DispatchResult};
pub use slot::QueueSlot;
