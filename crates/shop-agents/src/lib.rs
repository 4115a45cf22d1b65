//! `shop-agents` — the customer and employee state machines.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`customer`] | `Customer<N>` — MoveToQueue → Waiting → Leaving           |
//! | [`employee`] | `Employee<N>` — the 7-state service cycle                 |
//! | [`pool`]     | `CustomerPool<N>` — id-keyed customer storage             |
//!
//! # Design notes
//!
//! Each agent's state is a tagged union carrying exactly the payload that
//! state needs (`Gathering` carries its progress and station, the return leg
//! carries the prop handle), so illegal combinations — a carried item with
//! no station, gather progress while idle — are unrepresentable.
//!
//! Every transition is a total function of the current state plus tick
//! inputs.  Transient navigation states (path pending, no path right after a
//! warp) are never errors: the agent simply stays in its current state and
//! re-evaluates next tick.  Missing configuration degrades to a safe state
//! instead of failing: a customer with unset anchors no-ops, and an employee
//! that finds no station for a product logs a once-per-product `warn!` and
//! returns home.

pub mod customer;
pub mod employee;
pub mod pool;

#[cfg(test)]
mod tests;

pub use customer::{Customer, CustomerEvent, CustomerState};
pub use employee::{Delivery, Employee, EmployeeCtx, EmployeeState};
pub use pool::CustomerPool;
