//! Simulation observer trait for progress reporting and data collection.

use shop_agents::Delivery;
use shop_core::{CustomerId, SlotIndex, Tick};

/// Callbacks invoked by the tick loop at key points.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — delivery printer
///
/// ```rust,ignore
/// struct DeliveryPrinter;
///
/// impl SimObserver for DeliveryPrinter {
///     fn on_delivery(&mut self, tick: Tick, delivery: &Delivery) {
///         println!("{tick}: served {} for {}", delivery.customer, delivery.price);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick, after all four phases ran.
    fn on_tick_end(&mut self, _tick: Tick) {}

    /// A customer was created and bound to `slot` this tick.
    fn on_customer_spawned(&mut self, _tick: Tick, _customer: CustomerId, _slot: SlotIndex) {}

    /// A customer reached the exit; its slot has already been released and
    /// the customer despawned.
    fn on_customer_exited(&mut self, _tick: Tick, _customer: CustomerId) {}

    /// The employee completed a delivery this tick.  The ledger has already
    /// been credited.
    fn on_delivery(&mut self, _tick: Tick, _delivery: &Delivery) {}

    /// Called once after the final tick of a `run_ticks` call.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to step the sim
/// but don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
