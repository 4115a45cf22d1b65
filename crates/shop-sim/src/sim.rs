//! The `Sim` struct and its tick loop.

use shop_agents::{Customer, CustomerEvent, CustomerPool, Employee, EmployeeCtx};
use shop_core::{CustomerId, SimClock, SimConfig, SimRng, SlotIndex};
use shop_dispatch::{DispatchError, Dispatcher};
use shop_world::{Ledger, NavigatorFactory, SceneFx, StationRegistry};

use crate::{SimObserver, SimResult};

/// The main simulation runner.
///
/// `Sim<F, X, L>` holds all simulation state and drives the four-phase tick
/// loop:
///
/// 1. **Spawn**: poll the dispatcher's spawn timer; when it fires and a slot
///    is free (and occupancy is below the cap), create a customer at the
///    spawn point and bind it to the first free slot.
/// 2. **Customers**: tick every present customer in ascending slot order.
/// 3. **Exits**: customers that reached the exit this tick are despawned and
///    their slots released.
/// 4. **Employee**: tick the single employee.  A customer that became
///    `Waiting` in phase 2 is already eligible for service here, in the same
///    tick.
///
/// The employee runs after the exit drain so it never targets a customer
/// that despawned earlier in the same tick.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<F: NavigatorFactory, X: SceneFx, L: Ledger> {
    /// Global configuration (seed, spawn interval, tuning, …).
    pub config: SimConfig,

    /// Simulation clock — tracks the current tick and accumulated seconds.
    pub clock: SimClock,

    pub(crate) dispatcher:  Dispatcher,
    pub(crate) customers:   CustomerPool<F::Nav>,
    pub(crate) employee:    Employee<F::Nav>,
    pub(crate) registry:    StationRegistry,
    pub(crate) nav_factory: F,
    pub(crate) fx:          X,
    pub(crate) ledger:      L,
    pub(crate) rng:         SimRng,
}

impl<F: NavigatorFactory, X: SceneFx, L: Ledger> Sim<F, X, L> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run exactly `n` ticks of `config.tick_duration_secs` each, then call
    /// [`SimObserver::on_sim_end`].
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        let dt = self.config.tick_duration_secs;
        for _ in 0..n {
            self.step(dt, observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Advance the simulation by one tick of `dt` simulated seconds.
    ///
    /// Callers integrating with an external frame loop may pass a variable
    /// `dt`; [`run_ticks`][Self::run_ticks] always uses the configured fixed
    /// tick duration.
    pub fn step<O: SimObserver>(&mut self, dt: f32, observer: &mut O) -> SimResult<()> {
        let now = self.clock.now_secs;
        let tick = self.clock.current_tick;
        observer.on_tick_start(tick);

        // ── Phase 1: spawn ────────────────────────────────────────────────
        if let Some(slot) = self.dispatcher.poll_spawn(now) {
            let customer = self.spawn_customer(slot, now)?;
            observer.on_customer_spawned(tick, customer, slot);
        }

        // ── Phase 2: customer ticks, ascending slot order ─────────────────
        //
        // Slot order (not insertion order) keeps runs with identical seeds
        // identical: hash-map iteration order never leaks into behavior.
        let mut exited = Vec::new();
        for i in 0..self.dispatcher.slot_count() {
            let Some(id) = self.dispatcher.occupant(SlotIndex(i as u16)) else {
                continue;
            };
            let Some(customer) = self.customers.get_mut(id) else {
                continue;
            };
            if let Some(CustomerEvent::Exited) =
                customer.tick(now, dt, &self.config.tuning, &mut self.fx)
            {
                exited.push(id);
            }
        }

        // ── Phase 3: exit drain ───────────────────────────────────────────
        for id in exited {
            self.dispatcher.release(id);
            self.customers.remove(id);
            observer.on_customer_exited(tick, id);
        }

        // ── Phase 4: employee ─────────────────────────────────────────────
        let mut ctx = EmployeeCtx {
            now,
            dt,
            tuning:     &self.config.tuning,
            unlocked:   &self.config.unlocked_products,
            dispatcher: &self.dispatcher,
            customers:  &mut self.customers,
            registry:   &self.registry,
            fx:         &mut self.fx,
            ledger:     &mut self.ledger,
            rng:        &mut self.rng,
        };
        if let Some(delivery) = self.employee.tick(&mut ctx) {
            log::debug!(
                "delivered {} to {} for {}",
                delivery.product,
                delivery.customer,
                delivery.price
            );
            observer.on_delivery(tick, &delivery);
        }

        observer.on_tick_end(tick);
        self.clock.advance(dt);
        Ok(())
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    #[inline]
    pub fn customers(&self) -> &CustomerPool<F::Nav> {
        &self.customers
    }

    #[inline]
    pub fn employee(&self) -> &Employee<F::Nav> {
        &self.employee
    }

    #[inline]
    pub fn registry(&self) -> &StationRegistry {
        &self.registry
    }

    #[inline]
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    #[inline]
    pub fn scene_fx(&self) -> &X {
        &self.fx
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Create a customer at the spawn point, bind it to `slot`, and start it
    /// walking to its queue anchor.
    fn spawn_customer(&mut self, slot: SlotIndex, now: f64) -> SimResult<CustomerId> {
        let queue = self
            .dispatcher
            .queue_anchor(slot)
            .ok_or(DispatchError::SlotOutOfRange(slot))?;
        let interact = self
            .dispatcher
            .interact_anchor(slot)
            .ok_or(DispatchError::SlotOutOfRange(slot))?;

        let id = self.dispatcher.allocate_customer_id();
        self.dispatcher.bind(id, slot)?;

        let nav = self.nav_factory.spawn(self.dispatcher.spawn_point());
        let mut customer = Customer::new(id, slot, nav);
        customer.assign_slot(
            queue,
            interact,
            self.dispatcher.exit_point(),
            true,
            now,
            &self.config.tuning,
            &mut self.fx,
        );

        log::debug!("spawned {id} into {slot}");
        self.customers.insert(customer);
        Ok(id)
    }
}
