//! The employee service cycle.
//!
//! A single agent loops: pick the front-most waiting customer → walk to its
//! interact anchor → reveal its request → walk to the matching station →
//! gather for the station's duration → walk back → deliver → pick the next
//! customer or return home.  There is no terminal state.
//!
//! Exclusivity of the target follows from the dispatcher offering only
//! `Waiting` customers: a targeted customer stays `Waiting` until it is told
//! to leave at delivery, and this employee never queries for a new target
//! mid-cycle.

use rustc_hash::FxHashSet;

use shop_core::{CustomerId, ProductId, SimRng, StationId, Tuning, WorldPoint};
use shop_dispatch::Dispatcher;
use shop_world::{
    arrived, Actor, Ledger, Navigator, PropHandle, PropKind, SceneFx, StationRegistry,
};

use crate::pool::CustomerPool;

// ── State ─────────────────────────────────────────────────────────────────────

/// Employee lifecycle state with per-state payload.
///
/// The payload makes illegal combinations unrepresentable: gather progress
/// exists only while `Gathering`, and a carried item only on the return leg.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EmployeeState {
    /// At (or walking toward) the home anchor, polling for work.
    IdleAtHome,
    /// Walking to the target customer's interact anchor.
    GoToInteract { customer: CustomerId },
    /// Revealing the customer's request and choosing a station; resolves
    /// within the same tick.
    ActivateRequest { customer: CustomerId },
    /// Walking to the matched station.
    GoToStation { customer: CustomerId, station: StationId },
    /// Gathering at the station; `progress` accumulates elapsed seconds.
    Gathering {
        customer: CustomerId,
        station:  StationId,
        progress: f32,
    },
    /// Walking back to the customer with the gathered item.
    ReturnToCustomer {
        customer: CustomerId,
        station:  StationId,
        carried:  Option<PropHandle>,
    },
    /// Handing over, crediting the ledger, and deciding what to do next.
    Deliver {
        customer: CustomerId,
        station:  StationId,
        carried:  Option<PropHandle>,
    },
}

/// A completed delivery, reported to the caller for observation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Delivery {
    pub customer: CustomerId,
    pub station:  StationId,
    pub product:  ProductId,
    pub price:    u32,
}

// ── Context ───────────────────────────────────────────────────────────────────

/// Everything the employee reads or drives during one tick, assembled by the
/// sim from its own disjoint fields.
pub struct EmployeeCtx<'a, N: Navigator, X: SceneFx, L: Ledger> {
    pub now:    f64,
    pub dt:     f32,
    pub tuning: &'a Tuning,

    /// Products a request may be drawn from.
    pub unlocked: &'a [ProductId],

    pub dispatcher: &'a Dispatcher,
    pub customers:  &'a mut CustomerPool<N>,
    pub registry:   &'a StationRegistry,
    pub fx:         &'a mut X,
    pub ledger:     &'a mut L,
    pub rng:        &'a mut SimRng,
}

// ── Employee ──────────────────────────────────────────────────────────────────

/// The single service agent.  Created once at setup; never destroyed.
pub struct Employee<N: Navigator> {
    state: EmployeeState,
    nav:   N,
    home:  WorldPoint,

    /// Products already reported as having no station, so the condition is
    /// logged once rather than every cycle.
    warned_products: FxHashSet<ProductId>,
}

impl<N: Navigator> Employee<N> {
    pub fn new(nav: N, home: WorldPoint) -> Self {
        Self {
            state: EmployeeState::IdleAtHome,
            nav,
            home,
            warned_products: FxHashSet::default(),
        }
    }

    #[inline]
    pub fn state(&self) -> EmployeeState {
        self.state
    }

    /// The exclusively-owned target, if the employee is mid-cycle.
    pub fn target_customer(&self) -> Option<CustomerId> {
        match self.state {
            EmployeeState::IdleAtHome => None,
            EmployeeState::GoToInteract { customer }
            | EmployeeState::ActivateRequest { customer }
            | EmployeeState::GoToStation { customer, .. }
            | EmployeeState::Gathering { customer, .. }
            | EmployeeState::ReturnToCustomer { customer, .. }
            | EmployeeState::Deliver { customer, .. } => Some(customer),
        }
    }

    #[inline]
    pub fn position(&self) -> WorldPoint {
        self.nav.position()
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance one tick.  Returns the delivery completed this tick, if any.
    pub fn tick<X: SceneFx, L: Ledger>(
        &mut self,
        ctx: &mut EmployeeCtx<'_, N, X, L>,
    ) -> Option<Delivery> {
        self.nav.advance(ctx.dt);

        match self.state {
            EmployeeState::IdleAtHome => {
                match ctx.dispatcher.next_waiting(None, |c| ctx.customers.is_waiting(c)) {
                    Some(customer) => self.begin_interact(customer, ctx),
                    None => self.keep_at_home(ctx.tuning.near_home_distance),
                }
                None
            }

            EmployeeState::GoToInteract { customer } => {
                let Some(target) = ctx.dispatcher.slot_of(customer)
                    .and_then(|s| ctx.dispatcher.interact_anchor(s))
                else {
                    // Target vanished underneath us; nothing to serve.
                    self.go_idle(ctx);
                    return None;
                };

                if arrived(&self.nav, target, ctx.tuning.arrive_threshold) {
                    self.nav.stop();
                    self.face_customer(customer, ctx, true);
                    self.state = EmployeeState::ActivateRequest { customer };
                }
                None
            }

            EmployeeState::ActivateRequest { customer } => {
                self.face_customer(customer, ctx, false);
                self.activate_and_decide(customer, ctx);
                None
            }

            EmployeeState::GoToStation { customer, station } => {
                let Some(anchor) = ctx.registry.get(station).map(|s| s.anchor) else {
                    self.go_idle(ctx);
                    return None;
                };

                // Far out: turn with the travel direction.  Close to the
                // counter: face it.
                if self.nav.position().distance(anchor) <= ctx.tuning.face_station_distance {
                    ctx.fx.look_at(Actor::Employee, anchor, false);
                } else {
                    ctx.fx.clear_look(Actor::Employee);
                }

                if arrived(&self.nav, anchor, ctx.tuning.arrive_threshold) {
                    self.nav.stop();
                    ctx.fx.look_at(Actor::Employee, anchor, true);
                    ctx.fx.show_progress(station, 0.0);
                    self.state = EmployeeState::Gathering { customer, station, progress: 0.0 };
                }
                None
            }

            EmployeeState::Gathering { customer, station, progress } => {
                self.tick_gather(customer, station, progress, ctx);
                None
            }

            EmployeeState::ReturnToCustomer { customer, station, carried } => {
                let Some(target) = ctx.dispatcher.slot_of(customer)
                    .and_then(|s| ctx.dispatcher.interact_anchor(s))
                else {
                    if let Some(handle) = carried {
                        ctx.fx.despawn_prop(handle);
                    }
                    self.go_idle(ctx);
                    return None;
                };

                if arrived(&self.nav, target, ctx.tuning.arrive_threshold) {
                    self.nav.stop();
                    self.face_customer(customer, ctx, true);
                    self.state = EmployeeState::Deliver { customer, station, carried };
                }
                None
            }

            EmployeeState::Deliver { customer, station, carried } => {
                self.face_customer(customer, ctx, false);
                Some(self.deliver(customer, station, carried, ctx))
            }
        }
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Bind `customer` as the target and head for its interact anchor.
    fn begin_interact<X: SceneFx, L: Ledger>(
        &mut self,
        customer: CustomerId,
        ctx:      &mut EmployeeCtx<'_, N, X, L>,
    ) {
        let Some(target) = ctx.dispatcher.slot_of(customer)
            .and_then(|s| ctx.dispatcher.interact_anchor(s))
        else {
            self.go_idle(ctx);
            return;
        };

        ctx.fx.clear_look(Actor::Employee);
        self.nav.set_destination(target);
        self.state = EmployeeState::GoToInteract { customer };
    }

    /// Reveal the customer's request and pick the station to serve it from.
    ///
    /// No matching station is a configuration condition, not a fatal error:
    /// warn once per product and fall back to idle.
    fn activate_and_decide<X: SceneFx, L: Ledger>(
        &mut self,
        customer: CustomerId,
        ctx:      &mut EmployeeCtx<'_, N, X, L>,
    ) {
        let Some(product) = ctx.rng.choose(ctx.unlocked).copied() else {
            self.go_idle(ctx);
            return;
        };

        match ctx.customers.get_mut(customer) {
            Some(c) => c.show_request(product, ctx.fx),
            None => {
                self.go_idle(ctx);
                return;
            }
        }

        match ctx.registry.find_station(product, self.nav.position()) {
            Some(station) => {
                let (id, anchor) = (station.id, station.anchor);
                ctx.fx.clear_look(Actor::Employee);
                self.nav.set_destination(anchor);
                self.state = EmployeeState::GoToStation { customer, station: id };
            }
            None => {
                if self.warned_products.insert(product) {
                    log::warn!("no station provides {product}; employee returning home");
                }
                self.go_idle(ctx);
            }
        }
    }

    /// Accumulate gather progress and hand off to the return leg when done.
    ///
    /// The threshold check is `>=`, so a duration reached exactly this tick
    /// transitions now — once — rather than waiting another tick.
    fn tick_gather<X: SceneFx, L: Ledger>(
        &mut self,
        customer: CustomerId,
        station:  StationId,
        progress: f32,
        ctx:      &mut EmployeeCtx<'_, N, X, L>,
    ) {
        let Some(st) = ctx.registry.get(station) else {
            self.go_idle(ctx);
            return;
        };
        let (anchor, duration, product) = (st.anchor, st.gather_duration(), st.product);

        ctx.fx.look_at(Actor::Employee, anchor, false);

        let progress = progress + ctx.dt;
        ctx.fx.show_progress(station, (progress / duration).clamp(0.0, 1.0));

        if progress < duration {
            self.state = EmployeeState::Gathering { customer, station, progress };
            return;
        }

        ctx.fx.hide_progress(station);
        let carried = ctx.fx.spawn_prop(PropKind::CarriedItem(product));

        match ctx.dispatcher.slot_of(customer)
            .and_then(|s| ctx.dispatcher.interact_anchor(s))
        {
            Some(target) => {
                ctx.fx.clear_look(Actor::Employee);
                self.nav.set_destination(target);
                self.state = EmployeeState::ReturnToCustomer { customer, station, carried };
            }
            None => {
                if let Some(handle) = carried {
                    ctx.fx.despawn_prop(handle);
                }
                self.go_idle(ctx);
            }
        }
    }

    /// Hand the item over, credit the ledger, send the customer off, and
    /// either rebind to the next waiting customer or go home.
    fn deliver<X: SceneFx, L: Ledger>(
        &mut self,
        customer: CustomerId,
        station:  StationId,
        carried:  Option<PropHandle>,
        ctx:      &mut EmployeeCtx<'_, N, X, L>,
    ) -> Delivery {
        if let Some(handle) = carried {
            ctx.fx.despawn_prop(handle);
        }

        let mut product = ProductId::INVALID;
        if let Some(c) = ctx.customers.get_mut(customer) {
            product = c.requested_product().unwrap_or(ProductId::INVALID);
            c.hide_request(ctx.fx);
            c.leave(ctx.now, ctx.tuning, ctx.fx);
        }

        let price = ctx.registry.get(station).map(|s| s.price).unwrap_or(0);
        ctx.ledger.credit(price);

        ctx.fx.clear_look(Actor::Employee);

        // The just-served customer is excluded; it is `Leaving` anyway, but
        // the exclusion holds even on the tick its state has not advanced.
        match ctx.dispatcher.next_waiting(Some(customer), |c| ctx.customers.is_waiting(c)) {
            Some(next) => self.begin_interact(next, ctx),
            None => self.go_idle(ctx),
        }

        Delivery { customer, station, product, price }
    }

    /// Clear the cycle and head home.
    fn go_idle<X: SceneFx, L: Ledger>(&mut self, ctx: &mut EmployeeCtx<'_, N, X, L>) {
        ctx.fx.clear_look(Actor::Employee);
        self.state = EmployeeState::IdleAtHome;
        self.nav.set_destination(self.home);
    }

    /// Drift back toward the home anchor while idle.
    fn keep_at_home(&mut self, near_home_distance: f32) {
        if self.nav.position().distance(self.home) <= near_home_distance {
            return;
        }
        if !self.nav.has_path() && !self.nav.has_pending_path() {
            self.nav.set_destination(self.home);
        }
    }

    fn face_customer<X: SceneFx, L: Ledger>(
        &mut self,
        customer: CustomerId,
        ctx:      &mut EmployeeCtx<'_, N, X, L>,
        snap:     bool,
    ) {
        if let Some(c) = ctx.customers.get(customer) {
            ctx.fx.look_at(Actor::Employee, c.position(), snap);
        }
    }
}
