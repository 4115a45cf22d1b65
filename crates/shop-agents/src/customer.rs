//! The customer lifecycle: travel to an assigned queue slot, wait with a
//! visible request, travel to the exit.

use shop_core::{CustomerId, ProductId, SlotIndex, Tuning, WorldPoint};
use shop_world::{arrived, Actor, Navigator, PropHandle, PropKind, SceneFx};

// ── State ─────────────────────────────────────────────────────────────────────

/// Customer lifecycle state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CustomerState {
    /// Walking toward the bound slot anchor.
    MoveToQueue,
    /// Standing on the slot anchor, eligible for service.
    Waiting,
    /// Walking toward the exit anchor; terminal.
    Leaving,
}

/// Emitted by [`Customer::tick`] instead of a callback, so the dispatcher
/// can release the slot outside the customer's own update.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CustomerEvent {
    /// The customer reached the exit anchor and can be despawned.
    Exited,
}

/// The active request, present exactly while it is visible.
#[derive(Copy, Clone, Debug)]
struct Request {
    product: ProductId,
    bubble:  Option<PropHandle>,
}

// ── Customer ──────────────────────────────────────────────────────────────────

/// One customer and its navigator.
///
/// Anchors are optional until [`assign_slot`][Customer::assign_slot] runs;
/// with anchors unset the tick is a no-op rather than an error (the customer
/// is expected to eventually receive valid anchors).
pub struct Customer<N: Navigator> {
    pub id: CustomerId,
    state:  CustomerState,
    nav:    N,

    /// Bound at spawn, immutable thereafter.
    slot: SlotIndex,

    queue_anchor:    Option<WorldPoint>,
    interact_anchor: Option<WorldPoint>,
    exit_anchor:     Option<WorldPoint>,

    request: Option<Request>,

    /// Earliest time the destination may be re-issued.
    next_repath_at: f64,
}

impl<N: Navigator> Customer<N> {
    pub fn new(id: CustomerId, slot: SlotIndex, nav: N) -> Self {
        Self {
            id,
            state: CustomerState::MoveToQueue,
            nav,
            slot,
            queue_anchor: None,
            interact_anchor: None,
            exit_anchor: None,
            request: None,
            next_repath_at: 0.0,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn state(&self) -> CustomerState {
        self.state
    }

    /// Bound slot index (set once at spawn).
    #[inline]
    pub fn slot(&self) -> SlotIndex {
        self.slot
    }

    /// Standing at the slot anchor and eligible for service.
    #[inline]
    pub fn is_waiting(&self) -> bool {
        self.state == CustomerState::Waiting
    }

    /// The requested product while the request is visible.
    #[inline]
    pub fn requested_product(&self) -> Option<ProductId> {
        self.request.map(|r| r.product)
    }

    #[inline]
    pub fn has_request_visible(&self) -> bool {
        self.request.is_some()
    }

    #[inline]
    pub fn position(&self) -> WorldPoint {
        self.nav.position()
    }

    #[inline]
    pub fn navigator(&self) -> &N {
        &self.nav
    }

    // ── Commands ──────────────────────────────────────────────────────────

    /// Bind this customer to its slot's anchors and the exit anchor.
    ///
    /// With `force_repath` the destination is issued immediately instead of
    /// waiting for the normal cooldown.
    pub fn assign_slot<X: SceneFx>(
        &mut self,
        queue_anchor:    WorldPoint,
        interact_anchor: WorldPoint,
        exit_anchor:     WorldPoint,
        force_repath:    bool,
        now:             f64,
        tuning:          &Tuning,
        fx:              &mut X,
    ) {
        self.queue_anchor = Some(queue_anchor);
        self.interact_anchor = Some(interact_anchor);
        self.exit_anchor = Some(exit_anchor);

        if force_repath {
            // Moving again: drop any facing lock so travel looks forward.
            fx.clear_look(Actor::Customer(self.id));
            self.state = CustomerState::MoveToQueue;
            self.nav.set_destination(queue_anchor);
            self.next_repath_at = now + tuning.repath_cooldown_secs as f64;
        }
    }

    /// Reveal a request for `product` (replacing any existing one).
    pub fn show_request<X: SceneFx>(&mut self, product: ProductId, fx: &mut X) {
        self.hide_request(fx);
        let bubble = fx.spawn_prop(PropKind::RequestBubble(self.id, product));
        self.request = Some(Request { product, bubble });
    }

    /// Hide the request, destroying its bubble prop if one was spawned.
    pub fn hide_request<X: SceneFx>(&mut self, fx: &mut X) {
        if let Some(req) = self.request.take() {
            if let Some(handle) = req.bubble {
                fx.despawn_prop(handle);
            }
        }
    }

    /// Head for the exit.  No-op while the exit anchor is unset.
    pub fn leave<X: SceneFx>(&mut self, now: f64, tuning: &Tuning, fx: &mut X) {
        let Some(exit) = self.exit_anchor else { return };

        fx.clear_look(Actor::Customer(self.id));
        self.state = CustomerState::Leaving;
        self.nav.set_destination(exit);
        self.next_repath_at = now + tuning.repath_cooldown_secs as f64;
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance one tick.  Returns [`CustomerEvent::Exited`] once the exit
    /// anchor is reached in `Leaving`; the caller releases the slot and
    /// despawns the customer.
    pub fn tick<X: SceneFx>(
        &mut self,
        now:    f64,
        dt:     f32,
        tuning: &Tuning,
        fx:     &mut X,
    ) -> Option<CustomerEvent> {
        self.nav.advance(dt);

        match self.state {
            CustomerState::MoveToQueue => {
                let Some(queue) = self.queue_anchor else { return None };

                self.repath_toward(queue, now, tuning);

                if arrived(&self.nav, queue, tuning.arrive_threshold) {
                    self.enter_waiting(queue, fx);
                }
                None
            }

            CustomerState::Waiting => {
                // Hold position exactly: collisions can nudge the agent off
                // its anchor while it stands in line.
                if let Some(queue) = self.queue_anchor {
                    if self.nav.position().distance(queue) > tuning.keep_snap_distance {
                        self.nav.warp_to(queue);
                    }
                }
                match self.interact_anchor {
                    Some(interact) => fx.look_at(Actor::Customer(self.id), interact, false),
                    None => fx.clear_look(Actor::Customer(self.id)),
                }
                None
            }

            CustomerState::Leaving => {
                let Some(exit) = self.exit_anchor else { return None };

                self.repath_toward(exit, now, tuning);

                if arrived(&self.nav, exit, tuning.arrive_threshold) {
                    return Some(CustomerEvent::Exited);
                }
                None
            }
        }
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Re-issue the destination at most once per cooldown, and only when the
    /// navigator has no path to follow (covers the post-warp transient).
    fn repath_toward(&mut self, target: WorldPoint, now: f64, tuning: &Tuning) {
        if now < self.next_repath_at {
            return;
        }
        if !self.nav.has_path() && !self.nav.has_pending_path() {
            self.nav.set_destination(target);
        }
        self.next_repath_at = now + tuning.repath_cooldown_secs as f64;
    }

    /// Snap exactly onto the slot anchor and face the interact anchor.
    fn enter_waiting<X: SceneFx>(&mut self, queue: WorldPoint, fx: &mut X) {
        self.state = CustomerState::Waiting;
        self.nav.stop();
        self.nav.warp_to(queue);

        if let Some(interact) = self.interact_anchor {
            fx.look_at(Actor::Customer(self.id), interact, true);
        }
    }
}
