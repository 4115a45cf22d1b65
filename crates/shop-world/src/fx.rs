//! Cosmetic and economic collaborator traits.
//!
//! Everything here is consumed by the state machines but implemented outside
//! the core: facing animation, visual props (the request thought-bubble and
//! the carried item), station progress rings, and the money ledger.  All
//! `SceneFx` methods default to no-ops so a host only overrides what it
//! renders; prop spawning may fail (missing prefab) and the state machines
//! proceed without the visual.

use shop_core::{CustomerId, ProductId, StationId, WorldPoint};

// ── Actors and props ──────────────────────────────────────────────────────────

/// Which agent a cosmetic call refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Actor {
    Employee,
    Customer(CustomerId),
}

/// What a spawned prop depicts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PropKind {
    /// The thought-bubble above a customer showing the requested product.
    RequestBubble(CustomerId, ProductId),
    /// The item the employee carries after gathering.
    CarriedItem(ProductId),
}

/// Opaque handle to a spawned visual prop, minted by the [`SceneFx`] impl.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PropHandle(pub u64);

// ── SceneFx ───────────────────────────────────────────────────────────────────

/// Cosmetic scene operations.  Never affects state-machine decisions.
pub trait SceneFx {
    /// Orient `actor` toward `target`.  `snap` turns instantly; otherwise the
    /// host may ease over several frames.
    fn look_at(&mut self, _actor: Actor, _target: WorldPoint, _snap: bool) {}

    /// Release any facing lock so `actor` turns with its travel direction.
    fn clear_look(&mut self, _actor: Actor) {}

    /// Instantiate a visual prop.  `None` (missing prefab) is tolerated —
    /// callers carry on without the visual.
    fn spawn_prop(&mut self, _kind: PropKind) -> Option<PropHandle> {
        None
    }

    /// Destroy a previously spawned prop.
    fn despawn_prop(&mut self, _handle: PropHandle) {}

    /// Show a station's progress ring at `fraction` (0..=1).
    fn show_progress(&mut self, _station: StationId, _fraction: f32) {}

    /// Hide a station's progress ring.
    fn hide_progress(&mut self, _station: StationId) {}
}

/// A [`SceneFx`] that does nothing.  Use for headless runs and tests.
#[derive(Debug, Default)]
pub struct NoopFx;

impl SceneFx for NoopFx {}

// ── Ledger ────────────────────────────────────────────────────────────────────

/// The economy ledger.  The core only ever credits it.
pub trait Ledger {
    /// Add `amount` to the balance.
    fn credit(&mut self, amount: u32);
}

/// In-memory ledger accumulating a running total.
#[derive(Debug, Default)]
pub struct CashLedger {
    total: u64,
}

impl CashLedger {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn balance(&self) -> u64 {
        self.total
    }
}

impl Ledger for CashLedger {
    fn credit(&mut self, amount: u32) {
        self.total += amount as u64;
    }
}
