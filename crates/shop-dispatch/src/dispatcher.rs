//! The slot allocator, spawn timer, and next-customer query.

use rustc_hash::FxHashMap;

use shop_core::{CounterLayout, CustomerId, SlotIndex, WorldPoint};

use crate::error::{DispatchError, DispatchResult};
use crate::slot::QueueSlot;

/// Owns the fixed slot array, the spawn deadline, and the customer→slot map.
///
/// # Service-priority policy
///
/// [`next_waiting`][Dispatcher::next_waiting] scans slots in ascending index
/// order: lower slot index = closer to the counter = served first.  Slots
/// are never compacted — a released slot stays empty until the spawn timer
/// fills it again.
pub struct Dispatcher {
    slots:   Vec<QueueSlot>,
    /// Reverse index for O(1) release.
    slot_of: FxHashMap<CustomerId, SlotIndex>,

    spawn_point: WorldPoint,
    exit_point:  WorldPoint,

    spawn_interval_secs: f32,
    /// Effective cap: `min(configured max, slot count)`.
    max_customers: usize,

    next_spawn_at:    f64,
    next_customer_id: u32,
}

impl Dispatcher {
    /// Build from a validated layout.  The first spawn deadline is armed one
    /// full interval after time zero.
    pub fn new(
        layout:              &CounterLayout,
        spawn_interval_secs: f32,
        max_customers:       usize,
    ) -> DispatchResult<Self> {
        layout.validate()?;

        let slots = layout
            .queue_anchors
            .iter()
            .zip(&layout.interact_anchors)
            .map(|(&q, &i)| QueueSlot::new(q, i))
            .collect::<Vec<_>>();

        Ok(Self {
            max_customers: max_customers.min(slots.len()),
            slots,
            slot_of: FxHashMap::default(),
            spawn_point: layout.spawn_point,
            exit_point: layout.exit_point,
            spawn_interval_secs,
            next_spawn_at: spawn_interval_secs as f64,
            next_customer_id: 0,
        })
    }

    // ── Spawn timing ──────────────────────────────────────────────────────

    /// Poll the spawn timer.
    ///
    /// When the deadline has passed, it is re-armed to `now + interval`
    /// unconditionally — a full interval is consumed even when nothing can
    /// spawn.  A slot index (first free, by ascending index) is returned
    /// only when occupancy is below the cap and a free slot exists; the
    /// caller then creates the customer and calls [`bind`][Self::bind].
    pub fn poll_spawn(&mut self, now: f64) -> Option<SlotIndex> {
        if now < self.next_spawn_at {
            return None;
        }
        self.next_spawn_at = now + self.spawn_interval_secs as f64;

        if self.occupied_count() >= self.max_customers {
            return None;
        }
        self.first_free_slot()
    }

    /// Mint a session-unique customer id.
    pub fn allocate_customer_id(&mut self) -> CustomerId {
        let id = CustomerId(self.next_customer_id);
        self.next_customer_id += 1;
        id
    }

    // ── Occupancy ─────────────────────────────────────────────────────────

    /// Record `customer` as the occupant of `slot`.
    pub fn bind(&mut self, customer: CustomerId, slot: SlotIndex) -> DispatchResult<()> {
        let entry = self
            .slots
            .get_mut(slot.index())
            .ok_or(DispatchError::SlotOutOfRange(slot))?;

        if let Some(occupant) = entry.occupant {
            return Err(DispatchError::SlotOccupied { slot, occupant });
        }

        entry.occupant = Some(customer);
        self.slot_of.insert(customer, slot);
        Ok(())
    }

    /// Free the slot bound to `customer`.
    ///
    /// Idempotent: releasing an unknown or already-released customer is a
    /// no-op (returns `false`).  No other slot is touched and nothing is
    /// compacted.
    pub fn release(&mut self, customer: CustomerId) -> bool {
        let Some(slot) = self.slot_of.remove(&customer) else {
            return false;
        };
        if let Some(entry) = self.slots.get_mut(slot.index()) {
            if entry.occupant == Some(customer) {
                entry.occupant = None;
            }
        }
        true
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// The first occupant (ascending slot index) for which `is_waiting`
    /// holds, skipping `excluding`.  Returns `None` when nobody qualifies.
    pub fn next_waiting(
        &self,
        excluding:  Option<CustomerId>,
        is_waiting: impl Fn(CustomerId) -> bool,
    ) -> Option<CustomerId> {
        self.slots
            .iter()
            .filter_map(|s| s.occupant)
            .find(|&c| Some(c) != excluding && is_waiting(c))
    }

    #[inline]
    pub fn occupant(&self, slot: SlotIndex) -> Option<CustomerId> {
        self.slots.get(slot.index()).and_then(|s| s.occupant)
    }

    #[inline]
    pub fn slot_of(&self, customer: CustomerId) -> Option<SlotIndex> {
        self.slot_of.get(&customer).copied()
    }

    #[inline]
    pub fn queue_anchor(&self, slot: SlotIndex) -> Option<WorldPoint> {
        self.slots.get(slot.index()).map(|s| s.queue_anchor)
    }

    #[inline]
    pub fn interact_anchor(&self, slot: SlotIndex) -> Option<WorldPoint> {
        self.slots.get(slot.index()).map(|s| s.interact_anchor)
    }

    #[inline]
    pub fn spawn_point(&self) -> WorldPoint {
        self.spawn_point
    }

    #[inline]
    pub fn exit_point(&self) -> WorldPoint {
        self.exit_point
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| s.occupant.is_some()).count()
    }

    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    fn first_free_slot(&self) -> Option<SlotIndex> {
        self.slots
            .iter()
            .position(QueueSlot::is_free)
            .map(|i| SlotIndex(i as u16))
    }
}
