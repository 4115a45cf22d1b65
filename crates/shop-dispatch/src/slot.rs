//! A single queue slot.

use shop_core::{CustomerId, WorldPoint};

/// One of the fixed queueing positions a customer can occupy.
///
/// Invariant: at most one customer occupies a slot at any time, and a
/// customer occupies at most one slot.  Both are enforced by the
/// [`Dispatcher`][crate::Dispatcher], which is the only writer.
#[derive(Debug, Clone)]
pub struct QueueSlot {
    /// Where the occupying customer stands.
    pub queue_anchor: WorldPoint,

    /// Where the employee stands to interact with this slot's occupant.
    pub interact_anchor: WorldPoint,

    /// The current occupant, if any.
    pub occupant: Option<CustomerId>,
}

impl QueueSlot {
    pub fn new(queue_anchor: WorldPoint, interact_anchor: WorldPoint) -> Self {
        Self { queue_anchor, interact_anchor, occupant: None }
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        self.occupant.is_none()
    }
}
