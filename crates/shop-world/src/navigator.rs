//! The external locomotion contract.
//!
//! # Pluggability
//!
//! Agents move through a [`Navigator`], so applications can plug in a real
//! path-following engine (navmesh, steering, physics) without touching the
//! state machines.  The default [`LineNavigator`][crate::LineNavigator] is
//! sufficient for headless runs and tests.
//!
//! # Transient states
//!
//! A real engine computes paths asynchronously: right after
//! `set_destination` it may report a pending path, and right after `warp_to`
//! it may briefly report no path at all.  Both are expected, non-error
//! states — callers retry on the next tick.  The shared [`arrived`] check
//! below encodes exactly this tolerance.

use shop_core::WorldPoint;

/// Margin added to the navigator's stopping distance when deciding arrival,
/// so the threshold always sits slightly above where the engine itself stops.
const ARRIVE_SLACK: f32 = 0.02;

// ── Navigator ─────────────────────────────────────────────────────────────────

/// Path-following locomotion for a single agent.
///
/// The simulation core only ever calls these methods; it never inspects or
/// advances paths itself.
pub trait Navigator {
    /// Current world position.
    fn position(&self) -> WorldPoint;

    /// Begin moving toward `pos`, replacing any current path.
    fn set_destination(&mut self, pos: WorldPoint);

    /// `true` while a requested path is still being computed.
    fn has_pending_path(&self) -> bool;

    /// `true` if the agent currently has a path to follow.
    fn has_path(&self) -> bool;

    /// Remaining distance along the current path, in metres.
    /// Unspecified (may be infinite) while a path is pending.
    fn remaining_distance(&self) -> f32;

    /// The engine's own stopping distance.
    fn stopping_distance(&self) -> f32;

    /// Instantaneously reposition the agent, discarding any path.
    fn warp_to(&mut self, pos: WorldPoint);

    /// Halt and discard the current path.
    fn stop(&mut self);

    /// Advance the engine by `dt` seconds.  Engines that step themselves
    /// externally implement this as a no-op.
    fn advance(&mut self, dt: f32);
}

/// Creates one [`Navigator`] per agent at runtime.
///
/// Customers are spawned mid-run, so the simulation needs a way to mint a
/// fresh navigator positioned at the spawn point.  Swap the factory at
/// compile time for a different locomotion engine with no runtime overhead.
pub trait NavigatorFactory {
    type Nav: Navigator;

    /// Create a navigator standing at `at` with no path.
    fn spawn(&self, at: WorldPoint) -> Self::Nav;
}

// ── Arrival policy ────────────────────────────────────────────────────────────

/// The shared two-branch arrival check used by every travel state.
///
/// A target counts as reached once no path computation is pending and the
/// remaining path distance is below the effective threshold — or, if no path
/// exists, the straight-line distance is.  The second branch covers the
/// transient right after a destination is set or the agent is warped, when
/// the engine can report "no path" for a tick.
pub fn arrived<N: Navigator>(nav: &N, target: WorldPoint, base_threshold: f32) -> bool {
    if nav.has_pending_path() {
        return false;
    }

    let threshold = base_threshold.max(nav.stopping_distance() + ARRIVE_SLACK);

    if nav.has_path() {
        nav.remaining_distance() <= threshold
    } else {
        nav.position().distance(target) <= threshold
    }
}
