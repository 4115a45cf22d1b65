//! Simulation configuration.
//!
//! All configuration is read at startup and immutable thereafter.  Typically
//! assembled in code or deserialized from a TOML/JSON file by the application
//! crate (enable the `serde` feature) and passed to the sim builder.

use crate::{ProductId, ShopError, ShopResult, WorldPoint};

// ── Tuning ────────────────────────────────────────────────────────────────────

/// Distance and timing thresholds shared by both state machines.
///
/// Defaults are hand-tuned for a room-scale counter scene.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tuning {
    /// Base arrival threshold in metres.  The effective threshold is
    /// `max(arrive_threshold, navigator stopping distance + 0.02)` so it
    /// always sits slightly above the navigator's own stopping distance.
    pub arrive_threshold: f32,

    /// Waiting customers re-snap onto their slot anchor when positional
    /// drift exceeds this (guards against collision nudges).
    pub keep_snap_distance: f32,

    /// Minimum period between destination re-issues while travelling.
    pub repath_cooldown_secs: f32,

    /// The idle employee walks back toward home when further than this.
    pub near_home_distance: f32,

    /// While approaching a station, the employee faces the station (instead
    /// of the travel direction) once within this distance.
    pub face_station_distance: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arrive_threshold:      0.12,
            keep_snap_distance:    0.03,
            repath_cooldown_secs:  0.3,
            near_home_distance:    0.3,
            face_station_distance: 1.2,
        }
    }
}

// ── CounterLayout ─────────────────────────────────────────────────────────────

/// Fixed world anchors of the counter scene.
///
/// `queue_anchors[i]` is where the customer in slot `i` stands;
/// `interact_anchors[i]` is where the employee stands to interact with that
/// slot.  The two lists must have equal length — that length is the slot
/// count, fixed for the whole run.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CounterLayout {
    pub queue_anchors:    Vec<WorldPoint>,
    pub interact_anchors: Vec<WorldPoint>,

    /// Where new customers appear.
    pub spawn_point: WorldPoint,
    /// Where leaving customers walk to before despawning.
    pub exit_point: WorldPoint,
    /// The employee's idle anchor.
    pub home_point: WorldPoint,
}

impl CounterLayout {
    /// Number of queue slots described by this layout.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.queue_anchors.len()
    }

    /// Check the anchor lists for the startup configuration errors the
    /// simulation cannot recover from at runtime.
    pub fn validate(&self) -> ShopResult<()> {
        if self.queue_anchors.is_empty() {
            return Err(ShopError::Config("layout has no queue anchors".into()));
        }
        if self.interact_anchors.len() != self.queue_anchors.len() {
            return Err(ShopError::Config(format!(
                "interact anchor count {} does not match queue anchor count {}",
                self.interact_anchors.len(),
                self.queue_anchors.len()
            )));
        }
        Ok(())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Simulated seconds per tick used by `run_ticks`.  Callers stepping the
    /// sim manually may pass any per-tick delta instead.
    pub tick_duration_secs: f32,

    /// Seconds between spawn attempts.  A full interval is consumed even
    /// when the attempt is skipped because all slots are occupied.
    pub spawn_interval_secs: f32,

    /// Upper bound on concurrently present customers.  Effectively capped at
    /// the slot count.
    pub max_customers: usize,

    /// Products a customer request may be drawn from.  Must be non-empty.
    pub unlocked_products: Vec<ProductId>,

    /// Shared distance/timing thresholds.
    pub tuning: Tuning,
}

impl SimConfig {
    pub fn validate(&self) -> ShopResult<()> {
        if self.spawn_interval_secs <= 0.0 {
            return Err(ShopError::Config(format!(
                "spawn interval must be positive, got {}",
                self.spawn_interval_secs
            )));
        }
        if self.unlocked_products.is_empty() {
            return Err(ShopError::Config("unlocked product set is empty".into()));
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed:                42,
            tick_duration_secs:  0.1,
            spawn_interval_secs: 5.0,
            max_customers:       6,
            unlocked_products:   vec![ProductId(0)],
            tuning:              Tuning::default(),
        }
    }
}
