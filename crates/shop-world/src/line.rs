//! Deterministic straight-line navigator.
//!
//! Moves at constant speed directly toward its destination, with a
//! configurable number of "path pending" ticks after each `set_destination`
//! to model the asynchronous path computation of a real engine.  With
//! `pending_ticks = 0` and a large `speed`, travel completes within a single
//! tick — convenient for tests that want arrival "simulated instantly".

use shop_core::WorldPoint;

use crate::navigator::{Navigator, NavigatorFactory};

/// Straight-line constant-speed [`Navigator`] implementation.
#[derive(Debug, Clone)]
pub struct LineNavigator {
    position:     WorldPoint,
    destination:  Option<WorldPoint>,
    /// Ticks of `advance` left before the current path becomes available.
    pending_left: u32,
    stopped:      bool,

    speed:         f32,
    stopping_dist: f32,
    pending_ticks: u32,
}

impl LineNavigator {
    pub fn new(at: WorldPoint, speed: f32, stopping_dist: f32, pending_ticks: u32) -> Self {
        Self {
            position:      at,
            destination:   None,
            pending_left:  0,
            stopped:       false,
            speed,
            stopping_dist,
            pending_ticks,
        }
    }
}

impl Navigator for LineNavigator {
    fn position(&self) -> WorldPoint {
        self.position
    }

    fn set_destination(&mut self, pos: WorldPoint) {
        self.destination = Some(pos);
        self.pending_left = self.pending_ticks;
        self.stopped = false;
    }

    fn has_pending_path(&self) -> bool {
        self.destination.is_some() && self.pending_left > 0
    }

    fn has_path(&self) -> bool {
        self.destination.is_some() && self.pending_left == 0
    }

    fn remaining_distance(&self) -> f32 {
        match self.destination {
            Some(d) if self.pending_left == 0 => self.position.distance(d),
            // Matches engine behavior: distance is meaningless mid-computation.
            Some(_) => f32::INFINITY,
            None => 0.0,
        }
    }

    fn stopping_distance(&self) -> f32 {
        self.stopping_dist
    }

    fn warp_to(&mut self, pos: WorldPoint) {
        self.position = pos;
        self.destination = None;
        self.pending_left = 0;
    }

    fn stop(&mut self) {
        self.stopped = true;
        self.destination = None;
        self.pending_left = 0;
    }

    fn advance(&mut self, dt: f32) {
        if self.pending_left > 0 {
            self.pending_left -= 1;
            return;
        }
        if self.stopped {
            return;
        }
        if let Some(dest) = self.destination {
            self.position = self.position.step_toward(dest, self.speed * dt);
        }
    }
}

// ── Factory ───────────────────────────────────────────────────────────────────

/// Mints [`LineNavigator`]s with shared tuning.
#[derive(Debug, Clone)]
pub struct LineNavFactory {
    pub speed:         f32,
    pub stopping_dist: f32,
    pub pending_ticks: u32,
}

impl LineNavFactory {
    /// Walking-pace navigators with a one-tick path computation delay.
    pub fn walking() -> Self {
        Self { speed: 1.5, stopping_dist: 0.05, pending_ticks: 1 }
    }

    /// Effectively instantaneous travel; used by tests.
    pub fn instant() -> Self {
        Self { speed: 1.0e6, stopping_dist: 0.05, pending_ticks: 0 }
    }
}

impl NavigatorFactory for LineNavFactory {
    type Nav = LineNavigator;

    fn spawn(&self, at: WorldPoint) -> LineNavigator {
        LineNavigator::new(at, self.speed, self.stopping_dist, self.pending_ticks)
    }
}
