//! Planar world coordinates.
//!
//! All gameplay geometry in the counter scene lies on the ground plane, so a
//! position is an `(x, z)` pair of `f32`s.  Distances are plain Euclidean —
//! there is no wrap-around or projection involved at room scale.

/// A point on the ground plane, in metres.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldPoint {
    pub x: f32,
    pub z: f32,
}

impl WorldPoint {
    pub const ORIGIN: WorldPoint = WorldPoint { x: 0.0, z: 0.0 };

    #[inline]
    pub fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    /// Euclidean distance to `other` in metres.
    #[inline]
    pub fn distance(self, other: WorldPoint) -> f32 {
        let dx = other.x - self.x;
        let dz = other.z - self.z;
        (dx * dx + dz * dz).sqrt()
    }

    /// Move from `self` toward `target` by at most `step` metres.
    ///
    /// Lands exactly on `target` when `step` covers the remaining distance,
    /// so movers never overshoot or oscillate around their goal.
    pub fn step_toward(self, target: WorldPoint, step: f32) -> WorldPoint {
        let d = self.distance(target);
        if d <= step || d <= f32::EPSILON {
            return target;
        }
        let t = step / d;
        WorldPoint {
            x: self.x + (target.x - self.x) * t,
            z: self.z + (target.z - self.z) * t,
        }
    }
}

impl std::fmt::Display for WorldPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.z)
    }
}
