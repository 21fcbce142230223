//! Screen → world mapping for pointer spawns.
//!
//! The world is a fixed axis-aligned rectangle; pointer positions are
//! normalized against the viewport and lerped into it. No camera involved.

use bevy::math::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Closed interval on one world axis. `min` is not required to be below `max`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldRange {
    pub min: f32,
    pub max: f32,
}

impl WorldRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// `min + t * (max - min)`.
    pub fn lerp(&self, t: f32) -> f32 {
        self.min + t * (self.max - self.min)
    }

    /// Extent as the consumers expect it: |min| + |max|.
    pub fn extent(&self) -> f32 {
        self.min.abs() + self.max.abs()
    }
}

impl Default for WorldRange {
    fn default() -> Self {
        Self::new(-3.0, 3.0)
    }
}

/// Normalize `value` against `size`, clamped to [0, 1]. Zero or negative size maps to 0.
fn normalize(value: f32, size: f32) -> f32 {
    if size > 0.0 {
        (value / size).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Map a pointer position (bottom-left origin, in viewport units) into the world rectangle.
pub fn screen_to_world(
    pointer: Vec2,
    viewport: Vec2,
    x_range: WorldRange,
    y_range: WorldRange,
    world_z: f32,
) -> Vec3 {
    let u = normalize(pointer.x, viewport.x);
    let v = normalize(pointer.y, viewport.y);
    Vec3::new(x_range.lerp(u), y_range.lerp(v), world_z)
}

/// Ground size vector handed to consumers for scaling.
pub fn ground_extent(x_range: WorldRange, y_range: WorldRange) -> Vec2 {
    Vec2::new(x_range.extent(), y_range.extent())
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: WorldRange = WorldRange::new(-3.0, 3.0);
    const Y: WorldRange = WorldRange::new(-2.0, 4.0);

    #[test]
    fn origin_maps_to_range_minimum() {
        let p = screen_to_world(Vec2::ZERO, Vec2::new(800.0, 600.0), X, Y, 1.5);
        assert_eq!(p, Vec3::new(-3.0, -2.0, 1.5));
    }

    #[test]
    fn far_corner_maps_to_range_maximum() {
        let p = screen_to_world(Vec2::new(800.0, 600.0), Vec2::new(800.0, 600.0), X, Y, 0.0);
        assert_eq!(p, Vec3::new(3.0, 4.0, 0.0));
    }

    #[test]
    fn center_maps_to_midpoint() {
        let p = screen_to_world(Vec2::new(400.0, 300.0), Vec2::new(800.0, 600.0), X, Y, 0.0);
        assert_eq!(p, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn degenerate_viewport_maps_to_minimum() {
        let p = screen_to_world(Vec2::new(120.0, 80.0), Vec2::new(0.0, 0.0), X, Y, 2.0);
        assert_eq!(p, Vec3::new(-3.0, -2.0, 2.0));

        let p = screen_to_world(Vec2::new(120.0, 80.0), Vec2::new(-10.0, 600.0), X, Y, 2.0);
        assert_eq!(p.x, -3.0);
    }

    #[test]
    fn out_of_viewport_input_is_clamped() {
        let p = screen_to_world(Vec2::new(-50.0, 9000.0), Vec2::new(800.0, 600.0), X, Y, 0.0);
        assert_eq!(p, Vec3::new(-3.0, 4.0, 0.0));
    }

    #[test]
    fn ground_extent_sums_absolute_bounds() {
        assert_eq!(ground_extent(X, Y), Vec2::new(6.0, 6.0));
        let lopsided = WorldRange::new(1.0, 5.0);
        assert_eq!(ground_extent(lopsided, lopsided), Vec2::new(6.0, 6.0));
    }
}
