//! Planar geometry helpers shared by the guard, vision and objective systems.
//!
//! All angles are measured with `atan2`, so zero points along positive x and
//! positive angles rotate toward positive y (screen "down").

use glam::Vec2;

/// Euclidean distance between two points.
#[must_use]
pub fn distance(from: Vec2, to: Vec2) -> f32 {
    from.distance(to)
}

/// Angle in radians of the ray that starts at `from` and passes through `to`.
#[must_use]
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    let delta = to - from;
    delta.y.atan2(delta.x)
}

/// Heading in radians derived from a velocity vector.
///
/// A zero velocity yields `0.0`, matching `atan2(0, 0)`.
#[must_use]
pub fn heading(velocity: Vec2) -> f32 {
    velocity.y.atan2(velocity.x)
}

/// Unit vector pointing from `from` toward `to`, or `None` when the points coincide.
#[must_use]
pub fn direction_towards(from: Vec2, to: Vec2) -> Option<Vec2> {
    let delta = to - from;
    let length = delta.length();
    if length <= f32::EPSILON {
        return None;
    }
    Some(delta / length)
}

/// Signed shortest rotation in degrees that turns `from` onto `to`.
///
/// The result is wrapped into `[-180, 180)`. Both inputs are expressed in
/// degrees and may lie outside a single revolution.
#[must_use]
pub fn shortest_angle_between_degrees(from: f64, to: f64) -> f64 {
    let difference = to - from;
    if difference == 0.0 {
        return 0.0;
    }

    let turns = ((difference + 180.0) / 360.0).floor();
    difference - turns * 360.0
}

/// Axis-aligned rectangle described by its centre and half extents.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    center: Vec2,
    half_extents: Vec2,
}

impl Rect {
    /// Creates a rectangle centred on `center` spanning `size` world units.
    #[must_use]
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half_extents: size * 0.5,
        }
    }

    /// Creates a rectangle centred on `center` with the provided half extents.
    #[must_use]
    pub const fn from_center_half_extents(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    /// Centre of the rectangle.
    #[must_use]
    pub const fn center(&self) -> Vec2 {
        self.center
    }

    /// Full width and height of the rectangle.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        self.half_extents * 2.0
    }

    /// Minimum corner (smallest x and y).
    #[must_use]
    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents
    }

    /// Maximum corner (largest x and y).
    #[must_use]
    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents
    }

    /// Reports whether the point lies inside the rectangle or on its boundary.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        let min = self.min();
        let max = self.max();
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }

    /// Reports whether two rectangles overlap.
    ///
    /// Touching edges count as an overlap. Degenerate rectangles with a
    /// non-positive width or height never intersect anything.
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_degenerate() || other.is_degenerate() {
            return false;
        }

        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        !(a_max.x < b_min.x || a_max.y < b_min.y || a_min.x > b_max.x || a_min.y > b_max.y)
    }

    fn is_degenerate(&self) -> bool {
        self.half_extents.x <= 0.0 || self.half_extents.y <= 0.0
    }
}
