//! Axis-aligned box geometry
//!
//! Screen space: origin top-left, +y points down. A box spans
//! `[min, min + size]` on both axes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::hazard::HazardInstance;

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Square box of side `size` at `pos` (the player)
    pub fn square(pos: Vec2, size: f32) -> Self {
        Self::new(pos, Vec2::splat(size))
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Strict overlap test: boxes that only share an edge do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Does the player box at `pos` overlap the hazard's collision box?
///
/// Visual offsets (floor tremble, gem bob) never take part in the test.
#[inline]
pub fn aabb_overlap(pos: Vec2, player_size: f32, obj: &HazardInstance) -> bool {
    Aabb::square(pos, player_size).overlaps(&obj.collision_box())
}

/// Horizontal distance from the player's left edge to a hazard's center
///
/// Proximity triggers (spikes, trapdoors) are measured this way.
#[inline]
pub fn trigger_distance_x(player: &Aabb, obj: &Aabb) -> f32 {
    (player.min.x - obj.center().x).abs()
}
