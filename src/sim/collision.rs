//! Axis-aligned overlap tests between the actor and obstacles

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Actor, Obstacle};

/// Axis-aligned bounding box in field coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    #[inline]
    pub const fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap test. Boxes that only share an edge do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }
}

/// Check whether the actor is touching an obstacle
#[inline]
pub fn actor_hits_obstacle(actor: &Actor, obstacle: &Obstacle) -> bool {
    actor.bounds().overlaps(&obstacle.bounds())
}

/// IDs of every obstacle overlapping the actor, in spawn order
pub fn colliding_obstacles(actor: &Actor, obstacles: &[Obstacle]) -> Vec<u32> {
    obstacles
        .iter()
        .filter(|o| actor_hits_obstacle(actor, o))
        .map(|o| o.id)
        .collect()
}
