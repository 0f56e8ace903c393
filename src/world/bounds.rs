use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::world::random::RandomSource;

/// Axis-aligned rectangle used for fairy spawning and wander confinement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    /// Build from two opposite corners given in any order.
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self::from_corners(Vec2::new(min_x, min_y), Vec2::new(max_x, max_y))
    }

    /// Inclusive on every edge
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    pub fn clamp(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min, self.max)
    }

    /// Uniformly random point inside the rectangle.
    pub fn sample(&self, rng: &mut impl RandomSource) -> Vec2 {
        let x = rng.range(self.min.x, self.max.x);
        let y = rng.range(self.min.y, self.max.y);
        // Guard against float rounding at the edges of the range
        self.clamp(Vec2::new(x, y))
    }
}
