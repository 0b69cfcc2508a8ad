//! 2D vector algebra and collision overlap records.
//!
//! [`Vector`] is a plain value type: every operation returns a new vector and
//! leaves the receiver untouched. [`Overlap`] carries the signed penetration
//! depth of one collision pair and only lives for the duration of a single
//! collision check.

use serde::{Deserialize, Serialize};

/// Two-component vector in world units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: f32,
    pub y: f32,
}

impl Vector {
    pub const ZERO: Vector = Vector { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn add(self, other: Vector) -> Vector {
        Vector::new(self.x + other.x, self.y + other.y)
    }

    pub fn minus(self, other: Vector) -> Vector {
        Vector::new(self.x - other.x, self.y - other.y)
    }

    pub fn scale(self, factor: f32) -> Vector {
        Vector::new(self.x * factor, self.y * factor)
    }

    pub fn magnitude(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(self, other: Vector) -> f32 {
        self.minus(other).magnitude()
    }

    /// Unit vector with the same direction.
    ///
    /// The zero vector has no direction and normalizes to itself.
    pub fn normalize(self) -> Vector {
        let len = self.magnitude();
        if len == 0.0 {
            return Vector::ZERO;
        }
        Vector::new(self.x / len, self.y / len)
    }

    /// Unit vector pointing at `radians` (0 = +x, y grows downwards).
    pub fn from_angle(radians: f32) -> Vector {
        Vector::new(radians.cos(), radians.sin())
    }
}

/// Signed penetration depth along each axis for one collision pair.
///
/// Adding `x` (or `y`) to the first box's position separates it from the
/// second box along that axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Overlap {
    pub x: f32,
    pub y: f32,
}

impl Overlap {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Sample a random f32 in the range [min, max].
/// If the range is smaller than EPSILON, returns min directly.
#[inline]
pub fn random_in_range(rng: &mut fastrand::Rng, min: f32, max: f32) -> f32 {
    let range = max - min;
    if range < f32::EPSILON {
        return min;
    }
    min + rng.f32() * range
}
