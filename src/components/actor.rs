//! The base actor record.
//!
//! [`Actor`] holds everything the simulation integrates and collides: the
//! transform (position, unscaled size, rotation, uniform scale), the
//! kinematic rates, and the collision/visibility flags. It is a plain `Copy`
//! value so the collision pass can read other actors without holding borrows
//! into the world.
//!
//! Position is the top-left corner of the box. All rates are per second and
//! are integrated with a millisecond delta.

use bevy_ecs::prelude::Component;

use crate::events::collision::Side;
use crate::math::{Overlap, Vector};
use crate::render::Color;

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Actor {
    /// Top-left corner in the parent's coordinate space.
    pub pos: Vector,
    /// Unscaled width. Use [`Actor::width`] for the effective width.
    pub width: f32,
    /// Unscaled height. Use [`Actor::height`] for the effective height.
    pub height: f32,
    /// Rotation in radians.
    pub rotation: f32,
    /// Angular velocity in radians per second.
    pub angular_velocity: f32,
    /// Uniform scale factor.
    pub scale: f32,
    /// Scale change per second.
    pub scale_velocity: f32,
    /// Pixels per second.
    pub velocity: Vector,
    /// Pixels per second squared.
    pub acceleration: Vector,
    pub invisible: bool,
    /// Fixed actors report collisions but are never pushed out of them.
    pub fixed: bool,
    /// Other actors skip this one in their collision pass.
    pub prevent_collisions: bool,
    /// Fill color used when no drawing is selected.
    pub color: Color,
    pub center_drawing_x: bool,
    pub center_drawing_y: bool,
}

impl Default for Actor {
    fn default() -> Self {
        Self {
            pos: Vector::ZERO,
            width: 0.0,
            height: 0.0,
            rotation: 0.0,
            angular_velocity: 0.0,
            scale: 1.0,
            scale_velocity: 0.0,
            velocity: Vector::ZERO,
            acceleration: Vector::ZERO,
            invisible: false,
            fixed: true,
            prevent_collisions: false,
            color: Color::BLACK,
            center_drawing_x: false,
            center_drawing_y: false,
        }
    }
}

impl Actor {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vector::new(x, y),
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_velocity(mut self, dx: f32, dy: f32) -> Self {
        self.velocity = Vector::new(dx, dy);
        self
    }

    pub fn with_acceleration(mut self, ax: f32, ay: f32) -> Self {
        self.acceleration = Vector::new(ax, ay);
        self
    }

    /// Let the collision pass push this actor out of overlaps.
    pub fn kinematic(mut self) -> Self {
        self.fixed = false;
        self
    }

    pub fn without_collisions(mut self) -> Self {
        self.prevent_collisions = true;
        self
    }

    pub fn x(&self) -> f32 {
        self.pos.x
    }

    pub fn y(&self) -> f32 {
        self.pos.y
    }

    /// Effective (scaled) width.
    pub fn width(&self) -> f32 {
        self.width * self.scale
    }

    /// Set the effective width; the stored width compensates for the scale.
    pub fn set_width(&mut self, width: f32) {
        self.width = width / self.scale;
    }

    /// Effective (scaled) height.
    pub fn height(&self) -> f32 {
        self.height * self.scale
    }

    pub fn set_height(&mut self, height: f32) {
        self.height = height / self.scale;
    }

    pub fn set_center_drawing(&mut self, center: bool) {
        self.center_drawing_x = center;
        self.center_drawing_y = center;
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.width()
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height()
    }

    pub fn center(&self) -> Vector {
        Vector::new(
            self.pos.x + self.width() / 2.0,
            self.pos.y + self.height() / 2.0,
        )
    }

    /// Advance velocity, position, rotation and scale by `delta` milliseconds.
    pub fn integrate(&mut self, delta: f32) {
        let seconds = delta / 1000.0;
        self.velocity = self.velocity.add(self.acceleration.scale(seconds));
        self.pos = self.pos.add(self.velocity.scale(seconds));
        self.rotation += self.angular_velocity * seconds;
        self.scale += self.scale_velocity * seconds;
    }

    /// Inclusive point-in-box test.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.pos.x <= x && self.pos.y <= y && self.bottom() >= y && self.right() >= x
    }

    /// True when the top-left corners are at most `distance` apart.
    pub fn within(&self, other: &Actor, distance: f32) -> bool {
        self.pos.distance(other.pos) <= distance
    }

    /// AABB overlap test that also classifies the struck side.
    ///
    /// Overlap exists iff the center distance is strictly below the combined
    /// half extents on both axes. The side comes from comparing `w*dy`
    /// against `h*dx`, which splits the overlap region along its diagonals.
    pub fn collides(&self, other: &Actor) -> Side {
        let w = 0.5 * (self.width() + other.width());
        let h = 0.5 * (self.height() + other.height());

        let dx = (self.pos.x + self.width() / 2.0) - (other.pos.x + other.width() / 2.0);
        let dy = (self.pos.y + self.height() / 2.0) - (other.pos.y + other.height() / 2.0);

        if dx.abs() < w && dy.abs() < h {
            let wy = w * dy;
            let hx = h * dx;

            if wy > hx {
                if wy > -hx { Side::Top } else { Side::Left }
            } else if wy > -hx {
                Side::Right
            } else {
                Side::Bottom
            }
        } else {
            Side::None
        }
    }

    /// Penetration depth against `other`, per axis.
    ///
    /// On each axis the two candidate displacements are compared and the one
    /// with the smaller magnitude wins. Zero when the boxes do not collide.
    pub fn overlap(&self, other: &Actor) -> Overlap {
        let mut xover: f32 = 0.0;
        let mut yover: f32 = 0.0;
        if self.collides(other) != Side::None {
            if self.left() < other.right() {
                xover = other.right() - self.left();
            }
            if other.left() < self.right() {
                let tmp = other.left() - self.right();
                if xover.abs() > tmp.abs() {
                    xover = tmp;
                }
            }

            if self.bottom() > other.top() {
                yover = other.top() - self.bottom();
            }
            if other.bottom() > self.top() {
                let tmp = other.bottom() - self.top();
                if yover.abs() > tmp.abs() {
                    yover = tmp;
                }
            }
        }
        Overlap::new(xover, yover)
    }

    /// Push out along the axis needing the least displacement.
    pub fn resolve(&mut self, overlap: Overlap) {
        if overlap.y.abs() < overlap.x.abs() {
            self.pos.y += overlap.y;
        } else {
            self.pos.x += overlap.x;
        }
    }
}
