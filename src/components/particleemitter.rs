//! Particle emitter facet.
//!
//! An actor carrying a [`ParticleEmitter`] owns a set of short-lived
//! [`Particle`]s. Particles are plain values inside the component, not
//! entities: they never collide, never receive events and are drawn as
//! circles by the emitter itself.
//!
//! # Lifecycle
//!
//! Each frame, after the owning actor's regular update:
//!
//! 1. if `is_emitting`, `ceil(emit_rate * delta / 1000)` particles are spawned
//!    (the fractional part is not carried to the next frame);
//! 2. every live particle is updated; particles whose life ran out are staged
//!    in the dead set;
//! 3. staged particles are removed from the live list and the set is cleared.
//!
//! # Particle motion
//!
//! A particle with a focus point accelerates toward it at `focus_accel`
//! and ignores its own acceleration. Otherwise the configured acceleration
//! applies. Fading particles lose opacity at half of
//! `initial opacity / initial life` per ms.
//!
//! # Related
//!
//! - [`crate::systems::particleemitter::update_emitter`] – per-frame driver
//! - [`crate::systems::render`] – particle and debug drawing

use bevy_ecs::prelude::Component;
use fastrand::Rng;
use rustc_hash::FxHashSet;

use crate::components::actor::Actor;
use crate::math::{Vector, random_in_range};
use crate::render::{Color, DrawSurface};

/// Identity of a particle within its emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(pub u64);

/// One bounded-lifetime point.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: ParticleId,
    pub position: Vector,
    pub velocity: Vector,
    pub acceleration: Vector,
    /// World point the particle is pulled toward, if any.
    pub focus: Option<Vector>,
    pub focus_accel: f32,
    pub opacity: f32,
    pub color: Color,
    /// Remaining life in ms.
    pub life: f32,
    pub fade: bool,
    fade_rate: f32,
    /// Circle radius.
    pub size: f32,
}

impl Particle {
    pub fn new(id: ParticleId, life: f32, position: Vector, velocity: Vector, acceleration: Vector) -> Self {
        let opacity = 1.0;
        Self {
            id,
            position,
            velocity,
            acceleration,
            focus: None,
            focus_accel: 0.0,
            opacity,
            color: Color::WHITE,
            life,
            fade: false,
            fade_rate: fade_rate(opacity, life),
            size: 5.0,
        }
    }

    /// Set the starting opacity. Also fixes the fade rate.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self.fade_rate = fade_rate(opacity, self.life);
        self
    }

    pub fn fade_rate(&self) -> f32 {
        self.fade_rate
    }

    /// Advance by `delta` ms. Returns true once life drops below zero.
    pub fn update(&mut self, delta: f32) -> bool {
        self.life -= delta;
        if self.fade {
            self.opacity -= self.fade_rate * delta / 2.0;
        }
        let dead = self.life < 0.0;

        let dt = delta / 1000.0;
        let accel = match self.focus {
            Some(focus) => focus.minus(self.position).normalize().scale(self.focus_accel),
            None => self.acceleration,
        };
        self.velocity = self.velocity.add(accel.scale(dt));
        self.position = self.position.add(self.velocity.scale(dt));
        dead
    }

    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        let alpha = if self.opacity < 0.0 { 0.01 } else { self.opacity };
        surface.fill_circle(
            self.position.x,
            self.position.y,
            self.size,
            self.color.with_alpha(alpha),
        );
    }
}

fn fade_rate(opacity: f32, life: f32) -> f32 {
    if life > 0.0 { opacity / life } else { 0.0 }
}

#[derive(Component, Debug, Clone)]
pub struct ParticleEmitter {
    pub is_emitting: bool,
    /// Particles per second.
    pub emit_rate: f32,
    /// Particle life in ms.
    pub particle_life: f32,
    pub min_velocity: f32,
    pub max_velocity: f32,
    /// Emission angles in radians.
    pub min_angle: f32,
    pub max_angle: f32,
    pub min_size: f32,
    pub max_size: f32,
    /// Acceleration given to every particle.
    pub particle_acceleration: Vector,
    pub opacity: f32,
    pub fade: bool,
    /// Focus point relative to the emitter position.
    pub focus: Option<Vector>,
    pub focus_accel: f32,
    pub particle_color: Color,
    particles: Vec<Particle>,
    dead: FxHashSet<ParticleId>,
    next_id: u64,
    rng: Rng,
}

impl Default for ParticleEmitter {
    fn default() -> Self {
        Self {
            is_emitting: false,
            emit_rate: 1.0,
            particle_life: 2000.0,
            min_velocity: 0.0,
            max_velocity: 0.0,
            min_angle: 0.0,
            max_angle: 0.0,
            min_size: 5.0,
            max_size: 5.0,
            particle_acceleration: Vector::ZERO,
            opacity: 1.0,
            fade: false,
            focus: None,
            focus_accel: 1.0,
            particle_color: Color::WHITE,
            particles: Vec::new(),
            dead: FxHashSet::default(),
            next_id: 0,
            rng: Rng::new(),
        }
    }
}

impl ParticleEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emitter with a deterministic random sequence.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Rng::with_seed(seed),
            ..Self::default()
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Particles staged for removal and not yet swept.
    pub fn dead(&self) -> &FxHashSet<ParticleId> {
        &self.dead
    }

    /// Number of particles to spawn for a frame of `delta` ms.
    pub fn emission_count(&self, delta: f32) -> usize {
        if !self.is_emitting || self.emit_rate <= 0.0 || delta <= 0.0 {
            return 0;
        }
        (self.emit_rate * delta / 1000.0).ceil() as usize
    }

    /// Spawn `count` particles inside `origin`'s box.
    pub fn emit(&mut self, origin: &Actor, count: usize) {
        self.particles.reserve(count);
        for _ in 0..count {
            let particle = self.create_particle(origin);
            self.particles.push(particle);
        }
    }

    pub fn clear_particles(&mut self) {
        self.particles.clear();
        self.dead.clear();
    }

    fn create_particle(&mut self, origin: &Actor) -> Particle {
        let rng = &mut self.rng;
        let x = random_in_range(rng, origin.x(), origin.x() + origin.width());
        let y = random_in_range(rng, origin.y(), origin.y() + origin.height());
        let angle = random_in_range(rng, self.min_angle, self.max_angle);
        let speed = random_in_range(rng, self.min_velocity, self.max_velocity);
        let size = random_in_range(rng, self.min_size, self.max_size);

        let id = ParticleId(self.next_id);
        self.next_id += 1;

        let mut particle = Particle::new(
            id,
            self.particle_life,
            Vector::new(x, y),
            Vector::from_angle(angle).scale(speed),
            self.particle_acceleration,
        )
        .with_opacity(self.opacity);
        particle.fade = self.fade;
        particle.size = size;
        particle.color = self.particle_color;
        if let Some(focus) = self.focus {
            particle.focus = Some(focus.add(origin.pos));
            particle.focus_accel = self.focus_accel;
        }
        particle
    }

    /// Update every live particle, staging the ones that died.
    pub fn update_particles(&mut self, delta: f32) {
        for particle in &mut self.particles {
            if particle.update(delta) {
                self.dead.insert(particle.id);
            }
        }
    }

    /// Remove staged particles from the live list. Returns how many went.
    pub fn sweep_dead(&mut self) -> usize {
        if self.dead.is_empty() {
            return 0;
        }
        let before = self.particles.len();
        let dead = &self.dead;
        self.particles.retain(|p| !dead.contains(&p.id));
        self.dead.clear();
        before - self.particles.len()
    }

    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        for particle in &self.particles {
            particle.draw(surface);
        }
    }
}
