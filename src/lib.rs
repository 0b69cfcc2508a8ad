//! Stagecraft: a 2D actor engine core on `bevy_ecs`.
//!
//! Actors are entities carrying a transform, kinematics, an action queue, an
//! event mailbox and their own child list. A frame walks the active scene
//! tree once: every actor runs its actions, integrates, collides against the
//! scene and turns input into events. Drawing walks the same tree against an
//! abstract [`render::DrawSurface`].
//!
//! This module exposes the engine's components, resources, systems and
//! events for use in integration tests and as a reusable library.

pub mod bundles;
pub mod components;
pub mod demo;
pub mod engine;
pub mod error;
pub mod events;
pub mod handle;
pub mod math;
pub mod render;
pub mod resources;
pub mod systems;
