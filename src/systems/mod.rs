//! Engine systems.
//!
//! The frame is one exclusive traversal: [`scene::scene_update_system`]
//! walks the active scene and runs [`actor::update_actor`] on every actor,
//! which in turn calls into the collision, input and particle helpers.
//! Drawing is a separate read-only walk in [`render`].
//!
//! Submodules overview
//! - [`actor`] – the per-actor update sequence
//! - [`collision`] – scene-wide AABB pass, collision events and push-out
//! - [`input`] – key/click/mouse-up events from the frame input
//! - [`particleemitter`] – particle emission, aging and sweep
//! - [`render`] – scene drawing and the debug overlay
//! - [`scene`] – tree mutation, kill-queue sweep and the frame entry point
//! - [`time`] – advance simulation time

pub mod actor;
pub mod collision;
pub mod input;
pub mod particleemitter;
pub mod render;
pub mod scene;
pub mod time;
