//! The scene actors collide against.
//!
//! Collision scans run over the direct children of the scene named here,
//! whichever subtree the moving actor lives in.

use bevy_ecs::prelude::{Entity, Resource};

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveScene(pub Entity);
