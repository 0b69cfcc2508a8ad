//! Named drawables of an actor.
//!
//! An actor may register any number of [`Drawable`]s under a name and select
//! one of them as current. Selecting the drawable that is already current
//! changes nothing; selecting another one rewinds it so its animation starts
//! from the first frame.

use std::fmt;

use bevy_ecs::prelude::Component;
use rustc_hash::FxHashMap;

use crate::error::{EngineError, Result};
use crate::render::Drawable;

#[derive(Component, Default)]
pub struct Drawings {
    frames: FxHashMap<String, Box<dyn Drawable>>,
    current: Option<String>,
}

impl fmt::Debug for Drawings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Drawings")
            .field("names", &self.frames.keys().collect::<Vec<_>>())
            .field("current", &self.current)
            .finish()
    }
}

impl Drawings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `drawable` under `name`, replacing any previous entry.
    ///
    /// The first drawable ever added becomes current.
    pub fn add_drawing(&mut self, name: impl Into<String>, drawable: Box<dyn Drawable>) {
        let name = name.into();
        if self.current.is_none() {
            self.current = Some(name.clone());
        }
        self.frames.insert(name, drawable);
    }

    /// Make `name` the current drawable.
    pub fn set_drawing(&mut self, name: &str) -> Result<()> {
        if self.current.as_deref() == Some(name) {
            return Ok(());
        }
        let drawable = self
            .frames
            .get_mut(name)
            .ok_or_else(|| EngineError::DrawingNotFound(name.to_string()))?;
        drawable.reset();
        self.current = Some(name.to_string());
        Ok(())
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn current(&self) -> Option<&dyn Drawable> {
        let name = self.current.as_ref()?;
        self.frames.get(name).map(|d| d.as_ref())
    }

    pub fn current_mut(&mut self) -> Option<&mut (dyn Drawable + 'static)> {
        let name = self.current.as_ref()?;
        self.frames.get_mut(name).map(|d| d.as_mut())
    }

    pub fn get(&self, name: &str) -> Option<&dyn Drawable> {
        self.frames.get(name).map(|d| d.as_ref())
    }

    /// Advance the current drawable's animation.
    pub fn tick(&mut self, delta: f32) {
        if let Some(drawable) = self.current_mut() {
            drawable.tick(delta);
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
