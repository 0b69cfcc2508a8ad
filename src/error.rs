//! Engine error type.
//!
//! Usage warnings (killing an unattached actor, removing a child twice) are
//! logged and ignored. Only contract violations the caller must handle are
//! reported through [`EngineError`].

use bevy_ecs::prelude::Entity;
use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("no drawing registered under key '{0}'")]
    DrawingNotFound(String),

    #[error("entity {0:?} is not an actor")]
    ActorNotFound(Entity),

    #[error("no scene named '{0}'")]
    SceneNotFound(String),

    #[error("config error: {0}")]
    Config(String),
}
