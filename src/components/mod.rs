//! ECS components for actors and scenes.
//!
//! Every actor entity carries the same core set ([`ActorBundle`]): the
//! [`actor::Actor`] record, an [`actions::ActionQueue`], an
//! [`eventdispatcher::EventDispatcher`], its own [`scenenode::SceneNode`] and
//! a [`drawings::Drawings`] table. Facet components add behaviour on top.
//!
//! Submodules overview:
//! - [`actions`] – queued motion and animation commands
//! - [`actor`] – transform, kinematics, flags and box geometry
//! - [`drawings`] – named drawables and the current selection
//! - [`eventdispatcher`] – per-actor deferred publish/subscribe
//! - [`label`] – text facet
//! - [`particleemitter`] – particle source facet
//! - [`scenenode`] – ordered children, kill queue, parent link and scene marker
//!
//! [`ActorBundle`]: crate::bundles::ActorBundle

pub mod actions;
pub mod actor;
pub mod drawings;
pub mod eventdispatcher;
pub mod label;
pub mod particleemitter;
pub mod scenenode;
