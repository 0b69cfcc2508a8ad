//! ECS resources made available to systems.
//!
//! Long-lived data shared by the whole world rather than owned by one actor.
//!
//! Overview
//! - `activescene` – the scene whose children take part in collision scans
//! - `debugmode` – presence turns on the debug overlay
//! - `engineconfig` – INI-backed engine, window and headless-run settings
//! - `input` – keys held and pointer samples for the current frame
//! - `worldtime` – simulation time and delta (ms)
pub mod activescene;
pub mod debugmode;
pub mod engineconfig;
pub mod input;
pub mod worldtime;
