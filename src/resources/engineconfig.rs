//! Engine configuration resource.
//!
//! Settings loaded from an INI file. Every value has a safe default, and
//! values missing from the file keep theirs.
//!
//! # Configuration File Format
//!
//! ```ini
//! [engine]
//! time_scale = 1.0
//! debug_draw = false
//!
//! [window]
//! width = 800
//! height = 600
//! target_fps = 60
//!
//! [run]
//! frames = 600
//! delta_ms = 16
//! ```

use bevy_ecs::prelude::Resource;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::error::{EngineError, Result};

/// Default safe values for startup
const DEFAULT_TIME_SCALE: f32 = 1.0;
const DEFAULT_DEBUG_DRAW: bool = false;
const DEFAULT_WINDOW_WIDTH: u32 = 800;
const DEFAULT_WINDOW_HEIGHT: u32 = 600;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_FRAMES: u32 = 600;
const DEFAULT_DELTA_MS: f32 = 16.0;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Multiplier applied to every frame delta.
    pub time_scale: f32,
    /// Start with the debug overlay on.
    pub debug_draw: bool,
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    /// Frames simulated by a headless run.
    pub frames: u32,
    /// Fixed frame step of a headless run, in ms.
    pub delta_ms: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            time_scale: DEFAULT_TIME_SCALE,
            debug_draw: DEFAULT_DEBUG_DRAW,
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            frames: DEFAULT_FRAMES,
            delta_ms: DEFAULT_DELTA_MS,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current values. Fails if the file cannot
    /// be read or parsed.
    pub fn load_from_file(&mut self) -> Result<()> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| EngineError::Config(format!("failed to load config file: {e}")))?;
        self.apply(&config);

        info!(
            "Loaded config: time_scale={}, debug_draw={}, {}x{} window, fps={}, run {} frames of {}ms",
            self.time_scale,
            self.debug_draw,
            self.window_width,
            self.window_height,
            self.target_fps,
            self.frames,
            self.delta_ms
        );

        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<()> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| EngineError::Config(format!("failed to parse config: {e}")))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        // [engine] section
        if let Some(scale) = config.getfloat("engine", "time_scale").ok().flatten() {
            self.time_scale = scale as f32;
        }
        if let Some(debug) = config.getbool("engine", "debug_draw").ok().flatten() {
            self.debug_draw = debug;
        }

        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }

        // [run] section
        if let Some(frames) = config.getuint("run", "frames").ok().flatten() {
            self.frames = frames as u32;
        }
        if let Some(delta) = config.getfloat("run", "delta_ms").ok().flatten() {
            self.delta_ms = delta as f32;
        }
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<()> {
        let mut config = Ini::new();

        config.set("engine", "time_scale", Some(self.time_scale.to_string()));
        config.set("engine", "debug_draw", Some(self.debug_draw.to_string()));

        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));

        config.set("run", "frames", Some(self.frames.to_string()));
        config.set("run", "delta_ms", Some(self.delta_ms.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| EngineError::Config(format!("failed to save config file: {e}")))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }

    /// Milliseconds per frame at the target frame rate.
    pub fn frame_budget_ms(&self) -> f32 {
        if self.target_fps == 0 {
            return self.delta_ms;
        }
        1000.0 / self.target_fps as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::new();
        assert_eq!(config.time_scale, 1.0);
        assert!(!config.debug_draw);
        assert_eq!(config.window_size(), (800, 600));
        assert_eq!(config.target_fps, 60);
        assert_eq!(config.frames, 600);
        assert_eq!(config.delta_ms, 16.0);
    }

    #[test]
    fn test_partial_ini_keeps_defaults() {
        let mut config = EngineConfig::new();
        config
            .load_from_str("[engine]\ntime_scale = 0.5\n\n[run]\nframes = 10\n")
            .unwrap();
        assert_eq!(config.time_scale, 0.5);
        assert_eq!(config.frames, 10);
        assert_eq!(config.delta_ms, 16.0);
        assert_eq!(config.window_size(), (800, 600));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let mut config = EngineConfig::with_path("/nonexistent/stagecraft/config.ini");
        match config.load_from_file() {
            Err(EngineError::Config(_)) => {}
            other => panic!("expected config error, got {other:?}"),
        }
        assert_eq!(config.frames, 600);
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("stagecraft-{}.ini", std::process::id()));
        let mut config = EngineConfig::with_path(&path);
        config.debug_draw = true;
        config.window_width = 320;
        config.delta_ms = 20.0;
        config.save_to_file().unwrap();

        let mut loaded = EngineConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        assert!(loaded.debug_draw);
        assert_eq!(loaded.window_width, 320);
        assert_eq!(loaded.delta_ms, 20.0);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_frame_budget() {
        let mut config = EngineConfig::new();
        config.target_fps = 50;
        assert_eq!(config.frame_budget_ms(), 20.0);
    }
}
