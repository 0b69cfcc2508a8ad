//! Frame timing resource.
//!
//! Times are milliseconds. `delta` is the scaled time step of the frame being
//! simulated; `elapsed` accumulates the scaled deltas.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct WorldTime {
    pub elapsed: f32,
    pub delta: f32,
    pub time_scale: f32,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(time_scale: f32) -> Self {
        WorldTime {
            time_scale,
            ..Default::default()
        }
    }

    /// Start a new frame from a raw (unscaled) delta in ms.
    pub fn advance(&mut self, raw_delta: f32) {
        self.delta = raw_delta.max(0.0) * self.time_scale;
        self.elapsed += self.delta;
        self.frame_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_scales_delta() {
        let mut t = WorldTime::with_time_scale(0.5);
        t.advance(100.0);
        t.advance(20.0);
        assert_eq!(t.delta, 10.0);
        assert_eq!(t.elapsed, 60.0);
        assert_eq!(t.frame_count, 2);
    }

    #[test]
    fn test_negative_delta_is_clamped() {
        let mut t = WorldTime::default();
        t.advance(-5.0);
        assert_eq!(t.delta, 0.0);
        assert_eq!(t.frame_count, 1);
    }
}
