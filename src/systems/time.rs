//! Time update system.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per frame, applying `time_scale` to the provided delta.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Advance the `WorldTime` resource by one frame.
///
/// `dt` is the unscaled frame delta in milliseconds. The scaled value ends up
/// in `delta`, which the scene update reads.
pub fn update_world_time(world: &mut World, dt: f32) {
    world.get_resource_or_init::<WorldTime>().advance(dt);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialises_missing_resource() {
        let mut world = World::new();
        update_world_time(&mut world, 16.0);
        let time = world.resource::<WorldTime>();
        assert_eq!(time.delta, 16.0);
        assert_eq!(time.frame_count, 1);
    }
}
