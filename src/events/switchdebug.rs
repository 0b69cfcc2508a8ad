//! Debug overlay toggle.
//!
//! While the [`DebugMode`] resource exists, a frame's draw pass is followed by
//! the collision-box overlay: a green outline per actor, and the particle
//! count and focus marker for emitters. Triggering [`SwitchDebugEvent`] adds
//! or removes the resource. The raylib window loop triggers it on F1 through
//! [`Engine::toggle_debug`](crate::engine::Engine::toggle_debug).

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;

use crate::resources::debugmode::DebugMode;

#[derive(Event, Debug, Clone, Copy)]
pub struct SwitchDebugEvent {}

/// Flips the collision-box overlay on or off.
pub fn switch_debug_observer(
    _trigger: On<SwitchDebugEvent>,
    mut commands: Commands,
    overlay: Option<Res<DebugMode>>,
) {
    match overlay {
        Some(_) => {
            commands.remove_resource::<DebugMode>();
            log::info!("Collision overlay off");
        }
        None => {
            commands.insert_resource(DebugMode {});
            log::info!("Collision overlay on");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_flips_overlay() {
        let mut world = World::new();
        world.spawn(Observer::new(switch_debug_observer));

        world.trigger(SwitchDebugEvent {});
        world.flush();
        assert!(world.contains_resource::<DebugMode>());

        world.trigger(SwitchDebugEvent {});
        world.flush();
        assert!(!world.contains_resource::<DebugMode>());
    }
}
