//! Scene drawing.
//!
//! Drawing is a read-only walk over the same tree the update walks, in the
//! same order. Every actor draws inside its own transform: the surface is
//! saved, translated to the actor position, rotated, then scaled, and
//! restored once the actor and its children are done.
//!
//! What an actor paints, unless it is invisible:
//!
//! | Actor | Painted as |
//! |-------|-----------|
//! | with a [`Label`] | its text (sprite font if set) |
//! | with a current drawable | the drawable, optionally centered on the box |
//! | anything else | a filled box in the actor color |
//!
//! Particle emitters paint only their particles, in the parent's
//! coordinates, since particle positions are stored in that space.

use bevy_ecs::prelude::{Entity, World};

use crate::components::actor::Actor;
use crate::components::drawings::Drawings;
use crate::components::label::{DEFAULT_FONT, Label};
use crate::components::particleemitter::ParticleEmitter;
use crate::components::scenenode::SceneNode;
use crate::render::{Color, DrawSurface};
use crate::resources::activescene::ActiveScene;
use crate::resources::debugmode::DebugMode;

const DEBUG_BOX_COLOR: Color = Color::GREEN;
const DEBUG_TEXT_COLOR: Color = Color::YELLOW;

/// Draw the active scene, plus the debug overlay when [`DebugMode`] is
/// present.
pub fn draw_frame(world: &World, surface: &mut dyn DrawSurface) {
    let Some(ActiveScene(scene)) = world.get_resource::<ActiveScene>().copied() else {
        return;
    };
    draw_scene(world, scene, surface);
    if world.contains_resource::<DebugMode>() {
        debug_draw_scene(world, scene, surface);
    }
}

/// Draw every child of `node` in insertion order.
pub fn draw_scene(world: &World, node: Entity, surface: &mut dyn DrawSurface) {
    let Some(scene_node) = world.get::<SceneNode>(node) else {
        return;
    };
    for &child in scene_node.children() {
        draw_actor(world, child, surface);
    }
}

pub fn draw_actor(world: &World, entity: Entity, surface: &mut dyn DrawSurface) {
    let Some(actor) = world.get::<Actor>(entity) else {
        return;
    };
    if let Some(emitter) = world.get::<ParticleEmitter>(entity) {
        emitter.draw(surface);
        return;
    }

    surface.save();
    surface.translate(actor.pos.x, actor.pos.y);
    surface.rotate(actor.rotation);
    surface.scale(actor.scale, actor.scale);

    if !actor.invisible {
        if let Some(label) = world.get::<Label>(entity) {
            match &label.sprite_font {
                Some(font) => font.draw_text(surface, 0.0, 0.0, &label.text),
                None => surface.fill_text(&label.text, 0.0, 0.0, &label.font, actor.color),
            }
        } else if let Some(drawable) = world.get::<Drawings>(entity).and_then(|d| d.current()) {
            let mut x_diff = 0.0;
            let mut y_diff = 0.0;
            if actor.center_drawing_x {
                x_diff = (drawable.width() * drawable.scale() - actor.width) / 2.0;
            }
            if actor.center_drawing_y {
                y_diff = (drawable.height() * drawable.scale() - actor.height) / 2.0;
            }
            drawable.draw(surface, -x_diff, -y_diff);
        } else {
            surface.fill_rect(0.0, 0.0, actor.width, actor.height, actor.color);
        }
    }

    draw_scene(world, entity, surface);
    surface.restore();
}

/// Outline every actor under `node`. Rotation is left out: boxes are
/// axis-aligned for collision purposes.
pub fn debug_draw_scene(world: &World, node: Entity, surface: &mut dyn DrawSurface) {
    let Some(scene_node) = world.get::<SceneNode>(node) else {
        return;
    };
    for &child in scene_node.children() {
        debug_draw_actor(world, child, surface);
    }
}

pub fn debug_draw_actor(world: &World, entity: Entity, surface: &mut dyn DrawSurface) {
    let Some(actor) = world.get::<Actor>(entity) else {
        return;
    };

    surface.save();
    surface.translate(actor.pos.x, actor.pos.y);
    surface.scale(actor.scale, actor.scale);
    debug_draw_scene(world, entity, surface);
    surface.stroke_rect(0.0, 0.0, actor.width, actor.height, DEBUG_BOX_COLOR);
    surface.restore();

    if let Some(emitter) = world.get::<ParticleEmitter>(entity) {
        surface.fill_text(
            &format!("Particles: {}", emitter.particle_count()),
            actor.pos.x,
            actor.pos.y + 20.0,
            DEFAULT_FONT,
            DEBUG_TEXT_COLOR,
        );
        if let Some(focus) = emitter.focus {
            let fx = focus.x + actor.pos.x;
            let fy = focus.y + actor.pos.y;
            let center = actor.center();
            surface.fill_rect(fx, fy, 3.0, 3.0, DEBUG_TEXT_COLOR);
            surface.draw_line(fx, fy, center.x, center.y, DEBUG_TEXT_COLOR);
            surface.fill_text("Focus", fx, fy, DEFAULT_FONT, DEBUG_TEXT_COLOR);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundles::ActorBundle;
    use crate::render::RectShape;
    use crate::render::recording::{DrawCommand, RecordingSurface};
    use crate::systems::scene::{add_child, spawn_scene};

    fn setup() -> (World, Entity) {
        let mut world = World::new();
        let scene = spawn_scene(&mut world, "main");
        world.insert_resource(ActiveScene(scene));
        (world, scene)
    }

    #[test]
    fn test_fallback_rect_inside_transform() {
        let (mut world, scene) = setup();
        let mut actor = Actor::new(5.0, 6.0, 10.0, 20.0).with_color(Color::RED);
        actor.rotation = 0.5;
        actor.scale = 2.0;
        let a = world.spawn(ActorBundle::new(actor)).id();
        add_child(&mut world, scene, a);

        let mut surface = RecordingSurface::new();
        draw_frame(&world, &mut surface);
        assert_eq!(
            surface.commands,
            vec![
                DrawCommand::Save,
                DrawCommand::Translate { x: 5.0, y: 6.0 },
                DrawCommand::Rotate { radians: 0.5 },
                DrawCommand::Scale { sx: 2.0, sy: 2.0 },
                DrawCommand::FillRect {
                    x: 0.0,
                    y: 0.0,
                    width: 10.0,
                    height: 20.0,
                    color: Color::RED
                },
                DrawCommand::Restore,
            ]
        );
    }

    #[test]
    fn test_invisible_actor_still_draws_children() {
        let (mut world, scene) = setup();
        let mut parent = Actor::new(0.0, 0.0, 10.0, 10.0);
        parent.invisible = true;
        let p = world.spawn(ActorBundle::new(parent)).id();
        let c = world
            .spawn(ActorBundle::new(Actor::new(1.0, 1.0, 2.0, 2.0)))
            .id();
        add_child(&mut world, scene, p);
        add_child(&mut world, p, c);

        let mut surface = RecordingSurface::new();
        draw_frame(&world, &mut surface);
        let rects: Vec<_> = surface
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillRect { .. }))
            .collect();
        assert_eq!(rects.len(), 1);
        assert_eq!(surface.depth(), 0);
        assert_eq!(surface.max_depth(), 2);
    }

    #[test]
    fn test_centered_drawable_offset() {
        let (mut world, scene) = setup();
        let mut actor = Actor::new(0.0, 0.0, 10.0, 10.0);
        actor.set_center_drawing(true);
        let mut bundle = ActorBundle::new(actor);
        bundle
            .drawings
            .add_drawing("big", Box::new(RectShape::new(20.0, 30.0, Color::BLUE)));
        let a = world.spawn(bundle).id();
        add_child(&mut world, scene, a);

        let mut surface = RecordingSurface::new();
        draw_frame(&world, &mut surface);
        assert!(surface.commands.contains(&DrawCommand::FillRect {
            x: -5.0,
            y: -10.0,
            width: 20.0,
            height: 30.0,
            color: Color::BLUE
        }));
    }

    #[test]
    fn test_label_draws_text() {
        let (mut world, scene) = setup();
        let a = world
            .spawn((
                ActorBundle::new(Actor::new(3.0, 4.0, 0.0, 0.0).with_color(Color::WHITE)),
                Label::new("hello"),
            ))
            .id();
        add_child(&mut world, scene, a);

        let mut surface = RecordingSurface::new();
        draw_frame(&world, &mut surface);
        assert!(surface.commands.contains(&DrawCommand::FillText {
            text: "hello".to_string(),
            x: 0.0,
            y: 0.0,
            font: DEFAULT_FONT.to_string(),
            color: Color::WHITE
        }));
    }

    #[test]
    fn test_debug_overlay_only_with_debug_mode() {
        let (mut world, scene) = setup();
        let a = world
            .spawn(ActorBundle::new(Actor::new(0.0, 0.0, 4.0, 4.0)))
            .id();
        add_child(&mut world, scene, a);

        let mut surface = RecordingSurface::new();
        draw_frame(&world, &mut surface);
        assert!(!surface
            .commands
            .iter()
            .any(|c| matches!(c, DrawCommand::StrokeRect { .. })));

        world.insert_resource(DebugMode {});
        surface.clear();
        draw_frame(&world, &mut surface);
        assert!(surface
            .commands
            .iter()
            .any(|c| matches!(c, DrawCommand::StrokeRect { .. })));
    }
}
