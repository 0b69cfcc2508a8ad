//! raylib-backed [`DrawSurface`].
//!
//! Transform state maps onto the rlgl matrix stack, so every primitive drawn
//! between `save` and `restore` is affected by the translate/rotate/scale
//! calls made in between.

use raylib::ffi;
use raylib::prelude::{RaylibDraw, Rectangle, Vector2};

use super::{Color, DrawSurface};
use crate::components::label::font_size;

/// Wraps an active raylib draw handle.
pub struct RaylibSurface<'a, D: RaylibDraw> {
    d: &'a mut D,
}

impl<'a, D: RaylibDraw> RaylibSurface<'a, D> {
    pub fn new(d: &'a mut D) -> Self {
        Self { d }
    }
}

impl<D: RaylibDraw> DrawSurface for RaylibSurface<'_, D> {
    fn save(&mut self) {
        // SAFETY: rlgl matrix calls are valid between BeginDrawing/EndDrawing,
        // which the borrowed draw handle guarantees.
        unsafe { ffi::rlPushMatrix() }
    }

    fn restore(&mut self) {
        unsafe { ffi::rlPopMatrix() }
    }

    fn translate(&mut self, x: f32, y: f32) {
        unsafe { ffi::rlTranslatef(x, y, 0.0) }
    }

    fn rotate(&mut self, radians: f32) {
        unsafe { ffi::rlRotatef(radians.to_degrees(), 0.0, 0.0, 1.0) }
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        unsafe { ffi::rlScalef(sx, sy, 1.0) }
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.d.draw_rectangle_v(
            Vector2::new(x, y),
            Vector2::new(width, height),
            raylib::prelude::Color::from(color),
        );
    }

    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.d.draw_rectangle_lines_ex(
            Rectangle::new(x, y, width, height),
            1.0,
            raylib::prelude::Color::from(color),
        );
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Color) {
        self.d.draw_circle_v(
            Vector2::new(x, y),
            radius,
            raylib::prelude::Color::from(color),
        );
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, font: &str, color: Color) {
        self.d.draw_text(
            text,
            x as i32,
            y as i32,
            font_size(font).round() as i32,
            raylib::prelude::Color::from(color),
        );
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Color) {
        self.d.draw_line_v(
            Vector2::new(x1, y1),
            Vector2::new(x2, y2),
            raylib::prelude::Color::from(color),
        );
    }
}
