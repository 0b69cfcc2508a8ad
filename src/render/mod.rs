//! Rendering boundary.
//!
//! The simulation never talks to a graphics API directly. Everything it draws
//! goes through [`DrawSurface`], an abstract 2D context with a save/restore
//! transform stack, and through [`Drawable`] objects (sprites, animations)
//! that know how to paint themselves at an offset.
//!
//! Submodules:
//! - [`color`] – RGBA color value
//! - [`recording`] – a surface that records draw commands (headless runs, tests)
//! - `raylib_surface` – a raylib-backed surface (feature `raylib`)

pub mod color;
#[cfg(feature = "raylib")]
pub mod raylib_surface;
pub mod recording;

pub use color::Color;

/// Abstract 2D drawing context.
///
/// Transform calls compose onto the current transform; `save`/`restore`
/// push and pop the transform state.
pub trait DrawSurface {
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f32, y: f32);
    fn rotate(&mut self, radians: f32);
    fn scale(&mut self, sx: f32, sy: f32);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);
    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Color);
    fn fill_text(&mut self, text: &str, x: f32, y: f32, font: &str, color: Color);
    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Color);
}

/// Something that paints itself: a sprite, an animation, a shape.
pub trait Drawable: Send + Sync {
    /// Paint at the given offset in the current transform.
    fn draw(&self, surface: &mut dyn DrawSurface, x: f32, y: f32);

    /// Rewind any internal animation cursor.
    fn reset(&mut self);

    fn width(&self) -> f32;

    fn height(&self) -> f32;

    fn scale(&self) -> f32 {
        1.0
    }

    /// Advance internal animation state by `delta_ms`.
    fn tick(&mut self, _delta_ms: f32) {}
}

/// Bitmap font able to render a string.
pub trait SpriteFont: Send + Sync {
    fn draw_text(&self, surface: &mut dyn DrawSurface, x: f32, y: f32, text: &str);
}

/// Solid rectangle drawable.
#[derive(Debug, Clone, Copy)]
pub struct RectShape {
    pub width: f32,
    pub height: f32,
    pub color: Color,
}

impl RectShape {
    pub fn new(width: f32, height: f32, color: Color) -> Self {
        Self {
            width,
            height,
            color,
        }
    }
}

impl Drawable for RectShape {
    fn draw(&self, surface: &mut dyn DrawSurface, x: f32, y: f32) {
        surface.fill_rect(x, y, self.width, self.height, self.color);
    }

    fn reset(&mut self) {}

    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }
}

/// Cycles through a list of frames at a fixed frame duration.
pub struct Flipbook {
    frames: Vec<Box<dyn Drawable>>,
    frame_ms: f32,
    elapsed: f32,
    cursor: usize,
    pub looping: bool,
}

impl Flipbook {
    pub fn new(frames: Vec<Box<dyn Drawable>>, frame_ms: f32) -> Self {
        Self {
            frames,
            frame_ms,
            elapsed: 0.0,
            cursor: 0,
            looping: true,
        }
    }

    /// Index of the frame currently shown.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl Drawable for Flipbook {
    fn draw(&self, surface: &mut dyn DrawSurface, x: f32, y: f32) {
        if let Some(frame) = self.frames.get(self.cursor) {
            frame.draw(surface, x, y);
        }
    }

    fn reset(&mut self) {
        self.cursor = 0;
        self.elapsed = 0.0;
    }

    fn width(&self) -> f32 {
        self.frames.first().map_or(0.0, |f| f.width())
    }

    fn height(&self) -> f32 {
        self.frames.first().map_or(0.0, |f| f.height())
    }

    fn tick(&mut self, delta_ms: f32) {
        if self.frames.len() < 2 || self.frame_ms <= 0.0 {
            return;
        }
        self.elapsed += delta_ms;
        while self.elapsed >= self.frame_ms {
            self.elapsed -= self.frame_ms;
            if self.cursor + 1 < self.frames.len() {
                self.cursor += 1;
            } else if self.looping {
                self.cursor = 0;
            } else {
                self.elapsed = 0.0;
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flipbook(frames: usize, frame_ms: f32) -> Flipbook {
        let frames: Vec<Box<dyn Drawable>> = (0..frames)
            .map(|_| Box::new(RectShape::new(4.0, 4.0, Color::WHITE)) as Box<dyn Drawable>)
            .collect();
        Flipbook::new(frames, frame_ms)
    }

    #[test]
    fn test_flipbook_advances_and_loops() {
        let mut book = flipbook(3, 100.0);
        book.tick(100.0);
        assert_eq!(book.cursor(), 1);
        book.tick(250.0);
        assert_eq!(book.cursor(), 0);
    }

    #[test]
    fn test_flipbook_reset_rewinds() {
        let mut book = flipbook(3, 100.0);
        book.tick(150.0);
        book.reset();
        assert_eq!(book.cursor(), 0);
        book.tick(60.0);
        assert_eq!(book.cursor(), 0);
    }

    #[test]
    fn test_flipbook_without_loop_stops_on_last() {
        let mut book = flipbook(2, 10.0);
        book.looping = false;
        book.tick(100.0);
        assert_eq!(book.cursor(), 1);
    }
}
