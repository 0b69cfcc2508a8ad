//! Draw-command recorder.
//!
//! [`RecordingSurface`] implements [`DrawSurface`] by appending every call to
//! a command list. The headless runner uses it to produce frames without a
//! window; tests use it to assert on draw order and transforms.

use super::{Color, DrawSurface};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    Translate { x: f32, y: f32 },
    Rotate { radians: f32 },
    Scale { sx: f32, sy: f32 },
    FillRect { x: f32, y: f32, width: f32, height: f32, color: Color },
    StrokeRect { x: f32, y: f32, width: f32, height: f32, color: Color },
    FillCircle { x: f32, y: f32, radius: f32, color: Color },
    FillText { text: String, x: f32, y: f32, font: String, color: Color },
    Line { x1: f32, y1: f32, x2: f32, y2: f32, color: Color },
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
    depth: usize,
    max_depth: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.depth = 0;
    }

    /// Current save/restore nesting depth. Zero once a frame is balanced.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Deepest save nesting seen since creation.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Number of primitives (anything that is not a transform or stack op).
    pub fn primitive_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| {
                !matches!(
                    c,
                    DrawCommand::Save
                        | DrawCommand::Restore
                        | DrawCommand::Translate { .. }
                        | DrawCommand::Rotate { .. }
                        | DrawCommand::Scale { .. }
                )
            })
            .count()
    }
}

impl DrawSurface for RecordingSurface {
    fn save(&mut self) {
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.commands.push(DrawCommand::Translate { x, y });
    }

    fn rotate(&mut self, radians: f32) {
        self.commands.push(DrawCommand::Rotate { radians });
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.commands.push(DrawCommand::Scale { sx, sy });
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.commands.push(DrawCommand::FillRect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.commands.push(DrawCommand::StrokeRect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Color) {
        self.commands
            .push(DrawCommand::FillCircle { x, y, radius, color });
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, font: &str, color: Color) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            x,
            y,
            font: font.to_string(),
            color,
        });
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Color) {
        self.commands.push(DrawCommand::Line {
            x1,
            y1,
            x2,
            y2,
            color,
        });
    }
}
