//! Text facet for actors.
//!
//! An actor carrying a [`Label`] draws its text instead of a drawable or the
//! fallback rectangle. Text is rendered with the actor color through the
//! surface's text call, or through a [`SpriteFont`] when one is set.

use std::fmt;

use bevy_ecs::prelude::Component;

use crate::render::SpriteFont;

/// Font used when none is given.
pub const DEFAULT_FONT: &str = "10px sans-serif";

#[derive(Component)]
pub struct Label {
    pub text: String,
    /// CSS-like font description, e.g. `"16px monospace"`.
    pub font: String,
    pub sprite_font: Option<Box<dyn SpriteFont>>,
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Label")
            .field("text", &self.text)
            .field("font", &self.font)
            .field("sprite_font", &self.sprite_font.is_some())
            .finish()
    }
}

impl Default for Label {
    fn default() -> Self {
        Self {
            text: String::new(),
            font: DEFAULT_FONT.to_string(),
            sprite_font: None,
        }
    }
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = font.into();
        self
    }

    pub fn with_sprite_font(mut self, sprite_font: Box<dyn SpriteFont>) -> Self {
        self.sprite_font = Some(sprite_font);
        self
    }

    /// Pixel size parsed from the font description, 10 when absent.
    pub fn font_size(&self) -> f32 {
        font_size(&self.font)
    }
}

/// Leading `<n>px` of a font description, 10 when it cannot be parsed.
pub fn font_size(font: &str) -> f32 {
    font.split_whitespace()
        .find_map(|part| part.strip_suffix("px"))
        .and_then(|n| n.parse::<f32>().ok())
        .unwrap_or(10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_font() {
        let label = Label::new("score");
        assert_eq!(label.text, "score");
        assert_eq!(label.font, DEFAULT_FONT);
        assert!(label.sprite_font.is_none());
        assert_eq!(label.font_size(), 10.0);
    }

    #[test]
    fn test_font_size_parsing() {
        assert_eq!(font_size("24px monospace"), 24.0);
        assert_eq!(font_size("bold 12.5px serif"), 12.5);
        assert_eq!(font_size("serif"), 10.0);
        assert_eq!(font_size("px"), 10.0);
    }
}
