//! Rendering collaborators
//!
//! The core draws through the `Surface` trait and looks up pre-rendered
//! bitmaps in a `SpriteCache`. Hosts provide the real surface; headless runs
//! use `NullSurface` and tests use `RecordingSurface`.

pub mod actors;
pub mod hud;

use std::collections::HashMap;

use glam::Vec2;

pub use actors::{render_actors, render_background, render_collision_radius};
pub use hud::{HudState, center_fill_text, render_overlay};

/// Linear RGBA, 0..1 per channel
pub type Color = [f32; 4];

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
    pub const BLACK: Color = [0.0, 0.0, 0.0, 1.0];
    pub const GRID: Color = [0.0, 30.0 / 255.0, 60.0 / 255.0, 1.0];
    pub const WORLD_EDGE: Color = [60.0 / 255.0, 128.0 / 255.0, 90.0 / 255.0, 1.0];
    pub const COLLISION_RADIUS: Color = [1.0, 0.0, 0.0, 1.0];
    pub const ENERGY_FRAME: Color = [128.0 / 255.0, 128.0 / 255.0, 50.0 / 255.0, 1.0];
    pub const ENERGY_FILL: Color = [1.0, 1.0, 150.0 / 255.0, 1.0];
    pub const DEBUG_TEXT: Color = [173.0 / 255.0, 216.0 / 255.0, 230.0 / 255.0, 1.0];
    pub const PLAYER: Color = [1.0, 1.0, 1.0, 1.0];
    pub const PLAYER_BULLET: Color = [1.0, 1.0, 0.6, 1.0];
    pub const ENEMY_BULLET: Color = [1.0, 0.3, 0.3, 1.0];
    pub const MINE: Color = [1.0, 0.0, 1.0, 1.0];
    pub const MULTIPLIER: Color = [1.0, 0.85, 0.2, 1.0];
}

/// Color from hue (degrees), saturation and lightness (0..1)
pub fn hsl(hue: f32, saturation: f32, lightness: f32) -> Color {
    let h = hue.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = lightness - c / 2.0;
    [r + m, g + m, b + m, 1.0]
}

/// Drawing primitives offered by the host. Coordinates are screen pixels.
pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    /// Push the drawing state (alpha, glow)
    fn save(&mut self);
    /// Pop the drawing state
    fn restore(&mut self);

    fn clear(&mut self);
    fn set_alpha(&mut self, alpha: f32);
    /// Shadow blur used for the vector glow; 0 disables it
    fn set_glow(&mut self, blur: f32);

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color);
    fn stroke_rect(&mut self, origin: Vec2, size: Vec2, color: Color, width: f32);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color, width: f32);
    /// Closed outline through `points`
    fn stroke_polygon(&mut self, points: &[Vec2], color: Color, width: f32);

    /// Text with its baseline-left corner at `pos`
    fn fill_text(&mut self, text: &str, pos: Vec2, size: f32, color: Color);
    fn measure_text(&self, text: &str, size: f32) -> f32;

    /// Blit a cached bitmap centered on `center`
    fn draw_sprite(&mut self, sprite: &SpriteHandle, center: Vec2);
}

/// Opaque reference to a pre-rendered bitmap
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteHandle {
    /// Host texture slot
    pub texture: u32,
    /// Bitmap side length in pixels
    pub size: f32,
}

/// Pre-rendered bitmaps grouped by id, each id holding frames of growing size
#[derive(Debug, Clone, Default)]
pub struct SpriteCache {
    images: HashMap<String, Vec<SpriteHandle>>,
}

impl SpriteCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the frame list for an id, replacing any previous one
    pub fn insert(&mut self, id: impl Into<String>, frames: Vec<SpriteHandle>) {
        self.images.insert(id.into(), frames);
    }

    pub fn frames(&self, id: &str) -> Option<&[SpriteHandle]> {
        self.images.get(id).map(Vec::as_slice)
    }

    /// One frame of an id, clamped to the last frame
    pub fn frame(&self, id: &str, index: usize) -> Option<&SpriteHandle> {
        let frames = self.frames(id)?;
        frames.get(index.min(frames.len().checked_sub(1)?))
    }

    /// Placeholder cache with every id the game looks up, `frames` sizes each
    pub fn with_ids<'a>(ids: impl IntoIterator<Item = &'a str>, frames: usize) -> Self {
        let mut cache = Self::new();
        let mut texture = 0;
        for id in ids {
            let list = (0..frames)
                .map(|i| {
                    texture += 1;
                    SpriteHandle {
                        texture,
                        size: 2.0 + i as f32 * 2.0,
                    }
                })
                .collect();
            cache.insert(id, list);
        }
        cache
    }
}

/// Surface that draws nothing; text is measured at a fixed advance
#[derive(Debug, Clone)]
pub struct NullSurface {
    pub width: f32,
    pub height: f32,
}

impl NullSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Surface for NullSurface {
    fn width(&self) -> f32 {
        self.width
    }
    fn height(&self) -> f32 {
        self.height
    }
    fn save(&mut self) {}
    fn restore(&mut self) {}
    fn clear(&mut self) {}
    fn set_alpha(&mut self, _alpha: f32) {}
    fn set_glow(&mut self, _blur: f32) {}
    fn fill_rect(&mut self, _origin: Vec2, _size: Vec2, _color: Color) {}
    fn stroke_rect(&mut self, _origin: Vec2, _size: Vec2, _color: Color, _width: f32) {}
    fn stroke_line(&mut self, _from: Vec2, _to: Vec2, _color: Color, _width: f32) {}
    fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: Color) {}
    fn stroke_circle(&mut self, _center: Vec2, _radius: f32, _color: Color, _width: f32) {}
    fn stroke_polygon(&mut self, _points: &[Vec2], _color: Color, _width: f32) {}
    fn fill_text(&mut self, _text: &str, _pos: Vec2, _size: f32, _color: Color) {}
    fn measure_text(&self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * 0.6
    }
    fn draw_sprite(&mut self, _sprite: &SpriteHandle, _center: Vec2) {}
}

/// A single recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Rect { origin: Vec2, size: Vec2, filled: bool },
    Line { from: Vec2, to: Vec2 },
    Circle { center: Vec2, radius: f32, filled: bool },
    Polygon { points: usize },
    Text { text: String, pos: Vec2 },
    Sprite { texture: u32, center: Vec2 },
}

/// Surface that remembers what was drawn, for inspecting frames
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    pub width: f32,
    pub height: f32,
    pub commands: Vec<DrawCommand>,
    pub alpha: f32,
    stack: Vec<(f32, f32)>,
    glow: f32,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
            alpha: 1.0,
            stack: Vec::new(),
            glow: 0.0,
        }
    }

    /// Every text drawn so far
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t == needle)
    }

    /// Save/restore calls are balanced
    pub fn is_balanced(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn reset(&mut self) {
        self.commands.clear();
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f32 {
        self.width
    }
    fn height(&self) -> f32 {
        self.height
    }
    fn save(&mut self) {
        self.stack.push((self.alpha, self.glow));
    }
    fn restore(&mut self) {
        if let Some((alpha, glow)) = self.stack.pop() {
            self.alpha = alpha;
            self.glow = glow;
        }
    }
    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }
    fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
    }
    fn set_glow(&mut self, blur: f32) {
        self.glow = blur;
    }
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, _color: Color) {
        self.commands.push(DrawCommand::Rect { origin, size, filled: true });
    }
    fn stroke_rect(&mut self, origin: Vec2, size: Vec2, _color: Color, _width: f32) {
        self.commands.push(DrawCommand::Rect { origin, size, filled: false });
    }
    fn stroke_line(&mut self, from: Vec2, to: Vec2, _color: Color, _width: f32) {
        self.commands.push(DrawCommand::Line { from, to });
    }
    fn fill_circle(&mut self, center: Vec2, radius: f32, _color: Color) {
        self.commands.push(DrawCommand::Circle { center, radius, filled: true });
    }
    fn stroke_circle(&mut self, center: Vec2, radius: f32, _color: Color, _width: f32) {
        self.commands.push(DrawCommand::Circle { center, radius, filled: false });
    }
    fn stroke_polygon(&mut self, points: &[Vec2], _color: Color, _width: f32) {
        self.commands.push(DrawCommand::Polygon { points: points.len() });
    }
    fn fill_text(&mut self, text: &str, pos: Vec2, _size: f32, _color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
        });
    }
    fn measure_text(&self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * 0.6
    }
    fn draw_sprite(&mut self, sprite: &SpriteHandle, center: Vec2) {
        self.commands.push(DrawCommand::Sprite {
            texture: sprite.texture,
            center,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sprite_frame_clamps_to_last() {
        let cache = SpriteCache::with_ids(["smudges"], 4);
        assert_eq!(cache.frames("smudges").map(<[_]>::len), Some(4));
        let last = cache.frame("smudges", 3).cloned();
        assert_eq!(cache.frame("smudges", 99).cloned(), last);
        assert!(cache.frame("missing", 0).is_none());
    }

    #[test]
    fn test_empty_frame_list_has_no_frame() {
        let mut cache = SpriteCache::new();
        cache.insert("empty", Vec::new());
        assert!(cache.frame("empty", 0).is_none());
    }

    #[test]
    fn test_hsl_primaries() {
        let red = hsl(0.0, 1.0, 0.5);
        assert!((red[0] - 1.0).abs() < 1e-5 && red[1].abs() < 1e-5 && red[2].abs() < 1e-5);
        let blue = hsl(240.0, 1.0, 0.5);
        assert!((blue[2] - 1.0).abs() < 1e-5 && blue[0].abs() < 1e-5);
    }

    #[test]
    fn test_recording_surface_save_restore() {
        let mut s = RecordingSurface::new(100.0, 100.0);
        s.save();
        s.set_alpha(0.5);
        s.restore();
        assert_eq!(s.alpha, 1.0);
        assert!(s.is_balanced());
    }
}
