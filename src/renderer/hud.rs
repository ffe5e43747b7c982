//! Screen-space overlay: energy, score, multiplier and wave timer

use glam::Vec2;

use super::{Color, Surface, colors};
use crate::pad_score;
use crate::sim::state::GameState;
use crate::sim::wave::WaveDirector;

/// Text size in pixels for a nominal point size at the current view scale
#[inline]
pub fn font_size(scale: f32, points: f32) -> f32 {
    (points * scale * 2.0).floor()
}

/// Draw text horizontally centered on the surface at height `y`
pub fn center_fill_text(surface: &mut dyn Surface, text: &str, y: f32, size: f32, color: Color) {
    let width = surface.measure_text(text, size);
    let x = (surface.width() - width) * 0.5;
    surface.fill_text(text, Vec2::new(x, y), size, color);
}

/// Overlay state that lives across frames
#[derive(Debug, Clone, Default)]
pub struct HudState {
    /// Displayed score, easing toward the real score
    pub score_display: f64,
}

impl HudState {
    /// Move the displayed score a tenth of the way to `score`
    pub fn animate_score(&mut self, score: u64) -> u64 {
        let target = score as f64;
        self.score_display += (target - self.score_display) * 0.1;
        if self.score_display > target {
            self.score_display = target;
        }
        self.score_display.ceil() as u64
    }
}

/// Player information overlay
pub fn render_overlay(
    surface: &mut dyn Surface,
    scale: f32,
    game: &GameState,
    hud: &mut HudState,
    waves: &WaveDirector,
    now_ms: f64,
    fps: Option<u32>,
) {
    let width = surface.width();
    let height = surface.height();

    surface.save();
    surface.set_glow(0.0);

    // Energy bar, scaled from the player's maximum
    let ewidth = (100.0 * scale * 2.0).floor();
    let eheight = (4.0 * scale * 2.0).floor();
    surface.stroke_rect(
        Vec2::new(4.0, 4.0),
        Vec2::new(ewidth + 1.0, 4.0 + eheight),
        colors::ENERGY_FRAME,
        1.0,
    );
    let fill = game.player.energy / game.player.energy_max * ewidth;
    surface.fill_rect(
        Vec2::new(5.0, 5.0),
        Vec2::new(fill, 3.0 + eheight),
        colors::ENERGY_FILL,
    );

    let size = font_size(scale, 12.0);
    let y = size + 2.0;
    let shown = hud.animate_score(game.score);
    surface.fill_text(&pad_score(shown), Vec2::new(width * 0.3, y), size, colors::WHITE);
    surface.fill_text(
        &format!("HI: {}", pad_score(game.highscore)),
        Vec2::new(width * 0.5, y),
        size,
        colors::WHITE,
    );
    surface.fill_text(
        &format!("x{}", game.score_multiplier),
        Vec2::new(width * 0.8, y),
        size,
        colors::WHITE,
    );
    let timer = format!("{}/{}", waves.elapsed_secs(now_ms), waves.current().lifetime);
    surface.fill_text(&timer, Vec2::new(width * 0.9, y), size, colors::WHITE);

    if let Some(fps) = fps {
        let size = font_size(scale, 10.0);
        surface.fill_text(
            &format!("FPS: {fps}"),
            Vec2::new(0.0, height - 2.0),
            size,
            colors::DEBUG_TEXT,
        );
    }

    surface.restore();
}
