//! Title screen: warp starfield behind a rotation of fading info panels

use glam::Vec2;
use rand::Rng;

use super::SceneContext;
use crate::pad_score;
use crate::platform::{Key, KeyResponse};
use crate::renderer::{Surface, center_fill_text, colors, hud::font_size, hsl};
use crate::sim::world::World;

const STARFIELD_SIZE: usize = 100;
/// Frames each panel stays up
const SCENE_LENGTH: u32 = 500;
/// Frames spent fading a panel in or out
const SCENE_FADE: u32 = 100;
const PANEL_COUNT: usize = 3;

/// Depth a star starts at
const STAR_MAX_Z: f32 = 15.0;
const STAR_SPEED: f32 = 0.1;
/// Hue rotation per frame
const STAR_CYCLE_STEP: f32 = 0.05;

/// One star of the warp field. `x`/`y` are pre-scaled by depth so the
/// perspective divide spreads them out as they approach.
#[derive(Debug, Clone)]
struct Star {
    x: f32,
    y: f32,
    z: f32,
    /// Last projected position, zero before the first frame
    prev: Vec2,
    cycle: f32,
}

impl Star {
    fn new(width: f32, height: f32, rng: &mut impl Rng) -> Self {
        let mut star = Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            prev: Vec2::ZERO,
            cycle: 0.0,
        };
        star.reset(width, height, rng);
        star
    }

    fn reset(&mut self, width: f32, height: f32, rng: &mut impl Rng) {
        self.x = (rng.random::<f32>() * width - width * 0.5) * STAR_MAX_Z;
        self.y = (rng.random::<f32>() * height - height * 0.5) * STAR_MAX_Z;
        self.z = STAR_MAX_Z;
        self.prev = Vec2::ZERO;
    }

    /// Draw a streak from the previous projection and move closer
    fn update(&mut self, surface: &mut dyn Surface, index: usize, rng: &mut impl Rng) {
        let (w, h) = (surface.width(), surface.height());
        let center = Vec2::new(w, h) * 0.5;
        let projected = Vec2::new(self.x / self.z, self.y / self.z);
        if self.prev.x != 0.0 {
            let width = (1.0 / self.z + 1.0) * 2.0;
            let color = hsl((self.cycle * index as f32) % 360.0, 0.9, 0.75);
            surface.stroke_line(projected + center, self.prev + center, color, width);
        }
        self.prev = projected;
        self.z -= STAR_SPEED;
        if self.z < STAR_SPEED || self.prev.x > w || self.prev.y > h {
            self.reset(w, h, rng);
        }
        self.cycle += STAR_CYCLE_STEP;
    }
}

/// Attractor scene record
pub struct AttractorScene {
    world: World,
    stars: Vec<Star>,
    start: bool,
    /// Brightness of the pulsing start prompt
    fade_rgb: f32,
    fade_increment: f32,
    panel: usize,
    panel_frame: u32,
}

impl AttractorScene {
    pub fn new(world: World, rng: &mut impl Rng) -> Self {
        let stars = (0..STARFIELD_SIZE)
            .map(|_| Star::new(world.render_width, world.render_height, rng))
            .collect();
        Self {
            world,
            stars,
            start: false,
            fade_rgb: 0.0,
            fade_increment: 0.01,
            panel: 0,
            panel_frame: 0,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.start
    }

    /// Index of the info panel on show
    pub fn panel(&self) -> usize {
        self.panel
    }

    /// Panel opacity for the current frame: ramps up over the first
    /// `SCENE_FADE` frames and down over the last
    pub fn panel_alpha(&self) -> f32 {
        if self.panel_frame < SCENE_FADE {
            1.0 - (SCENE_FADE - self.panel_frame) as f32 / SCENE_FADE as f32
        } else if self.panel_frame >= SCENE_LENGTH - SCENE_FADE {
            (SCENE_LENGTH - self.panel_frame) as f32 / SCENE_FADE as f32
        } else {
            1.0
        }
    }

    pub fn key_down(&mut self, key: Key) -> KeyResponse {
        match key {
            Key::Space => {
                self.start = true;
                KeyResponse::Handled
            }
            Key::Escape => KeyResponse::Pause,
            _ => KeyResponse::Ignored,
        }
    }

    pub fn pointer_down(&mut self) {
        self.start = true;
    }

    pub fn render(&mut self, ctx: &mut SceneContext, surface: &mut dyn Surface) {
        let (w, h) = (surface.width(), surface.height());

        // Translucent black leaves trails behind the stars
        surface.save();
        surface.set_glow(0.0);
        surface.set_alpha(0.333);
        surface.fill_rect(Vec2::ZERO, Vec2::new(w, h), colors::BLACK);
        for (i, star) in self.stars.iter_mut().enumerate() {
            star.update(surface, i, &mut ctx.game.rng);
        }
        surface.restore();

        self.panel_frame += 1;
        if self.panel_frame == SCENE_LENGTH {
            self.panel = (self.panel + 1) % PANEL_COUNT;
            self.panel_frame = 0;
        }

        surface.save();
        surface.set_alpha(self.panel_alpha());
        match self.panel {
            0 => self.render_welcome(surface),
            1 => self.render_info(surface),
            _ => self.render_scores(surface, ctx.game.highscore),
        }
        surface.restore();
    }

    fn render_welcome(&mut self, surface: &mut dyn Surface) {
        let scale = self.world.scale;
        let h = surface.height();
        center_fill_text(
            surface,
            "Arena5",
            h * 0.5 - 24.0,
            font_size(scale, 48.0),
            colors::WHITE,
        );

        self.fade_rgb += self.fade_increment;
        if self.fade_rgb > 1.0 {
            self.fade_rgb = 1.0;
            self.fade_increment = -self.fade_increment;
        } else if self.fade_rgb < 0.0 {
            self.fade_rgb = 0.0;
            self.fade_increment = -self.fade_increment;
        }
        center_fill_text(
            surface,
            "Press SPACE to start",
            h * 0.5 + 12.0,
            font_size(scale, 18.0),
            [1.0, 1.0, 1.0, self.fade_rgb],
        );
    }

    fn render_info(&self, surface: &mut dyn Surface) {
        let scale = self.world.scale;
        let w = surface.width();
        let mut y = font_size(scale, 150.0);
        surface.fill_text(
            "How to play...",
            Vec2::new(w * 0.2, y),
            font_size(scale, 24.0),
            colors::WHITE,
        );
        y += font_size(scale, 32.0);
        let lines = [
            "Use the WASD keys to move your ship.",
            "Use the cursor keys to aim your automatic weapons.",
            "Dodge the enemy ships that will try to destroy you!",
            "Pickup the score multipliers dropped by enemies.",
        ];
        let size = font_size(scale, 12.0);
        for line in lines {
            surface.fill_text(line, Vec2::new(w * 0.15, y), size, colors::WHITE);
            y += font_size(scale, 20.0);
        }
    }

    fn render_scores(&self, surface: &mut dyn Surface, highscore: u64) {
        let scale = self.world.scale;
        let size = font_size(scale, 24.0);
        let y = font_size(scale, 150.0);
        center_fill_text(surface, "High Score", y, size, colors::WHITE);
        center_fill_text(
            surface,
            &pad_score(highscore),
            y + font_size(scale, 64.0),
            size,
            colors::WHITE,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryStore;
    use crate::platform::FrameTime;
    use crate::renderer::{RecordingSurface, SpriteCache};
    use crate::settings::Settings;
    use crate::sim::state::GameState;

    fn render_frames(
        scene: &mut AttractorScene,
        game: &mut GameState,
        frames: u32,
    ) -> RecordingSurface {
        let settings = Settings::default();
        let mut store = MemoryStore::new();
        let sprites = SpriteCache::new();
        let mut surface = RecordingSurface::new(500.0, 500.0);
        for frame in 0..frames {
            surface.reset();
            let mut ctx = SceneContext {
                game: &mut *game,
                time: FrameTime::new(u64::from(frame), 0.0),
                settings: &settings,
                store: &mut store,
                sprites: &sprites,
                fps: None,
            };
            scene.render(&mut ctx, &mut surface);
        }
        surface
    }

    #[test]
    fn test_start_key_and_pointer_complete_the_scene() {
        let mut game = GameState::new(3, 0);
        let mut scene = AttractorScene::new(World::default(), &mut game.rng);
        assert!(!scene.is_complete());
        assert_eq!(scene.key_down(Key::A), KeyResponse::Ignored);
        assert_eq!(scene.key_down(Key::Escape), KeyResponse::Pause);
        assert_eq!(scene.key_down(Key::Space), KeyResponse::Handled);
        assert!(scene.is_complete());

        let mut scene = AttractorScene::new(World::default(), &mut game.rng);
        scene.pointer_down();
        assert!(scene.is_complete());
    }

    #[test]
    fn test_panels_rotate_and_fade() {
        let mut game = GameState::new(3, 1234);
        let mut scene = AttractorScene::new(World::default(), &mut game.rng);
        assert_eq!(scene.panel_alpha(), 0.0);

        let surface = render_frames(&mut scene, &mut game, 1);
        assert!(surface.has_text("Arena5"));
        assert!((scene.panel_alpha() - 0.01).abs() < 1e-6);

        render_frames(&mut scene, &mut game, 249);
        assert_eq!(scene.panel_alpha(), 1.0);

        // Fading out over the last frames of the panel
        render_frames(&mut scene, &mut game, 200);
        assert!((scene.panel_alpha() - 0.5).abs() < 1e-6);

        let surface = render_frames(&mut scene, &mut game, 50);
        assert_eq!(scene.panel(), 1);
        assert!(surface.has_text("How to play..."));

        let surface = render_frames(&mut scene, &mut game, 500);
        assert_eq!(scene.panel(), 2);
        assert!(surface.has_text("00001234"));

        render_frames(&mut scene, &mut game, 500);
        assert_eq!(scene.panel(), 0);
        assert!(surface.is_balanced());
    }

    #[test]
    fn test_stars_streak_after_first_frame() {
        let mut game = GameState::new(9, 0);
        let mut scene = AttractorScene::new(World::default(), &mut game.rng);
        let first = render_frames(&mut scene, &mut game, 1);
        let lines = |s: &RecordingSurface| {
            s.commands
                .iter()
                .filter(|c| matches!(c, crate::renderer::DrawCommand::Line { .. }))
                .count()
        };
        assert_eq!(lines(&first), 0);
        let second = render_frames(&mut scene, &mut game, 1);
        assert!(lines(&second) > 0);
    }
}
