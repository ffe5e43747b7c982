//! End-of-game banner. Persists a new high score on its first frame.

use super::{Interval, SceneContext};
use crate::highscores::save_high_score;
use crate::renderer::{Surface, center_fill_text, colors, hud::font_size};

/// Frames the banner is drawn. The 150th frame only completes it.
const BANNER_FRAMES: u32 = 149;

pub struct GameOverScene {
    pub interval: Interval,
    /// View scale for text sizing
    scale: f32,
}

impl GameOverScene {
    pub fn new(scale: f32) -> Self {
        Self {
            interval: Interval::new("GAME OVER", BANNER_FRAMES),
            scale,
        }
    }

    pub fn render_interval(&mut self, ctx: &mut SceneContext, surface: &mut dyn Surface) {
        let first = self.interval.frame_counter == 0;
        if !self.interval.advance() {
            return;
        }
        let game = &*ctx.game;
        let new_high = game.is_new_high_score();
        if first && new_high {
            if let Err(e) = save_high_score(&mut *ctx.store, game.lastscore) {
                log::warn!("Could not save high score {}: {e}", game.lastscore);
            }
        }

        let scale = self.scale;
        let y = surface.height() * 0.5 - 9.0;
        surface.clear();
        center_fill_text(
            surface,
            self.interval.label,
            y,
            font_size(scale, 18.0),
            colors::WHITE,
        );
        let size = font_size(scale, 14.0);
        center_fill_text(
            surface,
            &format!("Score: {}", game.lastscore),
            y + 32.0,
            size,
            colors::WHITE,
        );
        if new_high {
            center_fill_text(surface, "New High Score!", y + 64.0, size, colors::WHITE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::{HighScoreStore, MemoryStore, SCORE_KEY};
    use crate::platform::FrameTime;
    use crate::renderer::{RecordingSurface, SpriteCache};
    use crate::settings::Settings;
    use crate::sim::state::GameState;

    fn play(
        game: &mut GameState,
        store: &mut MemoryStore,
        frames: u32,
    ) -> (GameOverScene, RecordingSurface) {
        let settings = Settings::default();
        let sprites = SpriteCache::new();
        let mut scene = GameOverScene::new(0.5);
        let mut surface = RecordingSurface::new(500.0, 500.0);
        for frame in 0..frames {
            surface.reset();
            let mut ctx = SceneContext {
                game: &mut *game,
                time: FrameTime::new(u64::from(frame), 0.0),
                settings: &settings,
                store: &mut *store,
                sprites: &sprites,
                fps: None,
            };
            scene.render_interval(&mut ctx, &mut surface);
        }
        (scene, surface)
    }

    #[test]
    fn test_new_high_score_saved_and_shown() {
        let mut game = GameState::new(1, 100);
        game.add_score(250);
        game.lives = 0;
        assert!(game.check_game_over(0));
        let mut store = MemoryStore::new();

        let (scene, surface) = play(&mut game, &mut store, 1);
        assert!(surface.has_text("GAME OVER"));
        assert!(surface.has_text("Score: 250"));
        assert!(surface.has_text("New High Score!"));
        assert!(!scene.interval.complete);
        assert_eq!(store.get(SCORE_KEY).unwrap().as_deref(), Some("250"));
    }

    #[test]
    fn test_lower_score_not_saved() {
        let mut game = GameState::new(1, 900);
        game.add_score(250);
        game.lives = 0;
        assert!(game.check_game_over(0));
        let mut store = MemoryStore::new();

        let (_, surface) = play(&mut game, &mut store, 1);
        assert!(surface.has_text("Score: 250"));
        assert!(!surface.has_text("New High Score!"));
        assert_eq!(store.get(SCORE_KEY).unwrap(), None);
    }

    #[test]
    fn test_banner_completes_on_frame_150() {
        let mut game = GameState::new(1, 0);
        let mut store = MemoryStore::new();
        let (scene, surface) = play(&mut game, &mut store, 149);
        assert!(!scene.interval.complete);
        assert!(surface.has_text("GAME OVER"));
        let (scene, surface) = play(&mut game, &mut store, 150);
        assert!(scene.interval.complete);
        assert!(surface.commands.is_empty());
    }
}
