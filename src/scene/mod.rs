//! Scene state machine: Attractor -> Game -> GameOver -> Attractor
//!
//! `Arena` owns the process-lifetime game state and a single active scene
//! record. Each host tick runs the active scene's hooks in a fixed order and
//! then polls for a transition, replacing the record when one fires.

pub mod attractor;
pub mod game;
pub mod game_over;

pub use attractor::AttractorScene;
pub use game::GameScene;
pub use game_over::GameOverScene;

use crate::highscores::{HighScoreStore, load_high_score};
use crate::platform::{FpsCounter, FrameTime, Key, KeyResponse};
use crate::renderer::{SpriteCache, Surface};
use crate::settings::Settings;
use crate::sim::effect::{SPRITE_POINTS_DEFAULT, SPRITE_SMUDGES};
use crate::sim::enemy::EnemyParams;
use crate::sim::state::GameState;
use crate::sim::world::World;

/// Everything a scene hook may touch besides its own record
pub struct SceneContext<'a> {
    pub game: &'a mut GameState,
    pub time: FrameTime,
    pub settings: &'a Settings,
    pub store: &'a mut dyn HighScoreStore,
    pub sprites: &'a SpriteCache,
    /// Measured frame rate when the debug overlay wants it
    pub fps: Option<u32>,
}

/// Fixed-length banner shown before a scene's own hooks run
#[derive(Debug, Clone)]
pub struct Interval {
    pub label: &'static str,
    /// Frames shown so far
    pub frame_counter: u32,
    pub duration: u32,
    pub complete: bool,
}

impl Interval {
    pub fn new(label: &'static str, duration: u32) -> Self {
        Self {
            label,
            frame_counter: 0,
            duration,
            complete: false,
        }
    }

    pub fn reset(&mut self) {
        self.frame_counter = 0;
        self.complete = false;
    }

    /// Count one banner frame. Returns false, marking the banner complete,
    /// once it has shown for its full duration.
    pub fn advance(&mut self) -> bool {
        if self.frame_counter < self.duration {
            self.frame_counter += 1;
            true
        } else {
            self.complete = true;
            false
        }
    }
}

/// The active scene record
pub enum Scene {
    Attractor(AttractorScene),
    Game(Box<GameScene>),
    GameOver(GameOverScene),
}

impl Scene {
    pub fn name(&self) -> &'static str {
        match self {
            Scene::Attractor(_) => "attractor",
            Scene::Game(_) => "game",
            Scene::GameOver(_) => "game over",
        }
    }

    /// Only the game scene can end a play-through
    pub fn is_playable(&self) -> bool {
        matches!(self, Scene::Game(_))
    }

    fn banner_done(&self) -> bool {
        match self {
            Scene::Attractor(_) => true,
            Scene::Game(s) => s.interval.complete,
            Scene::GameOver(s) => s.interval.complete,
        }
    }

    fn render_interval(&mut self, ctx: &mut SceneContext, surface: &mut dyn Surface) {
        match self {
            Scene::Attractor(_) => {}
            Scene::Game(s) => s.render_interval(ctx, surface),
            Scene::GameOver(s) => s.render_interval(ctx, surface),
        }
    }

    fn before_render(&mut self, ctx: &mut SceneContext) {
        if let Scene::Game(s) = self {
            s.before_render(ctx);
        }
    }

    fn render(&mut self, ctx: &mut SceneContext, surface: &mut dyn Surface) {
        match self {
            Scene::Attractor(s) => s.render(ctx, surface),
            Scene::Game(s) => s.render(ctx, surface),
            Scene::GameOver(_) => surface.clear(),
        }
    }

    fn after_render(&mut self, ctx: &mut SceneContext) {
        if let Scene::Game(s) = self {
            s.after_render(ctx);
        }
    }

    fn key_down(&mut self, settings: &Settings, key: Key) -> KeyResponse {
        match self {
            Scene::Attractor(s) => s.key_down(key),
            Scene::Game(s) => s.key_down(settings, key),
            Scene::GameOver(_) => KeyResponse::Ignored,
        }
    }

    fn key_up(&mut self, key: Key) -> KeyResponse {
        match self {
            Scene::Game(s) => s.key_up(key),
            _ => KeyResponse::Ignored,
        }
    }

    /// Effects still playing in the scene
    fn pending_effects(&self) -> usize {
        match self {
            Scene::Game(s) => s.pools.effects.len(),
            _ => 0,
        }
    }

    fn is_complete(&self) -> bool {
        match self {
            Scene::Attractor(s) => s.is_complete(),
            Scene::Game(_) => false,
            Scene::GameOver(_) => true,
        }
    }
}

/// Sprite ids the game looks up, with placeholder frames
pub fn default_sprites() -> SpriteCache {
    let mut ids: Vec<&str> = (0..EnemyParams::count() as u8)
        .map(|kind| EnemyParams::get(kind).particle_sprite)
        .collect();
    ids.extend([SPRITE_POINTS_DEFAULT, SPRITE_SMUDGES]);
    ids.sort_unstable();
    ids.dedup();
    SpriteCache::with_ids(ids, 8)
}

/// Top-level director driven once per host frame
pub struct Arena {
    game: GameState,
    scene: Scene,
    settings: Settings,
    store: Box<dyn HighScoreStore>,
    sprites: SpriteCache,
    fps: FpsCounter,
    frame: u64,
    paused: bool,
}

impl Arena {
    pub fn new(settings: Settings, store: Box<dyn HighScoreStore>) -> Self {
        let highscore = load_high_score(store.as_ref());
        let seed = settings.resolve_seed();
        let mut game = GameState::new(seed, highscore);
        let world = Self::world_for(&settings);
        game.player.body.position = world.center();
        let scene = Scene::Attractor(AttractorScene::new(world, &mut game.rng));
        log::info!("Arena ready (seed {seed}, high score {highscore})");
        Self {
            game,
            scene,
            settings,
            store,
            sprites: default_sprites(),
            fps: FpsCounter::default(),
            frame: 0,
            paused: false,
        }
    }

    fn world_for(settings: &Settings) -> World {
        World::new(
            settings.world_size,
            settings.view_size,
            settings.render_width,
            settings.render_height,
        )
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut GameState {
        &mut self.game
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn game_scene(&self) -> Option<&GameScene> {
        match &self.scene {
            Scene::Game(s) => Some(s),
            _ => None,
        }
    }

    pub fn game_scene_mut(&mut self) -> Option<&mut GameScene> {
        match &mut self.scene {
            Scene::Game(s) => Some(s),
            _ => None,
        }
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &dyn HighScoreStore {
        self.store.as_ref()
    }

    /// Run one frame: banner or scene hooks, then the transition poll
    pub fn tick(&mut self, now_ms: f64, surface: &mut dyn Surface) {
        if self.paused {
            return;
        }
        self.frame += 1;
        self.fps.record(now_ms);

        let mut ctx = SceneContext {
            game: &mut self.game,
            time: FrameTime::new(self.frame, now_ms),
            settings: &self.settings,
            store: self.store.as_mut(),
            sprites: &self.sprites,
            fps: self.settings.debug.show_fps.then(|| self.fps.fps()),
        };

        if !self.scene.banner_done() {
            self.scene.render_interval(&mut ctx, surface);
        } else {
            self.scene.before_render(&mut ctx);
            self.scene.render(&mut ctx, surface);
            self.scene.after_render(&mut ctx);
        }

        if self.scene.is_playable() && self.game.check_game_over(self.scene.pending_effects()) {
            log::info!(
                "Game over: score {}, high score {}",
                self.game.lastscore,
                self.game.highscore
            );
            let scale = Self::world_for(&self.settings).scale;
            self.switch(Scene::GameOver(GameOverScene::new(scale)), now_ms);
        } else if self.scene.banner_done() && self.scene.is_complete() {
            let next = match &self.scene {
                Scene::Attractor(_) => Scene::Game(Box::new(GameScene::new(
                    Self::world_for(&self.settings),
                    self.settings.wave_table(),
                    &mut self.game,
                    now_ms,
                ))),
                Scene::Game(_) | Scene::GameOver(_) => Scene::Attractor(AttractorScene::new(
                    Self::world_for(&self.settings),
                    &mut self.game.rng,
                )),
            };
            self.switch(next, now_ms);
        }
    }

    fn switch(&mut self, next: Scene, now_ms: f64) {
        log::info!(
            "Scene {} -> {} at frame {} ({now_ms:.0} ms)",
            self.scene.name(),
            next.name(),
            self.frame
        );
        self.scene = next;
    }

    pub fn key_down(&mut self, key: Key) {
        if self.paused {
            if key == Key::Escape {
                self.paused = false;
                log::info!("Resumed");
            }
            return;
        }
        let response = self.scene.key_down(&self.settings, key);
        if response == KeyResponse::Pause {
            self.paused = true;
            log::info!("Paused at frame {}", self.frame);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.scene.key_up(key);
    }

    pub fn pointer_down(&mut self) {
        if let Scene::Attractor(s) = &mut self.scene {
            s.pointer_down();
        }
    }
}
