//! The playable scene: waves of enemies, the player ship and everything they
//! shoot at each other

use glam::Vec2;

use super::{Interval, SceneContext};
use crate::consts::*;
use crate::platform::{Bindings, InputState, Key, KeyResponse};
use crate::renderer::{
    HudState, Surface, center_fill_text, colors, hud::font_size, render_actors, render_background,
    render_collision_radius, render_overlay,
};
use crate::settings::Settings;
use crate::sim::actor::{Actor, ActorPools};
use crate::sim::collision::{detect_player, detect_player_bullets};
use crate::sim::effect::Effect;
use crate::sim::enemy::EnemyShip;
use crate::sim::integrate::integrate;
use crate::sim::state::GameState;
use crate::sim::wave::{WaveDirector, WaveTable};
use crate::sim::world::World;

/// Frames the "ENTER THE ARENA!" banner stays up
const START_BANNER_FRAMES: u32 = 50;
/// Rise speed, size and fade of announcement text
const ANNOUNCE_VECTOR: Vec2 = Vec2::new(0.0, -5.0);
const ANNOUNCE_SIZE: f32 = 32.0;
const ANNOUNCE_FADE: u32 = 64;
/// Glow blur for vector outlines
const GLOW: f32 = 8.0;

/// Game scene record
pub struct GameScene {
    pub world: World,
    pub pools: ActorPools,
    pub waves: WaveDirector,
    pub input: InputState,
    bindings: Bindings,
    /// Debug request to end the current wave
    skip_wave: bool,
    /// A fire key was held last frame
    fire_held: bool,
    hud: HudState,
    pub interval: Interval,
}

impl GameScene {
    /// Fresh play-through: empty pools, first wave, player at the center
    pub fn new(mut world: World, table: WaveTable, game: &mut GameState, now_ms: f64) -> Self {
        world.center_view();
        let mut scene = Self {
            world,
            pools: ActorPools::new(),
            waves: WaveDirector::new(table, now_ms),
            input: InputState::default(),
            bindings: Bindings::arena_defaults(),
            skip_wave: false,
            fire_held: false,
            hud: HudState::default(),
            interval: Interval::new("ENTER THE ARENA!", START_BANNER_FRAMES),
        };
        scene.reset_player(game);
        scene
    }

    /// Put the player back in play at the center with a fresh ship
    fn reset_player(&mut self, game: &mut GameState) {
        let player = &mut game.player;
        player.body.position = self.world.center();
        player.body.vector = Vec2::ZERO;
        player.heading = 0.0;
        player.reset(false);
        self.input.clear();
        self.fire_held = false;
        self.pools.player_in_play = true;
    }

    fn announce(&mut self, text: impl Into<String>) {
        self.pools.effects.push(Effect::text(
            self.world.screen_center(),
            ANNOUNCE_VECTOR,
            text,
            ANNOUNCE_SIZE,
            ANNOUNCE_FADE,
        ));
    }

    /// Extra bullets per volley at score milestones
    fn upgrade_weapons(&mut self, game: &mut GameState) {
        let score = game.score;
        let Some(weapon) = game.player.main_weapon_mut() else {
            return;
        };
        if score > POWERUP_SCORE_1 && weapon.bullet_count == 1 {
            weapon.bullet_count = 2;
            self.announce("POWERUP X1!");
        }
        let Some(weapon) = game.player.main_weapon_mut() else {
            return;
        };
        if score > POWERUP_SCORE_2 && weapon.bullet_count == 2 {
            weapon.bullet_count = 3;
            self.announce("POWERUP X2!");
        }
    }

    /// Simulation step: input, camera, waves, spawning, behaviour, movement
    pub fn before_render(&mut self, ctx: &mut SceneContext) {
        let game = &mut *ctx.game;
        let frame = ctx.time.frame;

        self.upgrade_weapons(game);

        game.player.handle_input(&self.input);
        let fire_pressed = game.player.fire_angle.is_some();
        if fire_pressed && !(ctx.settings.debug.disable_autofire && self.fire_held) {
            game.player
                .fire_primary(frame, &mut self.pools.player_bullets);
        }
        self.fire_held = fire_pressed;

        self.world.follow(game.player.position());

        if let Some(wave) = self.waves.update(ctx.time.now_ms, self.skip_wave) {
            self.announce(format!("WAVE {wave}"));
        }
        self.skip_wave = false;

        for _ in 0..self.waves.spawn_deficit(self.pools.enemies.len()) {
            let kind = self.waves.choose_enemy_type(&mut game.rng);
            self.pools
                .enemies
                .push(EnemyShip::spawn(kind, &self.world, &mut game.rng));
        }

        let target = (self.pools.player_in_play && game.player.alive)
            .then(|| game.player.position());
        for enemy in &mut self.pools.enemies {
            if let Some(bullet) = enemy.think(target, &mut game.rng) {
                self.pools.enemy_bullets.push(bullet);
            }
        }

        integrate(&mut self.pools, &mut game.player, &self.world);
    }

    pub fn render(&mut self, ctx: &mut SceneContext, surface: &mut dyn Surface) {
        let debug = ctx.settings.debug;
        surface.clear();
        surface.set_glow(if debug.disable_glow { 0.0 } else { GLOW });

        render_background(surface, &self.world);
        render_actors(surface, &self.world, ctx.sprites, &self.pools, &ctx.game.player);
        if debug.collision_radius {
            render_collision_radius(surface, &self.world, &self.pools, &ctx.game.player);
        }
        render_overlay(
            surface,
            self.world.scale,
            &*ctx.game,
            &mut self.hud,
            &self.waves,
            ctx.time.now_ms,
            ctx.fps,
        );
    }

    /// Collision resolution, or the respawn countdown while the player is down
    pub fn after_render(&mut self, ctx: &mut SceneContext) {
        let game = &mut *ctx.game;
        let frame = ctx.time.frame;
        if game.player.alive {
            detect_player(game, &mut self.pools, frame, ctx.settings.debug.invincible);
            detect_player_bullets(game, &mut self.pools);
        } else {
            detect_player_bullets(game, &mut self.pools);
            if game.lives > 0 && frame > game.player.killed_on_frame + RESPAWN_DELAY_FRAMES {
                self.pools.enemies.clear();
                self.reset_player(game);
                log::info!("Player respawned at frame {frame}");
            }
        }
    }

    pub fn render_interval(&mut self, _ctx: &mut SceneContext, surface: &mut dyn Surface) {
        if self.interval.advance() {
            let y = surface.height() * 0.5 - 9.0;
            surface.clear();
            center_fill_text(
                surface,
                self.interval.label,
                y,
                font_size(self.world.scale, 18.0),
                colors::WHITE,
            );
        }
    }

    pub fn key_down(&mut self, settings: &Settings, key: Key) -> KeyResponse {
        if let Some(action) = self.bindings.get(key) {
            self.input.set(action, true);
            return KeyResponse::Handled;
        }
        match key {
            Key::L if settings.debug.enabled => {
                self.skip_wave = true;
                KeyResponse::Handled
            }
            Key::Escape => KeyResponse::Pause,
            Key::OpenBracket => {
                self.world.zoom_in();
                KeyResponse::Handled
            }
            Key::CloseBracket => {
                self.world.zoom_out();
                KeyResponse::Handled
            }
            _ => KeyResponse::Ignored,
        }
    }

    pub fn key_up(&mut self, key: Key) -> KeyResponse {
        match self.bindings.get(key) {
            Some(action) => {
                self.input.set(action, false);
                KeyResponse::Handled
            }
            None => KeyResponse::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryStore;
    use crate::platform::{Action, FrameTime};
    use crate::renderer::{RecordingSurface, SpriteCache};
    use crate::sim::bullet::Bullet;
    use crate::sim::effect::EffectKind;
    use crate::sim::enemy::{ENEMY_DUMBO, ENEMY_TRACKER};
    use proptest::prelude::*;

    struct Harness {
        game: GameState,
        settings: Settings,
        store: MemoryStore,
        sprites: SpriteCache,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                game: GameState::new(11, 0),
                settings: Settings::default(),
                store: MemoryStore::new(),
                sprites: SpriteCache::new(),
            }
        }

        fn ctx(&mut self, frame: u64, now_ms: f64) -> SceneContext<'_> {
            SceneContext {
                game: &mut self.game,
                time: FrameTime::new(frame, now_ms),
                settings: &self.settings,
                store: &mut self.store,
                sprites: &self.sprites,
                fps: None,
            }
        }

        fn scene(&mut self) -> GameScene {
            let mut scene =
                GameScene::new(World::default(), WaveTable::default(), &mut self.game, 0.0);
            scene.interval.complete = true;
            scene
        }
    }

    fn texts(pools: &ActorPools) -> Vec<&str> {
        pools
            .effects
            .iter()
            .filter_map(|e| match &e.kind {
                EffectKind::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_new_scene_puts_player_in_play_at_center() {
        let mut h = Harness::new();
        h.game.player.body.position = Vec2::new(3.0, 3.0);
        h.game.player.alive = false;
        let scene = h.scene();
        assert!(scene.pools.player_in_play);
        assert!(h.game.player.alive);
        assert_eq!(h.game.player.position(), scene.world.center());
        assert_eq!(scene.waves.index(), 0);
    }

    #[test]
    fn test_before_render_fills_wave_quota() {
        let mut h = Harness::new();
        let mut scene = h.scene();
        scene.before_render(&mut h.ctx(1, 25.0));
        assert_eq!(scene.pools.enemies.len(), scene.waves.current().enemy_max);
        for enemy in &scene.pools.enemies {
            assert!(scene.waves.current().enemy_weighting.contains(&enemy.kind));
        }
    }

    #[test]
    fn test_lethal_bullet_scores_and_explodes() {
        let mut h = Harness::new();
        let mut scene = h.scene();
        let at = Vec2::new(300.0, 300.0);
        scene
            .pools
            .enemies
            .push(EnemyShip::new(ENEMY_DUMBO, at, Vec2::ZERO));
        scene
            .pools
            .player_bullets
            .push(Bullet::player(at, Vec2::new(10.0, 0.0)));

        scene.after_render(&mut h.ctx(5, 125.0));

        assert_eq!(h.game.score, 5);
        assert!(scene.pools.enemies.is_empty());
        assert!(scene.pools.player_bullets.is_empty());
        assert_eq!(scene.pools.enemy_kills, 1);
        assert!(scene
            .pools
            .effects
            .iter()
            .any(|e| matches!(e.kind, EffectKind::Score { value: 5 })));
        assert!(scene
            .pools
            .effects
            .iter()
            .any(|e| matches!(e.kind, EffectKind::EnemyExplosion { .. })));
    }

    #[test]
    fn test_wave_advances_with_announcement() {
        let mut h = Harness::new();
        let mut scene = h.scene();
        scene.before_render(&mut h.ctx(1, 19_999.0));
        assert_eq!(scene.waves.index(), 0);

        scene.before_render(&mut h.ctx(2, 20_000.0));
        assert_eq!(scene.waves.index(), 1);
        assert_eq!(scene.waves.time_in_scene(), 20_000.0);
        assert!(texts(&scene.pools).contains(&"WAVE 2"));
    }

    #[test]
    fn test_skip_key_needs_debug() {
        let mut h = Harness::new();
        let mut scene = h.scene();
        assert_eq!(scene.key_down(&h.settings, Key::L), KeyResponse::Ignored);
        scene.before_render(&mut h.ctx(1, 25.0));
        assert_eq!(scene.waves.index(), 0);

        h.settings.debug.enabled = true;
        assert_eq!(scene.key_down(&h.settings, Key::L), KeyResponse::Handled);
        scene.before_render(&mut h.ctx(2, 50.0));
        assert_eq!(scene.waves.index(), 1);
        // The request is used up
        scene.before_render(&mut h.ctx(3, 75.0));
        assert_eq!(scene.waves.index(), 1);
    }

    #[test]
    fn test_death_then_respawn_after_delay() {
        let mut h = Harness::new();
        h.game.lives = 3;
        let mut scene = h.scene();
        let center = scene.world.center();
        h.game.player.energy = 10.0;
        scene
            .pools
            .enemies
            .push(EnemyShip::new(ENEMY_DUMBO, center, Vec2::ZERO));

        scene.after_render(&mut h.ctx(10, 250.0));
        assert_eq!(h.game.lives, 2);
        assert!(!h.game.player.alive);
        assert_eq!(h.game.player.killed_on_frame, 10);
        assert!(scene
            .pools
            .effects
            .iter()
            .any(|e| matches!(e.kind, EffectKind::PlayerExplosion)));

        // Out of play from the next simulation step
        scene.before_render(&mut h.ctx(11, 275.0));
        assert!(!scene.pools.player_in_play);

        // No further damage while down
        let pos = h.game.player.position();
        scene
            .pools
            .enemy_bullets
            .push(Bullet::enemy(pos, Vec2::ZERO));
        scene.after_render(&mut h.ctx(50, 1250.0));
        assert_eq!(h.game.lives, 2);
        assert!(!h.game.player.alive);

        scene.after_render(&mut h.ctx(110, 2750.0));
        assert!(!h.game.player.alive);

        scene.after_render(&mut h.ctx(111, 2775.0));
        assert!(h.game.player.alive);
        assert!(scene.pools.player_in_play);
        assert!(scene.pools.enemies.is_empty());
        assert_eq!(h.game.player.energy, h.game.player.energy_max);
        assert_eq!(h.game.player.position(), center);
        assert_eq!(h.game.player.body.vector, Vec2::ZERO);
        assert_eq!(h.game.lives, 2);
    }

    #[test]
    fn test_last_life_is_not_respawned() {
        let mut h = Harness::new();
        let mut scene = h.scene();
        h.game.player.energy = 1.0;
        let center = scene.world.center();
        scene
            .pools
            .enemies
            .push(EnemyShip::new(ENEMY_TRACKER, center, Vec2::ZERO));
        scene.after_render(&mut h.ctx(1, 25.0));
        assert_eq!(h.game.lives, 0);
        scene.after_render(&mut h.ctx(500, 12_500.0));
        assert!(!h.game.player.alive);
    }

    #[test]
    fn test_invincible_player_takes_no_damage() {
        let mut h = Harness::new();
        h.settings.debug.invincible = true;
        let mut scene = h.scene();
        let energy = h.game.player.energy;
        let center = scene.world.center();
        scene
            .pools
            .enemies
            .push(EnemyShip::new(ENEMY_DUMBO, center, Vec2::ZERO));
        scene.after_render(&mut h.ctx(1, 25.0));
        assert_eq!(h.game.player.energy, energy);
        // The enemy is still destroyed by the ramming
        assert!(scene.pools.enemies.is_empty());
        assert_eq!(h.game.score, 0);
    }

    #[test]
    fn test_enemy_bullet_at_edge_leaves_impact() {
        let mut h = Harness::new();
        let mut scene = h.scene();
        let size = scene.world.size;
        scene
            .pools
            .enemy_bullets
            .push(Bullet::enemy(Vec2::new(size - 1.0, 700.0), Vec2::new(5.0, 0.0)));
        scene.before_render(&mut h.ctx(1, 25.0));
        let impact = scene
            .pools
            .effects
            .iter()
            .find(|e| matches!(e.kind, EffectKind::BulletImpact))
            .expect("impact effect");
        assert_eq!(impact.position(), Vec2::new(size, 700.0));
        assert_eq!(impact.vector(), Vec2::new(2.5, 0.0));
        assert!(!scene
            .pools
            .enemy_bullets
            .iter()
            .any(|b| b.position().x >= size));
    }

    #[test]
    fn test_score_milestones_upgrade_weapon() {
        let mut h = Harness::new();
        let mut scene = h.scene();
        h.game.add_score(10_001);
        scene.before_render(&mut h.ctx(1, 25.0));
        assert_eq!(h.game.player.main_weapon().unwrap().bullet_count, 2);
        assert!(texts(&scene.pools).contains(&"POWERUP X1!"));

        h.game.add_score(40_000);
        scene.before_render(&mut h.ctx(2, 50.0));
        assert_eq!(h.game.player.main_weapon().unwrap().bullet_count, 3);
        assert!(texts(&scene.pools).contains(&"POWERUP X2!"));
    }

    #[test]
    fn test_bindings_drive_input() {
        let mut h = Harness::new();
        let mut scene = h.scene();
        assert_eq!(scene.key_down(&h.settings, Key::W), KeyResponse::Handled);
        assert!(scene.input.is_held(Action::MoveUp));
        assert_eq!(scene.key_up(Key::W), KeyResponse::Handled);
        assert!(!scene.input.is_held(Action::MoveUp));
        assert_eq!(scene.key_up(Key::Space), KeyResponse::Ignored);
        assert_eq!(scene.key_down(&h.settings, Key::Escape), KeyResponse::Pause);
    }

    #[test]
    fn test_bracket_keys_zoom() {
        let mut h = Harness::new();
        let mut scene = h.scene();
        let start = scene.world.viewsize;
        scene.key_down(&h.settings, Key::OpenBracket);
        assert_eq!(scene.world.viewsize, start - VIEW_SIZE_STEP);
        scene.key_down(&h.settings, Key::CloseBracket);
        scene.key_down(&h.settings, Key::CloseBracket);
        assert_eq!(scene.world.viewsize, start + VIEW_SIZE_STEP);
    }

    #[test]
    fn test_fire_key_fires_continuously() {
        let mut h = Harness::new();
        let mut scene = h.scene();
        scene.key_down(&h.settings, Key::Right);
        scene.before_render(&mut h.ctx(1, 25.0));
        let first = scene.pools.player_bullets.len();
        assert!(first > 0);
        scene.before_render(&mut h.ctx(100, 2500.0));
        assert!(scene.pools.player_bullets.len() > first);
    }

    #[test]
    fn test_disabled_autofire_needs_a_press_per_volley() {
        let mut h = Harness::new();
        h.settings.debug.disable_autofire = true;
        let mut scene = h.scene();
        scene.key_down(&h.settings, Key::Right);
        scene.before_render(&mut h.ctx(1, 25.0));
        let first = scene.pools.player_bullets.len();
        assert!(first > 0);

        scene.before_render(&mut h.ctx(100, 2500.0));
        assert_eq!(scene.pools.player_bullets.len(), first);

        scene.key_up(Key::Right);
        scene.before_render(&mut h.ctx(101, 2525.0));
        scene.key_down(&h.settings, Key::Right);
        scene.before_render(&mut h.ctx(200, 5000.0));
        assert!(scene.pools.player_bullets.len() > first);
    }

    #[test]
    fn test_banner_then_frame_render() {
        let mut h = Harness::new();
        let mut scene = GameScene::new(World::default(), WaveTable::default(), &mut h.game, 0.0);
        let mut surface = RecordingSurface::new(500.0, 500.0);
        scene.render_interval(&mut h.ctx(1, 25.0), &mut surface);
        assert!(surface.has_text("ENTER THE ARENA!"));
        assert!(!scene.interval.complete);

        surface.reset();
        scene.render(&mut h.ctx(2, 50.0), &mut surface);
        assert!(surface.has_text("x1"));
        assert!(surface.is_balanced());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_score_never_drops_during_play(
            seed in any::<u64>(),
            aims in proptest::collection::vec(0usize..4, 1..6),
        ) {
            let aim_keys = [
                (Key::Right, Vec2::X),
                (Key::Down, Vec2::Y),
                (Key::Left, Vec2::NEG_X),
                (Key::Up, Vec2::NEG_Y),
            ];
            let mut h = Harness::new();
            h.game = GameState::new(seed, 0);
            h.settings.debug.invincible = true;
            let mut scene = h.scene();
            let mut last = h.game.score;
            let mut frame = 0;
            for aim in aims {
                let (key, dir) = aim_keys[aim];
                // A sitting target in the line of fire
                let target = h.game.player.position() + dir * 200.0;
                scene
                    .pools
                    .enemies
                    .push(EnemyShip::new(ENEMY_DUMBO, target, Vec2::ZERO));
                scene.key_down(&h.settings, key);
                for _ in 0..20 {
                    frame += 1;
                    let now = frame as f64 * 25.0;
                    scene.before_render(&mut h.ctx(frame, now));
                    scene.after_render(&mut h.ctx(frame, now));
                    prop_assert!(h.game.score >= last);
                    last = h.game.score;
                }
                scene.key_up(key);
            }
            prop_assert!(h.game.score > 0);
        }

        #[test]
        fn prop_spawning_stops_at_wave_max(seed in any::<u64>(), frames in 1u64..60) {
            let mut h = Harness::new();
            h.game = GameState::new(seed, 0);
            let mut scene = h.scene();
            for frame in 1..=frames {
                let now = frame as f64 * 25.0;
                scene.before_render(&mut h.ctx(frame, now));
                prop_assert!(scene.pools.enemies.len() <= scene.waves.current().enemy_max);
                scene.after_render(&mut h.ctx(frame, now));
            }
        }
    }
}
