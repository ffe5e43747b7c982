//! Short-lived, non-colliding visual actors

use glam::Vec2;
use rand::Rng;

use super::actor::{Actor, Body};
use super::enemy::EnemyParams;
use super::vector::from_angle;

/// Sprite-cache ids used by effect particles
pub const SPRITE_POINTS_DEFAULT: &str = "points_rgb(255,125,50)";
pub const SPRITE_SMUDGES: &str = "smudges";

/// Lifetimes in frames
const ENEMY_EXPLOSION_FRAMES: u32 = 40;
const PLAYER_EXPLOSION_FRAMES: u32 = 80;
const BULLET_IMPACT_FRAMES: u32 = 16;
const ENEMY_IMPACT_FRAMES: u32 = 12;
const SCORE_INDICATOR_FRAMES: u32 = 40;

/// What an effect shows
#[derive(Debug, Clone, PartialEq)]
pub enum EffectKind {
    EnemyExplosion { enemy_kind: u8 },
    PlayerExplosion,
    BulletImpact,
    EnemyImpact { enemy_kind: u8 },
    /// Floating message, e.g. "WAVE 2"
    Text { text: String, size: f32 },
    /// Floating score awarded for a kill
    Score { value: u64 },
}

/// One debris point of an explosion or impact, flying out from the effect origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub velocity: Vec2,
    /// Index into the sprite-cache frame list (bigger = larger sprite)
    pub size: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Effect {
    pub body: Body,
    pub kind: EffectKind,
    /// Frames since creation
    pub age: u32,
    pub lifetime: u32,
    pub particles: Vec<Particle>,
}

fn burst(rng: &mut impl Rng, count: usize, max_speed: f32, sizes: usize) -> Vec<Particle> {
    (0..count)
        .map(|_| Particle {
            velocity: from_angle(rng.random_range(0.0..std::f32::consts::TAU))
                * rng.random_range(0.5..max_speed),
            size: rng.random_range(0..sizes),
        })
        .collect()
}

impl Effect {
    fn new(kind: EffectKind, position: Vec2, vector: Vec2, lifetime: u32) -> Self {
        Self {
            body: Body::new(position, vector, 0.0),
            kind,
            age: 0,
            lifetime,
            particles: Vec::new(),
        }
    }

    pub fn enemy_explosion(position: Vec2, vector: Vec2, enemy_kind: u8, rng: &mut impl Rng) -> Self {
        let mut e = Self::new(
            EffectKind::EnemyExplosion { enemy_kind },
            position,
            vector,
            ENEMY_EXPLOSION_FRAMES,
        );
        e.particles = burst(rng, 20, 4.0, 4);
        e
    }

    pub fn player_explosion(position: Vec2, vector: Vec2, rng: &mut impl Rng) -> Self {
        let mut e = Self::new(
            EffectKind::PlayerExplosion,
            position,
            vector,
            PLAYER_EXPLOSION_FRAMES,
        );
        e.particles = burst(rng, 40, 6.0, 8);
        e
    }

    pub fn bullet_impact(position: Vec2, vector: Vec2) -> Self {
        Self::new(EffectKind::BulletImpact, position, vector, BULLET_IMPACT_FRAMES)
    }

    pub fn enemy_impact(position: Vec2, vector: Vec2, enemy_kind: u8, rng: &mut impl Rng) -> Self {
        let mut e = Self::new(
            EffectKind::EnemyImpact { enemy_kind },
            position,
            vector,
            ENEMY_IMPACT_FRAMES,
        );
        e.particles = burst(rng, 5, 2.0, 2);
        e
    }

    /// Floating text that fades over `fade_frames`
    pub fn text(position: Vec2, vector: Vec2, text: impl Into<String>, size: f32, fade_frames: u32) -> Self {
        Self::new(
            EffectKind::Text {
                text: text.into(),
                size,
            },
            position,
            vector,
            fade_frames,
        )
    }

    pub fn score_indicator(position: Vec2, vector: Vec2, value: u64) -> Self {
        Self::new(
            EffectKind::Score { value },
            position,
            vector,
            SCORE_INDICATOR_FRAMES,
        )
    }

    /// Remaining opacity, 1 at creation down to 0 at expiry
    pub fn fade(&self) -> f32 {
        if self.lifetime == 0 {
            return 0.0;
        }
        1.0 - (self.age as f32 / self.lifetime as f32).min(1.0)
    }

    /// Sprite-cache id for this effect's particles
    pub fn sprite_id(&self) -> &'static str {
        match &self.kind {
            EffectKind::EnemyExplosion { enemy_kind } | EffectKind::EnemyImpact { enemy_kind } => {
                EnemyParams::get(*enemy_kind).particle_sprite
            }
            EffectKind::PlayerExplosion => SPRITE_SMUDGES,
            _ => SPRITE_POINTS_DEFAULT,
        }
    }

    /// World position of each particle this frame
    pub fn particle_positions(&self) -> impl Iterator<Item = (Vec2, usize)> + '_ {
        let t = self.age as f32;
        self.particles
            .iter()
            .map(move |p| (self.body.position + p.velocity * t, p.size))
    }
}

impl Actor for Effect {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn expired(&self) -> bool {
        self.age >= self.lifetime
    }

    fn on_update(&mut self) {
        self.age += 1;
    }
}
