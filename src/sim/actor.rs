//! Shared actor contract and the per-category actor pools

use glam::Vec2;

use super::bullet::Bullet;
use super::collectable::Collectable;
use super::effect::Effect;
use super::enemy::EnemyShip;

/// Position, velocity and collision radius shared by every actor
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Body {
    pub position: Vec2,
    /// Velocity in logical units per frame
    pub vector: Vec2,
    /// Collision radius (0 for actors that never collide)
    pub radius: f32,
}

impl Body {
    pub fn new(position: Vec2, vector: Vec2, radius: f32) -> Self {
        Self {
            position,
            vector,
            radius,
        }
    }
}

/// Capability set every actor variant exposes to the integrator and the
/// collision detector
pub trait Actor {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    /// True once the actor should leave play
    fn expired(&self) -> bool;

    /// Per-frame internal bookkeeping (ages, lifetimes), run before the
    /// expiration test
    fn on_update(&mut self) {}

    /// Heading in degrees, for variants that have one
    fn heading_mut(&mut self) -> Option<&mut f32> {
        None
    }

    #[inline]
    fn position(&self) -> Vec2 {
        self.body().position
    }

    #[inline]
    fn vector(&self) -> Vec2 {
        self.body().vector
    }

    #[inline]
    fn radius(&self) -> f32 {
        self.body().radius
    }
}

/// One growable pool per actor category, visited in a fixed order:
/// enemies, player bullets, enemy bullets, effects, collectables, player
#[derive(Debug, Default)]
pub struct ActorPools {
    pub enemies: Vec<EnemyShip>,
    pub player_bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub effects: Vec<Effect>,
    pub collectables: Vec<Collectable>,
    /// Whether the player singleton is currently part of the scene
    pub player_in_play: bool,
    /// Enemies destroyed this scene, with or without score credit
    pub enemy_kills: u32,
}

impl ActorPools {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total actors in play (player included when present)
    pub fn len(&self) -> usize {
        self.enemies.len()
            + self.player_bullets.len()
            + self.enemy_bullets.len()
            + self.effects.len()
            + self.collectables.len()
            + usize::from(self.player_in_play)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
