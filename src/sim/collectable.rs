//! Pickups dropped by destroyed enemies

use glam::Vec2;

use super::actor::{Actor, Body};
use super::effect::Effect;
use super::state::GameState;

pub const MULTIPLIER_RADIUS: f32 = 8.0;
/// Frames a multiplier stays in play before vanishing
pub const MULTIPLIER_LIFETIME: u32 = 400;
/// Heading change per frame (degrees)
const MULTIPLIER_SPIN: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectableKind {
    /// Raises the score multiplier by one
    Multiplier,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Collectable {
    pub body: Body,
    pub kind: CollectableKind,
    /// Degrees
    pub heading: f32,
    pub age: u32,
    pub lifetime: u32,
}

impl Collectable {
    pub fn multiplier(position: Vec2, vector: Vec2) -> Self {
        Self {
            body: Body::new(position, vector, MULTIPLIER_RADIUS),
            kind: CollectableKind::Multiplier,
            heading: 0.0,
            age: 0,
            lifetime: MULTIPLIER_LIFETIME,
        }
    }

    /// Pickup side effects, run once the player touches the item
    pub fn collected(&self, game: &mut GameState, effects: &mut Vec<Effect>) {
        match self.kind {
            CollectableKind::Multiplier => {
                game.score_multiplier += 1;
                log::debug!("Multiplier collected, now x{}", game.score_multiplier);
                effects.push(Effect::text(
                    self.body.position,
                    Vec2::new(0.0, -3.0),
                    format!("x{}", game.score_multiplier),
                    16.0,
                    32,
                ));
            }
        }
    }
}

impl Actor for Collectable {
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
        self.heading += MULTIPLIER_SPIN;
    }

    fn heading_mut(&mut self) -> Option<&mut f32> {
        Some(&mut self.heading)
    }
}
