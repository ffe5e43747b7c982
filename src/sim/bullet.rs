//! Player and enemy projectiles

use glam::Vec2;

use super::actor::{Actor, Body};

/// Projectile flavours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletKind {
    /// Fired by the player's primary weapon
    Player,
    /// Aimed shot fired by an enemy
    Enemy,
    /// Stationary mine laid by a bomber
    Mine,
}

impl BulletKind {
    fn params(self) -> (f32, f32, u32) {
        // (radius, power, lifespan in frames)
        match self {
            BulletKind::Player => (4.0, 1.0, 40),
            BulletKind::Enemy => (5.0, 10.0, 80),
            BulletKind::Mine => (8.0, 20.0, 400),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub body: Body,
    pub kind: BulletKind,
    /// Frames left before the bullet fizzles out
    pub lifespan: u32,
}

impl Bullet {
    pub fn new(kind: BulletKind, position: Vec2, vector: Vec2) -> Self {
        let (radius, _, lifespan) = kind.params();
        Self {
            body: Body::new(position, vector, radius),
            kind,
            lifespan,
        }
    }

    pub fn player(position: Vec2, vector: Vec2) -> Self {
        Self::new(BulletKind::Player, position, vector)
    }

    pub fn enemy(position: Vec2, vector: Vec2) -> Self {
        Self::new(BulletKind::Enemy, position, vector)
    }

    pub fn mine(position: Vec2) -> Self {
        Self::new(BulletKind::Mine, position, Vec2::ZERO)
    }

    /// Damage dealt on impact
    pub fn power(&self) -> f32 {
        self.kind.params().1
    }

    /// Area-weapon blast radius; simple bullets have none
    pub fn effect_radius(&self) -> f32 {
        0.0
    }

    pub fn is_player_bullet(&self) -> bool {
        self.kind == BulletKind::Player
    }
}

impl Actor for Bullet {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn expired(&self) -> bool {
        self.lifespan == 0
    }

    fn on_update(&mut self) {
        self.lifespan = self.lifespan.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullet_expires_after_lifespan() {
        let mut b = Bullet::player(Vec2::ZERO, Vec2::X);
        for _ in 0..39 {
            b.on_update();
        }
        assert!(!b.expired());
        b.on_update();
        assert!(b.expired());
    }

    #[test]
    fn test_power_and_radius_by_kind() {
        assert_eq!(Bullet::player(Vec2::ZERO, Vec2::X).power(), 1.0);
        assert_eq!(Bullet::enemy(Vec2::ZERO, Vec2::X).power(), 10.0);
        let mine = Bullet::mine(Vec2::ONE);
        assert_eq!(mine.vector(), Vec2::ZERO);
        assert_eq!(mine.effect_radius(), 0.0);
        assert!(!mine.is_player_bullet());
    }
}
