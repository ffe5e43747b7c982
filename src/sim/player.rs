//! The player's ship: energy, thrust, heading and primary weapons

use std::collections::BTreeMap;

use glam::Vec2;

use super::actor::{Actor, Body};
use super::bullet::Bullet;
use super::vector::{VectorExt, from_angle};
use crate::DEG_PER_RAD;
use crate::platform::{Action, InputState};

pub const PLAYER_RADIUS: f32 = 10.0;
pub const ENERGY_INIT: f32 = 100.0;
/// Acceleration per frame while a move key is held
pub const THRUST: f32 = 1.0;
pub const MAX_SPEED: f32 = 10.0;
/// Velocity retained per frame with no move key held
pub const DRAG: f32 = 0.9;

/// Name of the default primary weapon
pub const MAIN_WEAPON: &str = "main";

/// State of one primary weapon
#[derive(Debug, Clone, PartialEq)]
pub struct PrimaryWeapon {
    /// Bullets per volley
    pub bullet_count: u32,
    /// Frames between volleys
    pub recharge_frames: u64,
    pub bullet_speed: f32,
    /// Angle between bullets in a volley (radians)
    pub spread: f32,
    last_fired: Option<u64>,
}

impl Default for PrimaryWeapon {
    fn default() -> Self {
        Self {
            bullet_count: 1,
            recharge_frames: 4,
            bullet_speed: 20.0,
            spread: 0.08,
            last_fired: None,
        }
    }
}

impl PrimaryWeapon {
    fn ready(&self, frame: u64) -> bool {
        self.last_fired
            .is_none_or(|last| frame >= last + self.recharge_frames)
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    pub energy: f32,
    pub energy_max: f32,
    /// Degrees
    pub heading: f32,
    /// Radians; `None` while no fire key is held
    pub fire_angle: Option<f32>,
    pub primary_weapons: BTreeMap<&'static str, PrimaryWeapon>,
    /// Player bullets reflect off the world edge instead of fizzling
    pub bounce_weapons: bool,
    pub alive: bool,
    pub killed_on_frame: u64,
}

impl Player {
    pub fn new(position: Vec2) -> Self {
        let mut player = Self {
            body: Body::new(position, Vec2::ZERO, PLAYER_RADIUS),
            energy: ENERGY_INIT,
            energy_max: ENERGY_INIT,
            heading: 0.0,
            fire_angle: None,
            primary_weapons: BTreeMap::new(),
            bounce_weapons: false,
            alive: true,
            killed_on_frame: 0,
        };
        player.reset(false);
        player
    }

    /// Restore energy and liveness; weapon upgrades survive only when asked
    pub fn reset(&mut self, persist_power_ups: bool) {
        self.energy = self.energy_max;
        self.alive = true;
        self.fire_angle = None;
        if !persist_power_ups {
            self.primary_weapons.clear();
            self.primary_weapons
                .insert(MAIN_WEAPON, PrimaryWeapon::default());
            self.bounce_weapons = false;
        }
    }

    /// Reduce energy; returns true if this killed the player
    pub fn damage_by(&mut self, amount: f32, frame: u64) -> bool {
        if !self.alive {
            return false;
        }
        self.energy = (self.energy - amount).clamp(0.0, self.energy_max);
        if self.energy <= 0.0 {
            self.alive = false;
            self.killed_on_frame = frame;
            return true;
        }
        false
    }

    pub fn main_weapon(&self) -> Option<&PrimaryWeapon> {
        self.primary_weapons.get(MAIN_WEAPON)
    }

    pub fn main_weapon_mut(&mut self) -> Option<&mut PrimaryWeapon> {
        self.primary_weapons.get_mut(MAIN_WEAPON)
    }

    /// Apply thrust from the move actions and derive the fire angle from the
    /// fire actions
    pub fn handle_input(&mut self, input: &InputState) {
        let thrust = Vec2::new(
            input.axis(Action::MoveLeft, Action::MoveRight),
            input.axis(Action::MoveUp, Action::MoveDown),
        );
        let v = &mut self.body.vector;
        if thrust == Vec2::ZERO {
            v.scale_by(DRAG);
        } else {
            *v += thrust.normalize() * THRUST;
            if v.length() > MAX_SPEED {
                *v = v.normalize() * MAX_SPEED;
            }
            self.heading = v.y.atan2(v.x) * DEG_PER_RAD;
        }

        let aim = Vec2::new(
            input.axis(Action::FireLeft, Action::FireRight),
            input.axis(Action::FireUp, Action::FireDown),
        );
        self.fire_angle = (aim != Vec2::ZERO).then(|| aim.y.atan2(aim.x));
    }

    /// Fire a volley from every ready primary weapon toward `fire_angle`
    pub fn fire_primary(&mut self, frame: u64, bullets: &mut Vec<Bullet>) {
        let Some(angle) = self.fire_angle else {
            return;
        };
        if !self.alive {
            return;
        }
        let origin = self.body.position;
        let radius = self.body.radius;
        for weapon in self.primary_weapons.values_mut() {
            if !weapon.ready(frame) {
                continue;
            }
            weapon.last_fired = Some(frame);
            let n = weapon.bullet_count as f32;
            for i in 0..weapon.bullet_count {
                let offset = (i as f32 - (n - 1.0) / 2.0) * weapon.spread;
                let dir = from_angle(angle + offset);
                bullets.push(Bullet::player(
                    origin + dir * radius,
                    dir * weapon.bullet_speed,
                ));
            }
        }
    }
}

impl Actor for Player {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn expired(&self) -> bool {
        !self.alive
    }

    fn heading_mut(&mut self) -> Option<&mut f32> {
        Some(&mut self.heading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_damage_kills_at_zero() {
        let mut p = Player::new(Vec2::ZERO);
        assert!(!p.damage_by(60.0, 5));
        assert!(p.alive);
        assert!(p.damage_by(60.0, 7));
        assert_eq!(p.energy, 0.0);
        assert!(p.expired());
        assert_eq!(p.killed_on_frame, 7);
        // Further damage is ignored while dead
        assert!(!p.damage_by(10.0, 8));
        assert_eq!(p.killed_on_frame, 7);
    }

    #[test]
    fn test_reset_restores_energy_and_weapons() {
        let mut p = Player::new(Vec2::ZERO);
        p.main_weapon_mut().unwrap().bullet_count = 3;
        p.bounce_weapons = true;
        p.damage_by(500.0, 1);
        p.reset(true);
        assert_eq!(p.energy, p.energy_max);
        assert_eq!(p.main_weapon().unwrap().bullet_count, 3);
        p.reset(false);
        assert_eq!(p.main_weapon().unwrap().bullet_count, 1);
        assert!(!p.bounce_weapons);
    }

    #[test]
    fn test_handle_input_thrust_and_aim() {
        let mut p = Player::new(Vec2::ZERO);
        let mut input = InputState::default();
        input.set(Action::MoveRight, true);
        input.set(Action::FireUp, true);
        p.handle_input(&input);
        assert_eq!(p.body.vector, Vec2::new(THRUST, 0.0));
        assert_eq!(p.heading, 0.0);
        let angle = p.fire_angle.unwrap();
        assert!((angle - (-std::f32::consts::FRAC_PI_2)).abs() < 1e-6);

        for _ in 0..50 {
            p.handle_input(&input);
        }
        assert!(p.body.vector.length() <= MAX_SPEED + 1e-4);

        input.clear();
        p.handle_input(&input);
        assert!(p.fire_angle.is_none());
        assert!(p.body.vector.length() < MAX_SPEED);
    }

    #[test]
    fn test_fire_primary_respects_recharge_and_count() {
        let mut p = Player::new(Vec2::new(100.0, 100.0));
        p.fire_angle = Some(0.0);
        let mut bullets = Vec::new();
        p.fire_primary(10, &mut bullets);
        assert_eq!(bullets.len(), 1);
        p.fire_primary(11, &mut bullets);
        assert_eq!(bullets.len(), 1);
        p.fire_primary(14, &mut bullets);
        assert_eq!(bullets.len(), 2);

        p.main_weapon_mut().unwrap().bullet_count = 3;
        p.fire_primary(18, &mut bullets);
        assert_eq!(bullets.len(), 5);
        assert!(bullets.iter().all(|b| b.is_player_bullet()));
    }

    #[test]
    fn test_dead_player_does_not_fire() {
        let mut p = Player::new(Vec2::ZERO);
        p.fire_angle = Some(0.0);
        p.damage_by(1000.0, 1);
        let mut bullets = Vec::new();
        p.fire_primary(10, &mut bullets);
        assert!(bullets.is_empty());
    }

    proptest! {
        #[test]
        fn prop_energy_stays_in_bounds(hits in proptest::collection::vec(0.0f32..80.0, 0..20)) {
            let mut p = Player::new(Vec2::ZERO);
            for (frame, hit) in hits.into_iter().enumerate() {
                p.damage_by(hit, frame as u64);
                prop_assert!(p.energy >= 0.0 && p.energy <= p.energy_max);
            }
        }
    }
}
