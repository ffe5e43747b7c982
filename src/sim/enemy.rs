//! Enemy ships: parameter table, spawning and per-type behaviour

use glam::Vec2;
use rand::Rng;

use super::actor::{Actor, Body};
use super::bullet::Bullet;
use super::vector::{VectorExt, from_angle};
use super::world::World;
use crate::DEG_PER_RAD;

/// Enemy type ids used by wave weighting tables
pub const ENEMY_DUMBO: u8 = 0;
pub const ENEMY_ZONER: u8 = 1;
pub const ENEMY_TRACKER: u8 = 2;
pub const ENEMY_BORG: u8 = 3;
pub const ENEMY_DODGER: u8 = 4;
pub const ENEMY_SPLITTER: u8 = 5;
pub const ENEMY_BOMBER: u8 = 6;

/// Per-type parameters, looked up by type id
#[derive(Debug, Clone, Copy)]
pub struct EnemyParams {
    pub name: &'static str,
    pub radius: f32,
    pub hit_points: f32,
    /// Cruise speed (units per frame)
    pub speed: f32,
    /// Energy removed from the player on contact
    pub collision_damage: f32,
    /// Score bracket: destroying awards `(scoretype + 1) * 5 * multiplier`
    pub scoretype: u32,
    pub drops_multiplier: bool,
    /// Heading change per frame (degrees)
    pub spin: f32,
    /// Frames between shots or mines; 0 = never
    pub fire_interval: u32,
    /// Sprite-cache id for explosion particles
    pub particle_sprite: &'static str,
}

static ENEMY_TABLE: [EnemyParams; 7] = [
    EnemyParams { name: "dumbo",    radius: 16.0, hit_points: 1.0, speed: 3.0, collision_damage: 20.0, scoretype: 0, drops_multiplier: true, spin: 2.0,  fire_interval: 0,  particle_sprite: "points_rgb(255,125,50)" },
    EnemyParams { name: "zoner",    radius: 14.0, hit_points: 1.0, speed: 4.0, collision_damage: 20.0, scoretype: 1, drops_multiplier: true, spin: 6.0,  fire_interval: 0,  particle_sprite: "points_rgb(255,125,50)" },
    EnemyParams { name: "tracker",  radius: 14.0, hit_points: 2.0, speed: 5.0, collision_damage: 25.0, scoretype: 2, drops_multiplier: true, spin: 0.0,  fire_interval: 0,  particle_sprite: "points_rgb(255,96,0)" },
    EnemyParams { name: "borg",     radius: 20.0, hit_points: 5.0, speed: 2.0, collision_damage: 30.0, scoretype: 3, drops_multiplier: true, spin: 1.0,  fire_interval: 60, particle_sprite: "points_rgb(0,255,64)" },
    EnemyParams { name: "dodger",   radius: 12.0, hit_points: 1.0, speed: 6.0, collision_damage: 20.0, scoretype: 3, drops_multiplier: true, spin: 0.0,  fire_interval: 0,  particle_sprite: "points_rgb(255,125,50)" },
    EnemyParams { name: "splitter", radius: 22.0, hit_points: 4.0, speed: 2.5, collision_damage: 30.0, scoretype: 4, drops_multiplier: true, spin: -3.0, fire_interval: 0,  particle_sprite: "points_rgb(148,0,255)" },
    EnemyParams { name: "bomber",   radius: 18.0, hit_points: 3.0, speed: 3.0, collision_damage: 25.0, scoretype: 5, drops_multiplier: true, spin: 4.0,  fire_interval: 80, particle_sprite: "points_rgb(255,0,255)" },
];

impl EnemyParams {
    /// Parameters for a type id; out-of-range ids are a logic error
    pub fn get(kind: u8) -> &'static EnemyParams {
        &ENEMY_TABLE[kind as usize]
    }

    pub fn count() -> usize {
        ENEMY_TABLE.len()
    }
}

/// Frames between course changes for a zoner
const ZONER_TURN_FRAMES: u32 = 60;
/// Steering strength toward the player for trackers
const TRACKER_STEER: f32 = 0.15;
/// Speed of bullets fired by enemies
const ENEMY_BULLET_SPEED: f32 = 8.0;

#[derive(Debug, Clone, PartialEq)]
pub struct EnemyShip {
    pub body: Body,
    /// Type id, selects behaviour and visuals
    pub kind: u8,
    pub hit_points: f32,
    pub scoretype: u32,
    pub drops_multiplier: bool,
    /// Degrees
    pub heading: f32,
    pub alive: bool,
    /// Frames since spawn
    pub age: u32,
}

impl EnemyShip {
    pub fn new(kind: u8, position: Vec2, vector: Vec2) -> Self {
        let params = EnemyParams::get(kind);
        Self {
            body: Body::new(position, vector, params.radius),
            kind,
            hit_points: params.hit_points,
            scoretype: params.scoretype,
            drops_multiplier: params.drops_multiplier,
            heading: vector.y.atan2(vector.x) * DEG_PER_RAD,
            alive: true,
            age: 0,
        }
    }

    /// Enter from a random world edge, heading inward with some spread
    pub fn spawn(kind: u8, world: &World, rng: &mut impl Rng) -> Self {
        let params = EnemyParams::get(kind);
        let inset = params.radius;
        let along = rng.random_range(inset..world.size - inset);
        let (position, inward) = match rng.random_range(0..4) {
            0 => (Vec2::new(along, inset), std::f32::consts::FRAC_PI_2),
            1 => (Vec2::new(world.size - inset, along), std::f32::consts::PI),
            2 => (Vec2::new(along, world.size - inset), -std::f32::consts::FRAC_PI_2),
            _ => (Vec2::new(inset, along), 0.0),
        };
        let angle = inward + rng.random_range(-0.8..0.8);
        Self::new(kind, position, from_angle(angle) * params.speed)
    }

    pub fn params(&self) -> &'static EnemyParams {
        EnemyParams::get(self.kind)
    }

    pub fn collision_damage(&self) -> f32 {
        self.params().collision_damage
    }

    /// Apply damage; true when this destroyed the ship
    pub fn damage_by(&mut self, power: f32) -> bool {
        self.hit_points -= power;
        if self.hit_points <= 0.0 {
            self.kill();
            return true;
        }
        false
    }

    /// Instant destruction, regardless of hit points
    pub fn kill(&mut self) {
        self.hit_points = 0.0;
        self.alive = false;
    }

    /// Per-type behaviour for this frame. `target` is the live player's
    /// position, `None` while the player is dead. Returns any projectile the
    /// ship released.
    pub fn think(&mut self, target: Option<Vec2>, rng: &mut impl Rng) -> Option<Bullet> {
        let params = self.params();
        self.heading += params.spin;

        match self.kind {
            ENEMY_ZONER => {
                if self.age > 0 && self.age % ZONER_TURN_FRAMES == 0 {
                    let turn = rng.random_range(-1.5..1.5);
                    self.body.vector.rotate_by(turn);
                }
            }
            ENEMY_TRACKER => {
                if let Some(target) = target {
                    let to_target = (target - self.body.position).normalize_or_zero();
                    let v = &mut self.body.vector;
                    *v += to_target * TRACKER_STEER;
                    if v.length() > params.speed {
                        *v = v.normalize() * params.speed;
                    }
                    self.heading = v.y.atan2(v.x) * DEG_PER_RAD;
                }
            }
            ENEMY_DODGER => {
                if let Some(target) = target {
                    // Circle the player rather than close in
                    let to_target = (target - self.body.position).normalize_or_zero();
                    let strafe = Vec2::new(-to_target.y, to_target.x) * params.speed;
                    self.body.vector = self.body.vector.lerp(strafe, 0.05);
                    self.heading = to_target.y.atan2(to_target.x) * DEG_PER_RAD;
                }
            }
            _ => {}
        }

        let fired = match (params.fire_interval, target) {
            (0, _) | (_, None) => None,
            (interval, Some(target)) if self.age > 0 && self.age % interval == 0 => {
                if self.kind == ENEMY_BOMBER {
                    Some(Bullet::mine(self.body.position))
                } else {
                    let dir = (target - self.body.position).normalize_or_zero();
                    Some(Bullet::enemy(
                        self.body.position + dir * self.body.radius,
                        dir * ENEMY_BULLET_SPEED,
                    ))
                }
            }
            _ => None,
        };

        self.age += 1;
        fired
    }

    /// Hook run when the player destroys this ship. Returns any ships that
    /// replace it.
    pub fn on_destroyed(&self, rng: &mut impl Rng) -> Vec<EnemyShip> {
        if self.kind != ENEMY_SPLITTER {
            return Vec::new();
        }
        let speed = EnemyParams::get(ENEMY_DUMBO).speed;
        let base = if self.body.vector == Vec2::ZERO {
            rng.random_range(-std::f32::consts::PI..std::f32::consts::PI)
        } else {
            self.body.vector.y.atan2(self.body.vector.x)
        };
        [-std::f32::consts::FRAC_PI_2, std::f32::consts::FRAC_PI_2]
            .into_iter()
            .map(|turn| {
                let mut child = EnemyShip::new(
                    ENEMY_DUMBO,
                    self.body.position,
                    from_angle(base + turn) * speed,
                );
                child.drops_multiplier = false;
                child
            })
            .collect()
    }
}

impl Actor for EnemyShip {
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
