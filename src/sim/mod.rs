//! Deterministic actor simulation
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! host dependencies:
//! - Time comes in as an explicit frame count and wall-clock value
//! - Randomness comes only from the game state's seeded RNG
//! - Pools are visited in a fixed order

pub mod actor;
pub mod bullet;
pub mod collectable;
pub mod collision;
pub mod effect;
pub mod enemy;
pub mod integrate;
pub mod player;
pub mod state;
pub mod vector;
pub mod wave;
pub mod world;

pub use actor::{Actor, ActorPools, Body};
pub use bullet::{Bullet, BulletKind};
pub use collectable::{Collectable, CollectableKind};
pub use collision::{
    collide, destroy_enemy, detect_player, detect_player_bullets, generate_multiplier,
};
pub use effect::{Effect, EffectKind};
pub use enemy::{EnemyParams, EnemyShip};
pub use integrate::{integrate, reflect_at_edges};
pub use player::{Player, PrimaryWeapon};
pub use state::GameState;
pub use vector::VectorExt;
pub use wave::{Wave, WaveDirector, WaveTable, WaveTableError};
pub use world::World;
