//! Arena5 - simulation core of a top-down arena shooter
//!
//! Core modules:
//! - `sim`: Actor simulation (integration, waves, collisions, scoring)
//! - `scene`: Attractor -> Game -> GameOver scene state machine
//! - `renderer`: Rendering surface and sprite cache collaborators
//! - `platform`: Input bindings and the frame time source
//! - `highscores`: Persistent high-score store
//! - `settings`: Configuration and debug flags

pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod sim;

pub use highscores::{HighScoreStore, MemoryStore, SCORE_KEY};
pub use scene::Arena;
pub use settings::{DebugFlags, Settings};

/// Game configuration constants
pub mod consts {
    /// Target host frame rate (frames per second)
    pub const TARGET_FPS: u32 = 40;

    /// Side length of the square logical arena
    pub const WORLD_SIZE: f32 = 1500.0;
    /// Default visible window side length
    pub const VIEW_SIZE: f32 = 1000.0;
    /// Camera zoom limits and step (`[` / `]` keys)
    pub const VIEW_SIZE_MIN: f32 = 500.0;
    pub const VIEW_SIZE_MAX: f32 = 1500.0;
    pub const VIEW_SIZE_STEP: f32 = 100.0;
    /// Fraction of the view treated as the camera dead-zone margin
    pub const VIEW_EDGE: f32 = 0.2;

    /// Default physical render size (pixels)
    pub const RENDER_WIDTH: f32 = 500.0;
    pub const RENDER_HEIGHT: f32 = 500.0;

    /// Frames the player stays dead before respawning
    pub const RESPAWN_DELAY_FRAMES: u64 = 100;

    /// Damped bounce applied to the player at the world edge
    pub const PLAYER_BOUNCE_DAMPING: f32 = 0.75;
    /// Damped reflection applied to other actors at the world edge
    pub const ACTOR_BOUNCE_DAMPING: f32 = 0.9;

    /// Share of a causing actor's velocity passed to an explosion
    pub const MOMENTUM_TRANSFER: f32 = 0.2;
    /// Share of an enemy's velocity imparted to the player on contact
    pub const ENEMY_IMPACT_TRANSFER: f32 = 0.5;
    /// Share of an enemy bullet's velocity imparted to the player
    pub const BULLET_IMPACT_TRANSFER: f32 = 0.2;

    /// Score thresholds for primary weapon upgrades
    pub const POWERUP_SCORE_1: u64 = 10_000;
    pub const POWERUP_SCORE_2: u64 = 50_000;

    /// Starting lives per play-through
    pub const INITIAL_LIVES: u32 = 1;
}

/// Degrees per radian (heading is kept in degrees)
pub const DEG_PER_RAD: f32 = 180.0 / std::f32::consts::PI;

/// Zero-pad a score to eight digits for display
pub fn pad_score(score: u64) -> String {
    format!("{score:08}")
}

/// Install the platform logger. Safe to call more than once.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

/// Install the platform logger. Safe to call more than once.
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_score() {
        assert_eq!(pad_score(0), "00000000");
        assert_eq!(pad_score(1234), "00001234");
    }
}
