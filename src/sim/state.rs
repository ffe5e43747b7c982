//! Process-lifetime game state shared by every scene
//!
//! Lives, score bookkeeping, the player singleton and the seeded RNG live
//! here; per-scene actors live in the scene that owns them.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::player::Player;
use crate::consts::*;

/// Complete cross-scene state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Single source of randomness for the simulation
    pub rng: Pcg32,
    /// The player ship, reused across respawns and play-throughs
    pub player: Player,
    pub lives: u32,
    pub score: u64,
    pub highscore: u64,
    /// Score of the play-through that just ended
    pub lastscore: u64,
    pub score_multiplier: u64,
}

impl GameState {
    /// Create a new game state with the given seed and the stored high score
    pub fn new(seed: u64, highscore: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::new(Vec2::splat(WORLD_SIZE / 2.0)),
            lives: INITIAL_LIVES,
            score: 0,
            highscore,
            lastscore: 0,
            score_multiplier: 1,
        }
    }

    /// Credit points, raising the high score when it is passed
    pub fn add_score(&mut self, points: u64) {
        self.score += points;
        if self.score > self.highscore {
            self.highscore = self.score;
        }
    }

    /// Game over once no lives remain and every effect has played out. On the
    /// transition the score is archived and the play-through counters reset.
    pub fn check_game_over(&mut self, pending_effects: usize) -> bool {
        let over = self.lives == 0 && pending_effects == 0;
        if over {
            self.lastscore = self.score;
            self.score = 0;
            self.score_multiplier = 1;
            self.lives = INITIAL_LIVES;
        }
        over
    }

    /// True when the last play-through set (or tied) the high score
    pub fn is_new_high_score(&self) -> bool {
        self.lastscore == self.highscore
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_score_raises_highscore() {
        let mut game = GameState::new(1, 20);
        game.add_score(15);
        assert_eq!(game.highscore, 20);
        game.add_score(10);
        assert_eq!(game.score, 25);
        assert_eq!(game.highscore, 25);
    }

    #[test]
    fn test_game_over_requires_no_lives_and_no_effects() {
        let mut game = GameState::new(1, 0);
        game.add_score(120);
        game.score_multiplier = 4;
        assert!(!game.check_game_over(0));
        game.lives = 0;
        assert!(!game.check_game_over(3));
        assert_eq!(game.score, 120);

        assert!(game.check_game_over(0));
        assert_eq!(game.lastscore, 120);
        assert_eq!(game.score, 0);
        assert_eq!(game.score_multiplier, 1);
        assert_eq!(game.lives, 1);
        assert!(game.is_new_high_score());
    }

    #[test]
    fn test_same_seed_same_rng() {
        use rand::Rng;
        let mut a = GameState::new(42, 0);
        let mut b = GameState::new(42, 0);
        let xa: u32 = a.rng.random();
        let xb: u32 = b.rng.random();
        assert_eq!(xa, xb);
    }
}
