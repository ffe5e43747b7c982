//! Wave director: timed enemy population targets and weighted type selection

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One timed wave configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wave {
    /// Population the spawner fills toward
    pub enemy_max: usize,
    /// Weighted lookup table: a uniformly random entry is the enemy type
    pub enemy_weighting: Vec<u8>,
    /// Seconds before advancing; 0 = never (final wave)
    pub lifetime: u32,
}

impl Wave {
    pub fn new(enemy_max: usize, enemy_weighting: &[u8], lifetime: u32) -> Self {
        Self {
            enemy_max,
            enemy_weighting: enemy_weighting.to_vec(),
            lifetime,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum WaveTableError {
    #[error("wave table is empty")]
    Empty,
    #[error("final wave must have lifetime 0, found {0}")]
    FinalWaveTimed(u32),
    #[error("wave {0} has an empty weighting table")]
    EmptyWeighting(usize),
    #[error("wave {wave} names unknown enemy type {kind}")]
    UnknownEnemy { wave: usize, kind: u8 },
}

/// Validated wave sequence whose last entry never advances
#[derive(Debug, Clone, PartialEq)]
pub struct WaveTable {
    waves: Vec<Wave>,
}

impl WaveTable {
    pub fn new(waves: Vec<Wave>) -> Result<Self, WaveTableError> {
        let last = waves.last().ok_or(WaveTableError::Empty)?;
        if last.lifetime != 0 {
            return Err(WaveTableError::FinalWaveTimed(last.lifetime));
        }
        let kinds = super::enemy::EnemyParams::count();
        for (i, wave) in waves.iter().enumerate() {
            if wave.enemy_weighting.is_empty() {
                return Err(WaveTableError::EmptyWeighting(i));
            }
            if let Some(&kind) = wave.enemy_weighting.iter().find(|&&k| k as usize >= kinds) {
                return Err(WaveTableError::UnknownEnemy { wave: i, kind });
            }
        }
        Ok(Self { waves })
    }

    pub fn len(&self) -> usize {
        self.waves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waves.is_empty()
    }

    /// Panics past the final wave, which the director never advances beyond
    pub fn get(&self, index: usize) -> &Wave {
        match self.waves.get(index) {
            Some(wave) => wave,
            None => panic!("wave {index} is past the end of a {}-wave table", self.waves.len()),
        }
    }
}

impl Default for WaveTable {
    /// Eleven timed waves followed by an endless one
    fn default() -> Self {
        Self {
            waves: vec![
                Wave::new(5, &[0, 0, 0, 1, 1, 1, 2], 20),
                Wave::new(5, &[0, 0, 1, 1, 2, 3], 20),
                Wave::new(5, &[2], 10),
                Wave::new(8, &[0, 1, 1, 2, 2, 3, 3], 20),
                Wave::new(8, &[3], 10),
                Wave::new(10, &[1, 2, 5], 20),
                Wave::new(10, &[1, 1, 2, 2, 3, 5], 20),
                Wave::new(10, &[2, 4, 6], 10),
                Wave::new(10, &[1, 1, 2, 2, 4, 5], 20),
                Wave::new(10, &[3, 4, 6], 10),
                Wave::new(10, &[4, 5, 6], 20),
                Wave::new(12, &[1, 2, 3, 4, 5, 6], 0),
            ],
        }
    }
}

/// Tracks the active wave and how long it has run
#[derive(Debug, Clone)]
pub struct WaveDirector {
    table: WaveTable,
    current: usize,
    /// Wall-clock anchor (ms) of the active wave
    time_in_scene: f64,
}

impl WaveDirector {
    pub fn new(table: WaveTable, now_ms: f64) -> Self {
        Self {
            table,
            current: 0,
            time_in_scene: now_ms,
        }
    }

    /// Back to the first wave, anchored at `now_ms`
    pub fn reset(&mut self, now_ms: f64) {
        self.current = 0;
        self.time_in_scene = now_ms;
    }

    /// 0-based index of the active wave
    pub fn index(&self) -> usize {
        self.current
    }

    pub fn time_in_scene(&self) -> f64 {
        self.time_in_scene
    }

    pub fn current(&self) -> &Wave {
        self.table.get(self.current)
    }

    /// Whole seconds the active wave has run
    pub fn elapsed_secs(&self, now_ms: f64) -> u64 {
        ((now_ms - self.time_in_scene).max(0.0) / 1000.0) as u64
    }

    /// Advance when a timed wave has run its lifetime or a skip was requested.
    /// Returns the new wave's 1-based number when an advance happened.
    pub fn update(&mut self, now_ms: f64, skip: bool) -> Option<usize> {
        let lifetime = self.current().lifetime;
        if lifetime == 0 {
            return None;
        }
        let expired = now_ms >= self.time_in_scene + f64::from(lifetime) * 1000.0;
        if !(expired || skip) {
            return None;
        }
        self.current += 1;
        self.time_in_scene = now_ms;
        log::info!(
            "Wave {} begins (max {} enemies)",
            self.current + 1,
            self.current().enemy_max
        );
        Some(self.current + 1)
    }

    /// Enemies still needed to reach the active wave's population
    pub fn spawn_deficit(&self, live_enemies: usize) -> usize {
        self.current().enemy_max.saturating_sub(live_enemies)
    }

    /// Enemy type drawn uniformly from the weighting table
    pub fn choose_enemy_type(&self, rng: &mut impl Rng) -> u8 {
        let weighting = &self.current().enemy_weighting;
        weighting[rng.random_range(0..weighting.len())]
    }
}
