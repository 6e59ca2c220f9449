use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Smallest grid on which tiles can slide past each other.
pub const MIN_DIMENSION: usize = 2;

/// Configurable knobs for a game. Defaults reproduce the classic 4x4 game.
///
/// - `dimension`: side length of the square grid.
/// - `seed`: RNG seed for spawns and random moves (None draws from OS entropy).
/// - `four_probability`: chance that a spawned tile is a 4 instead of a 2.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub dimension: usize,
    pub seed: Option<u64>,
    pub four_probability: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { dimension: 4, seed: None, four_probability: 0.1 }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("grid dimension {0} is below the minimum of 2")]
    Dimension(usize),
    #[error("spawn probability {0} is outside [0, 1]")]
    SpawnProbability(f64),
}

impl GameConfig {
    /// Seeded config with otherwise default settings.
    pub fn seeded(seed: u64) -> Self { Self { seed: Some(seed), ..Self::default() } }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dimension < MIN_DIMENSION {
            return Err(ConfigError::Dimension(self.dimension));
        }
        if !(0.0..=1.0).contains(&self.four_probability) {
            return Err(ConfigError::SpawnProbability(self.four_probability));
        }
        Ok(())
    }

    pub(crate) fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
