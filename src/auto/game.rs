use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{ConfigError, GameConfig};
use crate::engine::{Board, Score, Value};

/// How a driver chooses moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Policy {
    /// Greedy [`Board::auto_move`].
    #[default]
    Greedy,
    /// Uniformly random directions via [`Board::random_move`].
    Random,
}

/// Optional early-stop conditions for a game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameLimits {
    /// Stop after this many board-changing moves.
    pub max_moves: Option<u64>,
    /// Stop once the max tile reaches this value.
    pub target_tile: Option<Value>,
}

/// End-of-game numbers for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub seed: u64,
    pub moves: u64,
    pub score: Score,
    pub max_tile: Value,
    /// True if the game ended because no move was possible.
    pub game_over: bool,
}

/// Play one game from a fresh board until it is stuck or a limit is hit.
///
/// When `cfg.seed` is None a seed is drawn and reported in the summary, so
/// any game can be replayed.
pub fn play_game(cfg: &GameConfig, policy: Policy, limits: GameLimits) -> Result<GameSummary, ConfigError> {
    let seed = cfg.seed.unwrap_or_else(rand::random);
    let cfg = GameConfig { seed: Some(seed), ..cfg.clone() };
    Ok(play_board(Board::with_config(&cfg)?, seed, policy, limits))
}

fn play_board(mut board: Board, seed: u64, policy: Policy, limits: GameLimits) -> GameSummary {
    let mut moves: u64 = 0;
    while board.can_move() {
        if limits.max_moves.is_some_and(|cap| moves >= cap) {
            break;
        }
        if limits.target_tile.is_some_and(|t| board.max_tile() >= t) {
            break;
        }
        let changed = match policy {
            Policy::Greedy => board.auto_move().is_some_and(|o| o.changed),
            Policy::Random => board.random_move().changed,
        };
        if changed {
            moves += 1;
            if moves % 100 == 0 {
                debug!(seed, moves, score = board.score(), "game progress");
            }
        }
    }
    let summary = GameSummary {
        seed,
        moves,
        score: board.score(),
        max_tile: board.max_tile(),
        game_over: !board.can_move(),
    };
    info!(seed, moves, score = summary.score, max_tile = summary.max_tile, "game finished");
    summary
}
