//! Grid mechanics for the sliding-tile merge game.
//!
//! - [`Tile`]: a single cell value (0 = empty).
//! - [`Grid`]: the square tile matrix, its rotations and the slide-left primitive.
//! - [`Board`]: a game in progress with score, max tile, undo history and RNG.
//!
//! Every direction is reduced to a left slide on a rotated grid; see
//! [`Grid::slide`].
//!
//! ```
//! use model_2048::engine::{Board, Grid, Move};
//!
//! let mut board = Board::from_grid(Grid::from_rows([[2, 2, 4, 4], [0; 4], [0; 4], [0; 4]]), 7);
//! let outcome = board.apply_move(Move::Left);
//! assert!(outcome.changed);
//! assert_eq!(board.score(), 12);
//! assert_eq!(board.grid().row(0)[0].value(), 4);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

mod board;
mod grid;
mod tile;

pub use board::{Board, MoveOutcome, Spawn};
pub use grid::{compress_line, merge_line, Grid, GridError, SlideEffect};
pub use tile::{Tile, Value};

/// Accumulated game score.
pub type Score = u64;

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Left,
    Right,
    Up,
    Down,
}

impl Move {
    /// All directions, in the fixed priority order used to break ties.
    pub const ALL: [Move; 4] = [Move::Left, Move::Right, Move::Up, Move::Down];
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Move::Left => "left",
            Move::Right => "right",
            Move::Up => "up",
            Move::Down => "down",
        };
        f.write_str(s)
    }
}
