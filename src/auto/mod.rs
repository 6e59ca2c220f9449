//! Greedy auto-play for [`Board`].
//!
//! Each direction is scored with a [`MoveEfficiency`]: how many empty cells the
//! move would leave (after its spawned tile) and what the game score would be.
//! The best direction by [`compare`] is then played for real.
//!
//! Notes
//! - Candidates are evaluated on copies of the grid. Evaluation never touches
//!   the board, its undo stack or its RNG, so only the committed move leaves a
//!   snapshot behind.
//! - Ties go to the earliest direction in [`Move::ALL`] (left, right, up, down).
//!
//! ```
//! use model_2048::engine::{Board, Grid, Move};
//!
//! let mut board = Board::from_grid(Grid::from_rows([[2, 2, 0, 0], [4, 0, 0, 0], [0; 4], [0; 4]]), 1);
//! let chosen = board.auto_move().map(|o| o.direction);
//! assert_eq!(chosen, Some(Move::Left));
//! assert_eq!(board.undo_depth(), 1);
//! ```

use tracing::debug;

use crate::engine::{Board, Move, MoveOutcome};

mod efficiency;
mod game;

pub use efficiency::{compare, select_best, MoveEfficiency};
pub use game::{play_game, GameLimits, GameSummary, Policy};

impl Board {
    /// Score `direction` without changing the board.
    pub fn move_efficiency(&self, direction: Move) -> MoveEfficiency {
        let (next, effect) = self.grid().slid(direction);
        if !effect.changed {
            return MoveEfficiency::no_effect(direction);
        }
        // A changed slide always leaves at least one gap, and the real move
        // fills one of them with its spawn.
        let empty_tiles = next.count_empty().saturating_sub(1);
        MoveEfficiency {
            empty_tiles: i32::try_from(empty_tiles).unwrap_or(i32::MAX),
            score: self.score() + effect.gained,
            direction,
        }
    }

    /// Efficiencies for every direction in [`Move::ALL`] order.
    pub fn move_efficiencies(&self) -> [MoveEfficiency; 4] {
        Move::ALL.map(|dir| self.move_efficiency(dir))
    }

    /// Best direction for the current board, or None if nothing can move.
    pub fn best_move(&self) -> Option<Move> {
        select_best(self.move_efficiencies())
            .filter(MoveEfficiency::is_legal)
            .map(|e| e.direction)
    }

    /// Play the best-ranked direction. Returns None without touching the
    /// board when no direction changes it.
    pub fn auto_move(&mut self) -> Option<MoveOutcome> {
        let candidates = self.move_efficiencies();
        let best = select_best(candidates).filter(MoveEfficiency::is_legal)?;
        debug!(direction = %best.direction, empty = best.empty_tiles, score = best.score, "auto move");
        Some(self.apply_move(best.direction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Grid, Value};
    use crate::GameConfig;

    fn board(rows: [[Value; 4]; 4]) -> Board { Board::from_grid(Grid::from_rows(rows), 11) }

    #[test]
    fn efficiency_counts_spawn() {
        let b = board([[2, 2, 4, 4], [0; 4], [0; 4], [0; 4]]);
        let e = b.move_efficiency(Move::Left);
        // 14 gaps after merging, one of them taken by the spawn.
        assert_eq!(e.empty_tiles, 13);
        assert_eq!(e.score, 12);
    }

    #[test]
    fn blocked_direction_is_sentinel() {
        let b = board([[2, 4, 8, 16], [0; 4], [0; 4], [0; 4]]);
        assert_eq!(b.move_efficiency(Move::Left), MoveEfficiency::no_effect(Move::Left));
        assert_eq!(b.move_efficiency(Move::Up), MoveEfficiency::no_effect(Move::Up));
        assert!(b.move_efficiency(Move::Down).is_legal());
    }

    #[test]
    fn prefers_merging_direction() {
        // Only vertical moves merge the two 8s.
        let b = board([[8, 2, 0, 0], [8, 4, 0, 0], [0; 4], [0; 4]]);
        let effs = b.move_efficiencies();
        assert!(!effs[0].is_legal());
        assert_eq!(effs[1].empty_tiles, 11);
        assert_eq!((effs[2].empty_tiles, effs[2].score), (12, 16));
        assert_eq!((effs[3].empty_tiles, effs[3].score), (12, 16));
        assert_eq!(b.best_move(), Some(Move::Up));
    }

    #[test]
    fn ties_go_to_earlier_direction() {
        // Left and right both merge the pair into one tile with equal score.
        let b = board([[0, 2, 2, 0], [0; 4], [0; 4], [0; 4]]);
        assert_eq!(compare(&b.move_efficiency(Move::Left), &b.move_efficiency(Move::Right)), std::cmp::Ordering::Equal);
        assert_eq!(b.best_move(), Some(Move::Left));
    }

    #[test]
    fn auto_move_commits_exactly_one_snapshot() {
        let mut b = Board::with_config(&GameConfig::seeded(21)).unwrap();
        for expected_depth in 1..=10 {
            let before = b.grid().clone();
            let out = b.auto_move().unwrap();
            assert!(out.changed);
            assert_eq!(b.undo_depth(), expected_depth);
            assert!(b.has_changed());
            assert_ne!(b.grid(), &before);
        }
    }

    #[test]
    fn evaluation_does_not_mutate() {
        let b = Board::with_config(&GameConfig::seeded(8)).unwrap();
        let grid = b.grid().clone();
        let _ = b.move_efficiencies();
        assert_eq!(b.grid(), &grid);
        assert_eq!(b.undo_depth(), 0);

        // Evaluation draws nothing from the RNG: two copies stay in lockstep.
        let mut evaluated = b.clone();
        let mut untouched = b.clone();
        let _ = evaluated.best_move();
        evaluated.move_left();
        untouched.move_left();
        assert_eq!(evaluated.grid(), untouched.grid());
    }

    #[test]
    fn auto_move_on_stuck_board() {
        let mut b = board([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        assert_eq!(b.best_move(), None);
        assert!(b.auto_move().is_none());
        assert_eq!(b.undo_depth(), 0);
    }
}
