use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, trace};

use super::grid::Grid;
use super::tile::{Tile, Value};
use super::{Move, Score};
use crate::config::{ConfigError, GameConfig};

/// Pre-move state kept for undo.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Snapshot {
    grid: Grid,
    score: Score,
}

/// A tile placed after a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawn {
    pub row: usize,
    pub col: usize,
    pub value: Value,
}

/// Result of a single committed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub direction: Move,
    /// False when the move could not slide or merge anything.
    pub changed: bool,
    /// Points earned by merges in this move.
    pub gained: Score,
    pub spawned: Option<Spawn>,
}

/// A game in progress.
///
/// Owns the grid, the score, the largest tile ever produced and an undo
/// stack of `(grid, score)` snapshots. Moves mutate in place; a move that
/// changes the grid spawns exactly one new tile.
///
/// A move that changes nothing leaves its snapshot on the stack marked as
/// pending: it is not counted by [`Board::undo_depth`], the next move reuses
/// it, and [`Board::rollback`] discards it before undoing a real move.
#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    score: Score,
    max_tile: Value,
    history: Vec<Snapshot>,
    pending_snapshot: bool,
    four_probability: f64,
    rng: StdRng,
}

impl Board {
    /// Classic 4x4 game seeded from OS entropy, with two tiles already placed.
    pub fn new() -> Self {
        let cfg = GameConfig::default();
        Self::build(&cfg)
    }

    /// A fresh game for the given configuration.
    ///
    /// ```
    /// use model_2048::{engine::Board, GameConfig};
    /// let board = Board::with_config(&GameConfig { dimension: 5, ..GameConfig::seeded(3) }).unwrap();
    /// assert_eq!(board.dimension(), 5);
    /// assert_eq!(board.grid().count_empty(), 23);
    /// ```
    pub fn with_config(cfg: &GameConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        Ok(Self::build(cfg))
    }

    fn build(cfg: &GameConfig) -> Self {
        let mut board = Board {
            grid: Grid::empty(cfg.dimension),
            score: 0,
            max_tile: 0,
            history: Vec::new(),
            pending_snapshot: false,
            four_probability: cfg.four_probability,
            rng: cfg.rng(),
        };
        board.reset_game_tiles();
        board
    }

    /// Start from an explicit grid (no tiles are spawned). Score starts at 0.
    pub fn from_grid(grid: Grid, seed: u64) -> Self {
        Board {
            max_tile: grid.highest_tile(),
            grid,
            score: 0,
            history: Vec::new(),
            pending_snapshot: false,
            four_probability: GameConfig::default().four_probability,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid { &self.grid }

    #[inline]
    pub fn score(&self) -> Score { self.score }

    /// Largest tile value produced during this game.
    #[inline]
    pub fn max_tile(&self) -> Value { self.max_tile }

    #[inline]
    pub fn dimension(&self) -> usize { self.grid.dimension() }

    /// Number of moves that can currently be undone.
    #[inline]
    pub fn undo_depth(&self) -> usize { self.history.len() - usize::from(self.pending_snapshot) }

    /// Clear the grid, score and history, then place two random tiles.
    pub fn reset_game_tiles(&mut self) {
        self.grid = Grid::empty(self.grid.dimension());
        self.score = 0;
        self.max_tile = 0;
        self.history.clear();
        self.pending_snapshot = false;
        self.add_tile();
        self.add_tile();
        debug!(dim = self.grid.dimension(), "game reset");
    }

    pub fn move_left(&mut self) -> MoveOutcome { self.apply_move(Move::Left) }

    pub fn move_right(&mut self) -> MoveOutcome { self.apply_move(Move::Right) }

    pub fn move_up(&mut self) -> MoveOutcome { self.apply_move(Move::Up) }

    pub fn move_down(&mut self) -> MoveOutcome { self.apply_move(Move::Down) }

    /// Slide and merge in `direction`, spawning a tile if anything changed.
    pub fn apply_move(&mut self, direction: Move) -> MoveOutcome {
        if !self.pending_snapshot {
            self.save_state();
        }
        let effect = self.grid.slide(direction);
        self.score += effect.gained;
        self.max_tile = self.max_tile.max(effect.highest_merge);

        let spawned = if effect.changed {
            self.pending_snapshot = false;
            self.add_tile()
        } else {
            self.pending_snapshot = true;
            None
        };
        debug!(%direction, changed = effect.changed, gained = effect.gained, score = self.score, "move applied");
        MoveOutcome { direction, changed: effect.changed, gained: effect.gained, spawned }
    }

    /// Apply one of the four directions chosen uniformly at random.
    pub fn random_move(&mut self) -> MoveOutcome {
        let direction = Move::ALL[self.rng.gen_range(0..Move::ALL.len())];
        self.apply_move(direction)
    }

    /// True if the grid differs from the most recent snapshot.
    pub fn has_changed(&self) -> bool {
        self.history.last().is_some_and(|prev| prev.grid != self.grid)
    }

    /// Restore the state before the last effective move. Returns false when
    /// there is nothing to undo.
    pub fn rollback(&mut self) -> bool {
        if self.pending_snapshot {
            self.history.pop();
            self.pending_snapshot = false;
        }
        match self.history.pop() {
            Some(Snapshot { grid, score }) => {
                self.grid = grid;
                self.score = score;
                debug!(score = self.score, depth = self.history.len(), "rolled back");
                true
            }
            None => false,
        }
    }

    /// False once no move can change the grid.
    pub fn can_move(&self) -> bool { self.grid.can_move() }

    fn save_state(&mut self) {
        self.history.push(Snapshot { grid: self.grid.clone(), score: self.score });
    }

    /// Place a 2 (or, with `four_probability`, a 4) in a uniformly chosen empty cell.
    fn add_tile(&mut self) -> Option<Spawn> {
        let empties = self.grid.empty_indices();
        if empties.is_empty() {
            return None;
        }
        let idx = empties[self.rng.gen_range(0..empties.len())];
        let value = if self.rng.gen_bool(self.four_probability) { 4 } else { 2 };
        self.grid.set_index(idx, Tile::new(value));
        self.max_tile = self.max_tile.max(value);
        let dim = self.grid.dimension();
        let spawn = Spawn { row: idx / dim, col: idx % dim, value };
        trace!(?spawn, "tile spawned");
        Some(spawn)
    }
}

impl Default for Board {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: [[Value; 4]; 4]) -> Board { Board::from_grid(Grid::from_rows(rows), 42) }

    #[test]
    fn reset_places_two_tiles() {
        let b = Board::with_config(&GameConfig::seeded(1)).unwrap();
        assert_eq!(b.grid().count_empty(), 14);
        assert_eq!(b.score(), 0);
        assert_eq!(b.undo_depth(), 0);
        assert!(b.max_tile() == 2 || b.max_tile() == 4);
        assert!(b.grid().tiles().iter().all(|t| t.is_empty() || t.value() == 2 || t.value() == 4));
    }

    #[test]
    fn merge_scores_without_cascade() {
        let mut b = board([[2, 2, 2, 2], [0; 4], [0; 4], [0; 4]]);
        let out = b.move_left();
        assert!(out.changed);
        assert_eq!(out.gained, 8);
        assert_eq!(b.score(), 8);
        let spawn = out.spawned.unwrap();
        let mut settled = b.grid().clone();
        settled.set(spawn.row, spawn.col, Tile::EMPTY);
        assert_eq!(&settled.to_values()[..4], &[4, 4, 0, 0]);
        assert_eq!(b.max_tile(), 4);
    }

    #[test]
    fn changed_move_spawns_one_tile() {
        let mut b = board([[2, 2, 4, 4], [0; 4], [0; 4], [0; 4]]);
        let out = b.move_left();
        assert_eq!(b.score(), 12);
        // Two merged tiles in row 0 plus the spawn.
        assert_eq!(16 - b.grid().count_empty(), 3);
        let spawn = out.spawned.unwrap();
        assert!(spawn.value == 2 || spawn.value == 4);
        assert_eq!(b.grid().get(spawn.row, spawn.col).value(), spawn.value);
    }

    #[test]
    fn noop_move_leaves_no_trace() {
        let mut b = board([[2, 4, 8, 16], [0; 4], [0; 4], [0; 4]]);
        let before = b.grid().clone();
        let out = b.move_left();
        assert!(!out.changed);
        assert!(out.spawned.is_none());
        assert_eq!(b.grid(), &before);
        assert_eq!(b.score(), 0);
        assert_eq!(b.undo_depth(), 0);
        assert!(!b.has_changed());
        // A second no-op reuses the pending snapshot.
        b.move_up();
        assert_eq!(b.undo_depth(), 0);
    }

    #[test]
    fn rollback_restores_grid_and_score() {
        let mut b = board([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let before = b.grid().clone();
        b.move_left();
        assert!(b.has_changed());
        assert_eq!(b.undo_depth(), 1);
        assert!(b.rollback());
        assert_eq!(b.grid(), &before);
        assert_eq!(b.score(), 0);
        assert_eq!(b.undo_depth(), 0);
        // Max tile is a high-water mark and survives rollback.
        assert_eq!(b.max_tile(), 4);
    }

    #[test]
    fn rollback_on_empty_stack_is_noop() {
        let mut b = board([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let before = b.grid().clone();
        assert!(!b.rollback());
        assert_eq!(b.grid(), &before);
        assert_eq!(b.score(), 0);
    }

    #[test]
    fn rollback_skips_pending_noop() {
        // Moving up fills the only gap; the spawn then lands in the last
        // empty cell and leaves a stuck board whatever its value.
        let mut b = board([[2, 4, 2, 4], [4, 2, 4, 2], [0, 4, 2, 4], [8, 8, 4, 2]]);
        let start = b.grid().clone();
        let out = b.move_up();
        assert_eq!(out.spawned.map(|s| (s.row, s.col)), Some((3, 0)));
        assert!(!b.can_move());

        let stuck = b.grid().clone();
        assert!(!b.move_left().changed);
        assert_eq!(b.grid(), &stuck);
        assert_eq!(b.undo_depth(), 1);

        assert!(b.rollback());
        assert_eq!(b.grid(), &start);
        assert_eq!(b.undo_depth(), 0);
        assert!(!b.rollback());
    }

    #[test]
    fn pending_snapshot_becomes_real() {
        let mut b = board([[2, 4, 8, 16], [0; 4], [0; 4], [0; 4]]);
        let start = b.grid().clone();
        assert!(!b.move_left().changed);
        assert!(b.move_down().changed);
        assert_eq!(b.undo_depth(), 1);
        assert!(b.rollback());
        assert_eq!(b.grid(), &start);
    }

    #[test]
    fn has_changed_false_without_history() {
        let b = board([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert!(!b.has_changed());
    }

    #[test]
    fn full_board_move_spawns_nothing() {
        let mut b = board([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        assert!(!b.can_move());
        for dir in Move::ALL {
            let out = b.apply_move(dir);
            assert!(!out.changed);
            assert!(out.spawned.is_none());
        }
        assert_eq!(b.undo_depth(), 0);
    }

    #[test]
    fn each_direction_matches_grid_slide() {
        let rows = [[2, 2, 4, 2], [4, 8, 0, 0], [8, 8, 0, 0], [16, 4, 4, 4]];
        for dir in Move::ALL {
            let mut b = board(rows);
            let (expected, effect) = Grid::from_rows(rows).slid(dir);
            let out = b.apply_move(dir);
            assert_eq!(out.gained, effect.gained);
            let spawn = out.spawned.unwrap();
            let mut without_spawn = b.grid().clone();
            without_spawn.set(spawn.row, spawn.col, Tile::EMPTY);
            assert_eq!(without_spawn, expected, "direction {dir}");
        }
    }

    #[test]
    fn seeded_games_are_reproducible() {
        let mut a = Board::with_config(&GameConfig::seeded(99)).unwrap();
        let mut b = Board::with_config(&GameConfig::seeded(99)).unwrap();
        for _ in 0..50 {
            a.random_move();
            b.random_move();
        }
        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.score(), b.score());
    }

    #[test]
    fn reset_clears_progress() {
        let mut b = Board::with_config(&GameConfig::seeded(5)).unwrap();
        for _ in 0..20 {
            b.random_move();
        }
        b.reset_game_tiles();
        assert_eq!(b.score(), 0);
        assert_eq!(b.undo_depth(), 0);
        assert_eq!(b.grid().count_empty(), 14);
    }

    #[test]
    fn rejects_invalid_config() {
        let cfg = GameConfig { dimension: 0, ..GameConfig::default() };
        assert!(matches!(Board::with_config(&cfg), Err(ConfigError::Dimension(0))));
    }
}
