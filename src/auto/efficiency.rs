use std::cmp::Ordering;

use crate::engine::{Move, Score};

/// How good a candidate move looks: more empty cells first, then higher score.
///
/// `empty_tiles == -1` marks a move that would not change the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveEfficiency {
    pub empty_tiles: i32,
    pub score: Score,
    pub direction: Move,
}

impl MoveEfficiency {
    /// Efficiency of a move that leaves the board untouched.
    pub const fn no_effect(direction: Move) -> Self {
        MoveEfficiency { empty_tiles: -1, score: 0, direction }
    }

    #[inline]
    pub fn is_legal(&self) -> bool { self.empty_tiles >= 0 }
}

/// Lexicographic comparison on `(empty_tiles, score)`. Direction is ignored,
/// so different moves can compare equal.
pub fn compare(a: &MoveEfficiency, b: &MoveEfficiency) -> Ordering {
    a.empty_tiles.cmp(&b.empty_tiles).then_with(|| a.score.cmp(&b.score))
}

/// Pick the best candidate. The first of several equal maxima wins, so the
/// order of `candidates` is the tie-break priority.
pub fn select_best<I>(candidates: I) -> Option<MoveEfficiency>
where
    I: IntoIterator<Item = MoveEfficiency>,
{
    candidates.into_iter().fold(None, |best, e| match best {
        Some(b) if compare(&e, &b) != Ordering::Greater => Some(b),
        _ => Some(e),
    })
}
