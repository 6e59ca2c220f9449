use serde::{Deserialize, Serialize};
use std::fmt;

use super::tile::{Tile, Value};
use super::{Move, Score};

/// Square matrix of tiles stored row-major.
///
/// The dimension is fixed at construction. All directional slides are
/// expressed as a left slide on a rotated copy, so the only line-level
/// primitives are [`compress_line`] and [`merge_line`].
///
/// Deserialization goes through [`Grid::from_values`], so a decoded grid
/// always holds `dim * dim` cells with `dim >= 1`.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "GridRepr")]
pub struct Grid {
    dim: usize,
    cells: Vec<Tile>,
}

/// Wire shape of a [`Grid`] before validation.
#[derive(Deserialize)]
struct GridRepr {
    dim: usize,
    cells: Vec<Value>,
}

impl TryFrom<GridRepr> for Grid {
    type Error = GridError;

    fn try_from(repr: GridRepr) -> Result<Self, Self::Error> { Grid::from_values(repr.dim, &repr.cells) }
}

/// Why a set of values does not form a grid.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid dimension must be at least 1")]
    ZeroDimension,
    #[error("dimension {dim} needs {expected} cells, got {got}")]
    CellCount { dim: usize, expected: usize, got: usize },
    #[error("tile value {0} is neither 0 nor a power of two")]
    TileValue(Value),
}

/// What a slide did to a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlideEffect {
    /// True if any tile moved or merged.
    pub changed: bool,
    /// Sum of the values produced by merges.
    pub gained: Score,
    /// Largest value produced by a merge (0 if none).
    pub highest_merge: Value,
}

impl SlideEffect {
    fn absorb(&mut self, other: SlideEffect) {
        self.changed |= other.changed;
        self.gained += other.gained;
        self.highest_merge = self.highest_merge.max(other.highest_merge);
    }
}

impl Grid {
    /// An all-empty grid of the given dimension.
    ///
    /// # Panics
    /// If `dim` is 0.
    pub fn empty(dim: usize) -> Self {
        assert!(dim > 0, "grid dimension must be at least 1");
        Grid { dim, cells: vec![Tile::EMPTY; dim * dim] }
    }

    /// Build a grid from literal rows, mostly useful in tests and drivers.
    ///
    /// ```
    /// use model_2048::engine::Grid;
    /// let g = Grid::from_rows([[2, 4], [4, 2]]);
    /// assert_eq!(g.dimension(), 2);
    /// assert_eq!(g.get(1, 0).value(), 4);
    /// ```
    ///
    /// # Panics
    /// If `N` is 0.
    pub fn from_rows<const N: usize>(rows: [[Value; N]; N]) -> Self {
        assert!(N > 0, "grid dimension must be at least 1");
        let cells = rows.iter().flat_map(|r| r.iter().copied().map(Tile::new)).collect();
        Grid { dim: N, cells }
    }

    /// Build a grid from row-major values, checking the shape and that every
    /// value is 0 or a power of two.
    pub fn from_values(dim: usize, values: &[Value]) -> Result<Self, GridError> {
        if dim == 0 {
            return Err(GridError::ZeroDimension);
        }
        let expected = dim * dim;
        if values.len() != expected {
            return Err(GridError::CellCount { dim, expected, got: values.len() });
        }
        if let Some(&bad) = values.iter().find(|&&v| v != 0 && !v.is_power_of_two()) {
            return Err(GridError::TileValue(bad));
        }
        Ok(Grid { dim, cells: values.iter().copied().map(Tile::new).collect() })
    }

    #[inline]
    pub fn dimension(&self) -> usize { self.dim }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Tile { self.cells[row * self.dim + col] }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, tile: Tile) {
        self.cells[row * self.dim + col] = tile;
    }

    /// Borrow one row.
    #[inline]
    pub fn row(&self, row: usize) -> &[Tile] {
        &self.cells[row * self.dim..(row + 1) * self.dim]
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> + '_ { self.cells.chunks(self.dim) }

    /// All tiles in row-major order.
    #[inline]
    pub fn tiles(&self) -> &[Tile] { &self.cells }

    /// Row-major values, 0 for empty cells.
    pub fn to_values(&self) -> Vec<Value> { self.cells.iter().map(|t| t.value()).collect() }

    pub fn count_empty(&self) -> usize { self.cells.iter().filter(|t| t.is_empty()).count() }

    /// Row-major indices of the empty cells.
    pub(crate) fn empty_indices(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(idx, t)| t.is_empty().then_some(idx))
            .collect()
    }

    #[inline]
    pub(crate) fn set_index(&mut self, idx: usize, tile: Tile) { self.cells[idx] = tile; }

    /// Largest value currently on the grid (0 when empty).
    pub fn highest_tile(&self) -> Value {
        self.cells.iter().map(|t| t.value()).max().unwrap_or(0)
    }

    /// True if some cell is empty or two orthogonal neighbours hold the same value.
    pub fn can_move(&self) -> bool {
        let dim = self.dim;
        for i in 0..dim {
            for j in 0..dim {
                let tile = self.get(i, j);
                if tile.is_empty() {
                    return true;
                }
                if i + 1 < dim && tile == self.get(i + 1, j) {
                    return true;
                }
                if j + 1 < dim && tile == self.get(i, j + 1) {
                    return true;
                }
            }
        }
        false
    }

    /// Quarter turn clockwise.
    pub fn rotate_cw(&self) -> Grid {
        let dim = self.dim;
        let mut out = Grid::empty(dim);
        for i in 0..dim {
            for j in 0..dim {
                out.set(j, dim - 1 - i, self.get(i, j));
            }
        }
        out
    }

    /// Quarter turn counter-clockwise.
    pub fn rotate_ccw(&self) -> Grid {
        let dim = self.dim;
        let mut out = Grid::empty(dim);
        for i in 0..dim {
            for j in 0..dim {
                out.set(dim - 1 - j, i, self.get(i, j));
            }
        }
        out
    }

    /// Half turn.
    pub fn rotate_180(&self) -> Grid {
        let mut cells = self.cells.clone();
        cells.reverse();
        Grid { dim: self.dim, cells }
    }

    /// Compress, merge and compress every row toward the left edge.
    pub fn slide_left(&mut self) -> SlideEffect {
        let mut effect = SlideEffect::default();
        for line in self.cells.chunks_mut(self.dim) {
            let compressed = compress_line(line);
            let mut merged = merge_line(line);
            merged.changed |= compressed;
            effect.absorb(merged);
        }
        effect
    }

    /// Slide in any direction by rotating so `dir` faces left, sliding left,
    /// and rotating back. Spawning is the caller's concern.
    pub fn slide(&mut self, dir: Move) -> SlideEffect {
        let (to_left, from_left): (fn(&Grid) -> Grid, fn(&Grid) -> Grid) = match dir {
            Move::Left => return self.slide_left(),
            Move::Right => (Grid::rotate_180, Grid::rotate_180),
            Move::Up => (Grid::rotate_ccw, Grid::rotate_cw),
            Move::Down => (Grid::rotate_cw, Grid::rotate_ccw),
        };
        let mut turned = to_left(self);
        let effect = turned.slide_left();
        *self = from_left(&turned);
        effect
    }

    /// Non-mutating [`Grid::slide`].
    pub fn slid(&self, dir: Move) -> (Grid, SlideEffect) {
        let mut next = self.clone();
        let effect = next.slide(dir);
        (next, effect)
    }
}

/// Stable-partition non-empty tiles to the front of `line`. Returns true if
/// anything moved.
pub fn compress_line(line: &mut [Tile]) -> bool {
    let mut write = 0;
    let mut moved = false;
    for read in 0..line.len() {
        if !line[read].is_empty() {
            if read != write {
                line[write] = line[read];
                line[read] = Tile::EMPTY;
                moved = true;
            }
            write += 1;
        }
    }
    moved
}

/// Merge equal neighbours left to right, then close the gaps.
///
/// Each tile takes part in at most one merge: after `a` absorbs `b` the
/// emptied slot cannot match its right neighbour.
pub fn merge_line(line: &mut [Tile]) -> SlideEffect {
    let mut effect = SlideEffect::default();
    for i in 1..line.len() {
        let (head, tail) = line.split_at_mut(i);
        let left = &mut head[i - 1];
        let right = &mut tail[0];
        if right.is_empty() || left != right {
            continue;
        }
        if let Some(value) = left.absorb(right) {
            effect.changed = true;
            effect.gained += Score::from(value);
            effect.highest_merge = effect.highest_merge.max(value);
        }
    }
    compress_line(line);
    effect
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rows().map(|r| r.iter().map(|t| t.value()).collect::<Vec<_>>())).finish()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(self.dim * 8);
        writeln!(f)?;
        for (idx, row) in self.rows().enumerate() {
            if idx > 0 {
                writeln!(f, "{rule}")?;
            }
            let cells: Vec<String> = row.iter().map(|t| format_val(t.value())).collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}

fn format_val(val: Value) -> String {
    match val {
        0 => String::from("       "),
        x => {
            let mut x = x.to_string();
            while x.len() < 7 {
                match x.len() {
                    6 => x = format!(" {}", x),
                    _ => x = format!(" {} ", x),
                }
            }
            x
        }
    }
}
