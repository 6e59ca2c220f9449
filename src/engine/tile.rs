use serde::{Deserialize, Serialize};
use std::fmt;

/// Tile value type. Either 0 (empty) or a power of two.
pub type Value = u32;

/// A single grid cell.
///
/// Tiles carry no identity: two tiles are equal when their values are equal,
/// and snapshots copy them by value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tile(Value);

impl Tile {
    /// The empty tile.
    pub const EMPTY: Tile = Tile(0);

    #[inline]
    pub const fn new(value: Value) -> Self { Tile(value) }

    #[inline]
    pub const fn value(self) -> Value { self.0 }

    #[inline]
    pub const fn is_empty(self) -> bool { self.0 == 0 }

    /// Absorb `other` into this tile, returning the new (doubled) value.
    ///
    /// None, with both tiles untouched, when the doubled value does not fit.
    #[inline]
    pub(crate) fn absorb(&mut self, other: &mut Tile) -> Option<Value> {
        debug_assert_eq!(self.0, other.0);
        let doubled = self.0.checked_mul(2)?;
        self.0 = doubled;
        other.0 = 0;
        Some(doubled)
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

impl From<Value> for Tile { fn from(v: Value) -> Self { Tile(v) } }
impl From<Tile> for Value { fn from(t: Tile) -> Self { t.0 } }
