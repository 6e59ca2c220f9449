//! Tile colours for drivers that draw the grid.
//!
//! Pure lookups over constant data; the engine never calls these.

use crate::engine::Value;

/// Background used for values outside the classic range.
pub const UNKNOWN_TILE: u32 = 0xff0000;

const DARK_FONT: u32 = 0x776e65;
const LIGHT_FONT: u32 = 0xf9f6f2;

const TILE_COLORS: [(Value, u32); 12] = [
    (0, 0xcdc1b4),
    (2, 0xeee4da),
    (4, 0xede0c8),
    (8, 0xf2b179),
    (16, 0xf59563),
    (32, 0xf67c5f),
    (64, 0xf65e3b),
    (128, 0xedcf72),
    (256, 0xedcc61),
    (512, 0xedc850),
    (1024, 0xedc53f),
    (2048, 0xedc22e),
];

/// `0xRRGGBB` background for a tile value.
pub fn tile_color(value: Value) -> u32 {
    TILE_COLORS
        .iter()
        .find_map(|&(v, c)| (v == value).then_some(c))
        .unwrap_or(UNKNOWN_TILE)
}

/// `0xRRGGBB` text colour: dark on the pale low tiles, light from 16 up.
pub fn font_color(value: Value) -> u32 {
    if value < 16 { DARK_FONT } else { LIGHT_FONT }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_values() {
        assert_eq!(tile_color(0), 0xcdc1b4);
        assert_eq!(tile_color(2), 0xeee4da);
        assert_eq!(tile_color(2048), 0xedc22e);
    }

    #[test]
    fn unknown_values_fall_back() {
        assert_eq!(tile_color(4096), UNKNOWN_TILE);
        assert_eq!(tile_color(3), UNKNOWN_TILE);
    }

    #[test]
    fn font_switches_at_sixteen() {
        assert_eq!(font_color(8), 0x776e65);
        assert_eq!(font_color(16), 0xf9f6f2);
        assert_eq!(font_color(0), 0x776e65);
    }
}
