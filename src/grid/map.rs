//! Rectangular tile map

use rand::Rng;
use thiserror::Error;

use super::tile::Tile;

/// Emoji presentation selector; carries no cell of its own
const VARIATION_SELECTOR: char = '\u{FE0F}';

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("map has no cells")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Row-major tile grid; only built through `filled`, `parse` or `generate`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Map {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl Map {
    /// Map of `width × height` empty cells (at least 1×1)
    pub fn filled(width: usize, height: usize, tile: Tile) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            tiles: vec![tile; width * height],
        }
    }

    /// Parse one glyph per cell, one line per row
    pub fn parse(text: &str) -> Result<Self, MapError> {
        let rows: Vec<Vec<Tile>> = text
            .lines()
            .filter(|line| !line.is_empty())
            .map(|line| {
                line.chars()
                    .filter(|&c| c != VARIATION_SELECTOR)
                    .map(Tile::from_glyph)
                    .collect()
            })
            .collect();

        let width = rows.first().map(Vec::len).unwrap_or(0);
        if width == 0 {
            return Err(MapError::Empty);
        }
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != width)
        {
            return Err(MapError::Ragged {
                row,
                expected: width,
                found,
            });
        }

        Ok(Self {
            width,
            height: rows.len(),
            tiles: rows.into_iter().flatten().collect(),
        })
    }

    /// Scatter trees, rocks, cherries and monsters over an empty field
    pub fn generate(width: usize, height: usize, rng: &mut impl Rng) -> Self {
        let mut map = Self::filled(width, height, Tile::Empty);
        for tile in map.tiles.iter_mut() {
            let roll = rng.random_range(0..100u32);
            *tile = match roll {
                0..20 => Tile::FullTree,
                20..25 => Tile::PartialTree,
                25..33 => Tile::Rock,
                33..35 => Tile::Cherry,
                35..38 => Tile::Monster,
                _ => Tile::Empty,
            };
        }
        map
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: usize, y: usize) -> usize {
        y.min(self.height - 1) * self.width + x.min(self.width - 1)
    }

    /// Cell at `(x, y)`, clamped to the map bounds
    pub fn get(&self, x: usize, y: usize) -> Tile {
        self.tiles[self.index(x, y)]
    }

    /// Overwrite the cell at `(x, y)`, clamped to the map bounds
    pub fn set(&mut self, x: usize, y: usize, tile: Tile) {
        let i = self.index(x, y);
        self.tiles[i] = tile;
    }

}
