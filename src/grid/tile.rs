//! Grid cells

/// A single map cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tile {
    #[default]
    Empty,
    /// 🎄 - takes two chops
    FullTree,
    /// 🌲 - one more chop leaves a log
    PartialTree,
    /// 🪵
    Log,
    /// 🪨 - impassable
    Rock,
    /// 🍒 - extra life
    Cherry,
    /// 🧌
    Monster,
    /// Any other glyph; walkable scenery
    Other(char),
}

impl Tile {
    pub fn from_glyph(glyph: char) -> Self {
        match glyph {
            ' ' => Tile::Empty,
            '🎄' => Tile::FullTree,
            '🌲' => Tile::PartialTree,
            '🪵' => Tile::Log,
            '🪨' => Tile::Rock,
            '🍒' => Tile::Cherry,
            '🧌' => Tile::Monster,
            other => Tile::Other(other),
        }
    }

    pub fn glyph(&self) -> char {
        match self {
            Tile::Empty => ' ',
            Tile::FullTree => '🎄',
            Tile::PartialTree => '🌲',
            Tile::Log => '🪵',
            Tile::Rock => '🪨',
            Tile::Cherry => '🍒',
            Tile::Monster => '🧌',
            Tile::Other(c) => *c,
        }
    }
}
