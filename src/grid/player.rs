//! Player token

use crate::consts::START_LIVES;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl Direction {
    /// Neighbouring cell in this direction, clamped to `width × height`
    pub fn step(&self, x: usize, y: usize, width: usize, height: usize) -> (usize, usize) {
        match self {
            Direction::Up => (x, y.saturating_sub(1)),
            Direction::Down => (x, (y + 1).min(height.saturating_sub(1))),
            Direction::Left => (x.saturating_sub(1), y),
            Direction::Right => ((x + 1).min(width.saturating_sub(1)), y),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub x: usize,
    pub y: usize,
    pub facing: Direction,
    pub score: u32,
    pub lives: u32,
    /// Logs collected
    pub trees: u32,
    pub alive: bool,
}

impl Player {
    pub fn new(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            facing: Direction::Right,
            score: 0,
            lives: START_LIVES,
            trees: 0,
            alive: true,
        }
    }

    pub fn glyph(&self) -> char {
        if self.alive { '🐻' } else { '💀' }
    }

    /// Lose a life; dies when none are left
    pub fn wound(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.alive = false;
        }
    }
}
