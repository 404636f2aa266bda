//! Emoji grid exploration game
//!
//! Pure game logic: the platform feeds arrow-key moves into `GridGame::step`
//! and renders `visible_rows`/`hud` however it likes.

pub mod game;
pub mod map;
pub mod player;
pub mod tile;
pub mod viewport;

pub use game::{GridGame, MonsterOdds, MoveOutcome, SeededOdds, Strike};
pub use map::{Map, MapError};
pub use player::{Direction, Player};
pub use tile::Tile;
pub use viewport::Viewport;
