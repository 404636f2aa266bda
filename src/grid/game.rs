//! Grid game state and move rules

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::map::Map;
use super::player::{Direction, Player};
use super::tile::Tile;
use super::viewport::Viewport;

/// Result of swinging at a monster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strike {
    /// Monster hits back; player loses a life
    Hit,
    /// Player wins; monster removed, +1 score
    Miss,
}

/// Source of monster fight outcomes
pub trait MonsterOdds {
    fn strike(&mut self) -> Strike;
}

/// Fair coin from a seeded PCG32
#[derive(Debug, Clone)]
pub struct SeededOdds {
    rng: Pcg32,
}

impl SeededOdds {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl MonsterOdds for SeededOdds {
    fn strike(&mut self) -> Strike {
        if self.rng.random_bool(0.5) {
            Strike::Hit
        } else {
            Strike::Miss
        }
    }
}

/// Always the same outcome
impl MonsterOdds for Strike {
    fn strike(&mut self) -> Strike {
        *self
    }
}

/// What a move did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Player is dead; nothing happened
    Ignored,
    Moved,
    Blocked,
    Chopped(Tile),
    CollectedLog,
    AteCherry,
    Fought(Strike),
}

/// Complete grid game state
#[derive(Debug, Clone)]
pub struct GridGame {
    pub map: Map,
    pub player: Player,
    pub viewport: Viewport,
}

impl GridGame {
    /// Start in the middle of `map` with a `view_width × view_height` window
    pub fn new(mut map: Map, view_width: usize, view_height: usize) -> Self {
        let x = (map.width() - 1) / 2;
        let y = (map.height() - 1) / 2;
        map.set(x, y, Tile::Empty);
        let viewport = Viewport::centered(view_width, view_height, x, y, map.width(), map.height());
        Self {
            map,
            player: Player::new(x, y),
            viewport,
        }
    }

    /// Resize the window (e.g. after a browser resize) and re-centre on the player
    pub fn resize(&mut self, view_width: usize, view_height: usize) {
        self.viewport = Viewport::centered(
            view_width,
            view_height,
            self.player.x,
            self.player.y,
            self.map.width(),
            self.map.height(),
        );
    }

    /// Try to move one cell, applying the target cell's interaction
    pub fn step(&mut self, direction: Direction, odds: &mut impl MonsterOdds) -> MoveOutcome {
        if !self.player.alive {
            return MoveOutcome::Ignored;
        }

        self.player.facing = direction;
        let (x, y) = direction.step(
            self.player.x,
            self.player.y,
            self.map.width(),
            self.map.height(),
        );

        let outcome = match self.map.get(x, y) {
            Tile::FullTree => {
                self.map.set(x, y, Tile::PartialTree);
                MoveOutcome::Chopped(Tile::FullTree)
            }
            Tile::PartialTree => {
                self.map.set(x, y, Tile::Log);
                MoveOutcome::Chopped(Tile::PartialTree)
            }
            Tile::Log => {
                self.map.set(x, y, Tile::Empty);
                self.player.trees += 1;
                self.move_to(x, y);
                MoveOutcome::CollectedLog
            }
            Tile::Rock => MoveOutcome::Blocked,
            Tile::Cherry => {
                self.player.lives += 1;
                self.map.set(x, y, Tile::Empty);
                self.move_to(x, y);
                MoveOutcome::AteCherry
            }
            Tile::Monster => {
                let strike = odds.strike();
                match strike {
                    Strike::Hit => {
                        self.player.wound();
                        if !self.player.alive {
                            log::info!("Player died with score {}", self.player.score);
                        }
                    }
                    Strike::Miss => {
                        self.player.score += 1;
                        self.map.set(x, y, Tile::Empty);
                    }
                }
                MoveOutcome::Fought(strike)
            }
            Tile::Empty | Tile::Other(_) => {
                self.move_to(x, y);
                MoveOutcome::Moved
            }
        };

        self.viewport.follow(
            self.player.x,
            self.player.y,
            self.map.width(),
            self.map.height(),
        );
        outcome
    }

    fn move_to(&mut self, x: usize, y: usize) {
        self.player.x = x;
        self.player.y = y;
    }

    /// Visible rows of glyphs, with the player drawn over its cell
    pub fn visible_rows(&self) -> Vec<String> {
        let vp = &self.viewport;
        (vp.y..vp.y + vp.height)
            .map(|y| {
                (vp.x..vp.x + vp.width)
                    .map(|x| {
                        if (x, y) == (self.player.x, self.player.y) {
                            self.player.glyph()
                        } else {
                            self.map.get(x, y).glyph()
                        }
                    })
                    .collect()
            })
            .collect()
    }

    pub fn hud(&self) -> String {
        format!(
            "Score: {} Lives: {} Tree: {}",
            self.player.score, self.player.lives, self.player.trees
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::START_LIVES;
    use proptest::prelude::*;

    /// 11×11 empty map; player starts at (5, 5)
    fn game_with(x: usize, y: usize, tile: Tile) -> GridGame {
        let mut map = Map::filled(11, 11, Tile::Empty);
        map.set(x, y, tile);
        GridGame::new(map, 11, 11)
    }

    #[test]
    fn test_starts_centered_on_cleared_cell() {
        let map = Map::filled(11, 11, Tile::Rock);
        let game = GridGame::new(map, 5, 5);
        assert_eq!((game.player.x, game.player.y), (5, 5));
        assert_eq!(game.map.get(5, 5), Tile::Empty);
        assert_eq!(game.player.lives, START_LIVES);
    }

    #[test]
    fn test_tree_takes_two_chops_then_log() {
        let mut game = game_with(6, 5, Tile::FullTree);
        let mut odds = Strike::Miss;

        assert_eq!(game.step(Direction::Right, &mut odds), MoveOutcome::Chopped(Tile::FullTree));
        assert_eq!(game.map.get(6, 5), Tile::PartialTree);
        assert_eq!(game.player.x, 5);

        assert_eq!(game.step(Direction::Right, &mut odds), MoveOutcome::Chopped(Tile::PartialTree));
        assert_eq!(game.map.get(6, 5), Tile::Log);
        assert_eq!(game.player.x, 5);

        assert_eq!(game.step(Direction::Right, &mut odds), MoveOutcome::CollectedLog);
        assert_eq!(game.map.get(6, 5), Tile::Empty);
        assert_eq!((game.player.x, game.player.trees), (6, 1));
    }

    #[test]
    fn test_rock_blocks() {
        let mut game = game_with(5, 4, Tile::Rock);
        assert_eq!(game.step(Direction::Up, &mut Strike::Miss), MoveOutcome::Blocked);
        assert_eq!((game.player.x, game.player.y), (5, 5));
        assert_eq!(game.map.get(5, 4), Tile::Rock);
    }

    #[test]
    fn test_cherry_grants_life() {
        let mut game = game_with(4, 5, Tile::Cherry);
        assert_eq!(game.step(Direction::Left, &mut Strike::Miss), MoveOutcome::AteCherry);
        assert_eq!((game.player.x, game.player.lives), (4, 4));
        assert_eq!(game.map.get(4, 5), Tile::Empty);
    }

    #[test]
    fn test_monster_miss_scores() {
        let mut game = game_with(6, 5, Tile::Monster);
        assert_eq!(game.step(Direction::Right, &mut Strike::Miss), MoveOutcome::Fought(Strike::Miss));
        assert_eq!(game.player.score, 1);
        assert_eq!(game.player.lives, 3);
        assert_eq!(game.map.get(6, 5), Tile::Empty);
        assert_eq!((game.player.x, game.player.y), (5, 5));
    }

    #[test]
    fn test_monster_hit_costs_life() {
        let mut game = game_with(6, 5, Tile::Monster);
        assert_eq!(game.step(Direction::Right, &mut Strike::Hit), MoveOutcome::Fought(Strike::Hit));
        assert_eq!(game.player.lives, 2);
        assert_eq!(game.player.score, 0);
        assert_eq!(game.map.get(6, 5), Tile::Monster);
        assert_eq!((game.player.x, game.player.y), (5, 5));
    }

    #[test]
    fn test_death_stops_movement() {
        let mut game = game_with(6, 5, Tile::Monster);
        for _ in 0..3 {
            game.step(Direction::Right, &mut Strike::Hit);
        }
        assert!(!game.player.alive);
        assert_eq!(game.step(Direction::Left, &mut Strike::Miss), MoveOutcome::Ignored);
        assert_eq!((game.player.x, game.player.y), (5, 5));
        assert!(game.visible_rows().concat().contains('💀'));
    }

    #[test]
    fn test_edge_move_stays_on_map() {
        let mut game = GridGame::new(Map::filled(1, 1, Tile::Empty), 10, 10);
        assert_eq!(game.step(Direction::Up, &mut Strike::Miss), MoveOutcome::Moved);
        assert_eq!((game.player.x, game.player.y), (0, 0));
    }

    #[test]
    fn test_render_and_hud() {
        let map = Map::parse("🪨🪨🪨\n🪨  \n🍒🍒🍒").unwrap();
        let game = GridGame::new(map, 3, 3);
        assert_eq!(game.visible_rows(), vec!["🪨🪨🪨", "🪨🐻 ", "🍒🍒🍒"]);
        assert_eq!(game.hud(), "Score: 0 Lives: 3 Tree: 0");
    }

    #[test]
    fn test_seeded_odds_are_roughly_fair() {
        let mut odds = SeededOdds::new(42);
        let hits = (0..1000).filter(|_| odds.strike() == Strike::Hit).count();
        assert!((400..600).contains(&hits), "hits = {}", hits);
    }

    proptest! {
        #[test]
        fn prop_rock_and_monster_never_move_player(
            seed in any::<u64>(),
            dirs in prop::collection::vec(0usize..4, 1..100),
        ) {
            let all = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];
            let map = Map::generate(30, 20, &mut Pcg32::seed_from_u64(seed));
            let mut game = GridGame::new(map, 12, 8);
            let mut odds = SeededOdds::new(seed);
            for d in dirs {
                let dir = all[d];
                let (x, y) = dir.step(game.player.x, game.player.y, game.map.width(), game.map.height());
                let target = game.map.get(x, y);
                let before = game.player.clone();
                game.step(dir, &mut odds);
                if game.player.alive || before.alive {
                    if matches!(target, Tile::Rock | Tile::Monster) {
                        prop_assert_eq!((game.player.x, game.player.y), (before.x, before.y));
                    }
                    if target == Tile::Monster {
                        prop_assert!(game.player.lives <= before.lives);
                    }
                }
                prop_assert!(game.viewport.x + game.viewport.width <= game.map.width());
                prop_assert!(game.viewport.y + game.viewport.height <= game.map.height());
            }
        }
    }
}
