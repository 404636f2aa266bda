//! Keyboard mapping

use crate::grid::Direction;

/// What a key press does in the elk scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneKey {
    /// Start the crossing over
    Restart,
    /// Same as a loud sound
    Trigger,
}

/// Elk scene action for a `KeyboardEvent.key`
pub fn scene_key(key: &str) -> SceneKey {
    match key {
        "Escape" => SceneKey::Restart,
        _ => SceneKey::Trigger,
    }
}

/// Grid direction for a `KeyboardEvent.code`
pub fn direction_for_code(code: &str) -> Option<Direction> {
    match code {
        "ArrowUp" => Some(Direction::Up),
        "ArrowDown" => Some(Direction::Down),
        "ArrowLeft" => Some(Direction::Left),
        "ArrowRight" => Some(Direction::Right),
        _ => None,
    }
}
