//! Elktrack - browser animation toys
//!
//! Core modules:
//! - `sim`: Elk crossing scene (entities, motion state machine, scheduled transitions)
//! - `grid`: Emoji grid exploration game
//! - `renderer`: Drawing surface abstraction (canvas on web, recording for tests)
//! - `platform`: Browser/native platform abstraction
//! - `settings`: Persisted slider settings

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod grid;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Scene configuration constants
pub mod consts {
    /// Maximum elk speed in world units per second
    pub const ELK_MAX_SPEED: f32 = 2300.0 / 4.3;
    /// Resting offset on either side of the scene
    pub const ELK_REST_X: f32 = 1100.0;
    /// Off-screen offset where a walking elk turns into an approaching one
    pub const ELK_OFFSCREEN_X: f32 = 1800.0;
    /// Delay between a trigger and the elk walking off (ms)
    pub const RESUME_DELAY_MS: f64 = 2000.0;
    /// Longest frame the simulation will integrate (ms)
    pub const MAX_FRAME_MS: f64 = 100.0;

    /// Elk sprite size in world units
    pub const ELK_WIDTH: f32 = 222.0;
    pub const ELK_HEIGHT: f32 = 120.0;

    /// Walls end this far from the centre on each side
    pub const WALL_INNER_X: f32 = 1150.0;
    pub const WALL_TOP: f32 = -100.0;
    pub const WALL_HEIGHT: f32 = 250.0;

    /// Half-extent of the background/foreground fills
    pub const FILL_EXTENT: f32 = 10000.0;

    /// Canvas backing store multiplier over CSS pixels
    pub const CANVAS_PIXEL_RATIO: f64 = 2.0;

    /// Grid cell size in CSS pixels
    pub const TILE_PX: f64 = 32.0;
    /// Viewport scrolls when the player gets this close to an edge
    pub const VIEWPORT_MARGIN: usize = 5;
    /// Lives at the start of a grid run
    pub const START_LIVES: u32 = 3;
}

/// Move `current` toward `target` by at most `max_step`.
///
/// Lands exactly on `target` once it is within reach.
#[inline]
pub fn approach(current: f32, target: f32, max_step: f32) -> f32 {
    let diff = target - current;
    if diff.abs() <= max_step {
        target
    } else {
        current + diff.signum() * max_step
    }
}
