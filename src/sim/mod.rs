//! Elk crossing simulation
//!
//! Everything here is pure and driven by frame timestamps:
//! - No browser dependencies
//! - Delayed transitions are data in a `Scheduler`, not timers
//! - Stable update/draw order (registration order)

pub mod elk;
pub mod entity;
pub mod mode;
pub mod scene;
pub mod schedule;
pub mod trigger;

/// Index of an entity in its scene
pub type EntityId = u32;

pub use elk::Elk;
pub use entity::{Background, ElkSprite, Entity, Foreground, Frame, Side, Wall};
pub use mode::{Mode, ModeChange, Motion};
pub use scene::{FrameInput, Scene};
pub use schedule::Scheduler;
pub use trigger::{AudioTrigger, peak_to_peak};
