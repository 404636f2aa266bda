//! Rendering module
//!
//! Entities draw through the `Surface` trait: a canvas 2D context in the
//! browser, a command recorder everywhere else.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod surface;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use surface::{Camera, Color, DrawCommand, RecordingSurface, Rect, Sprite, Surface, palette};
