//! Immediate-mode 2D drawing surface
//!
//! Entities draw in world units; the surface applies the camera transform.

use glam::Vec2;

/// An opaque sRGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: (rgb >> 16) as u8,
            g: (rgb >> 8) as u8,
            b: rgb as u8,
        }
    }

    /// CSS colour string (`#rrggbb`)
    pub fn to_css(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Scene palette
pub mod palette {
    use super::Color;

    pub const SKY: Color = Color::hex(0xfcd09f);
    pub const GRASS: Color = Color::hex(0x0b6623);
    pub const WALL: Color = Color::hex(0xcaa472);
}

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }
}

/// Images the scene can blit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Elk,
}

impl Sprite {
    /// Asset path relative to the page
    pub fn src(&self) -> &'static str {
        match self {
            Sprite::Elk => "elk.png",
        }
    }
}

/// World-to-screen transform applied at the start of each frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Screen position of the world origin (backing-store pixels)
    pub origin: Vec2,
    /// Uniform zoom
    pub zoom: f32,
}

impl Camera {
    /// Centre the world origin on the surface, shifted up by `vpos`, zoomed by `scale` percent
    pub fn new(surface_size: Vec2, scale: i32, vpos: i32) -> Self {
        Self {
            origin: Vec2::new(surface_size.x / 2.0, surface_size.y / 2.0 - vpos as f32),
            zoom: scale as f32 / 100.0,
        }
    }
}

/// Drawing backend
pub trait Surface {
    /// Backing-store size in pixels
    fn size(&self) -> Vec2;
    /// Clear the surface and install the camera transform
    fn begin_frame(&mut self, camera: &Camera);
    fn fill_rect(&mut self, color: Color, rect: Rect);
    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect, opacity: f32);
}

/// A single recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Begin(Camera),
    Fill(Color, Rect),
    Sprite(Sprite, Rect, f32),
}

/// Surface that records draw calls instead of rasterising them
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub size: Vec2,
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            commands: Vec::new(),
        }
    }

    /// Rects of every sprite drawn since the last frame began
    pub fn sprites(&self) -> impl Iterator<Item = (Sprite, Rect)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Sprite(sprite, rect, _) => Some((*sprite, *rect)),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn begin_frame(&mut self, camera: &Camera) {
        self.commands.clear();
        self.commands.push(DrawCommand::Begin(*camera));
    }

    fn fill_rect(&mut self, color: Color, rect: Rect) {
        self.commands.push(DrawCommand::Fill(color, rect));
    }

    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect, opacity: f32) {
        self.commands.push(DrawCommand::Sprite(sprite, rect, opacity));
    }
}
