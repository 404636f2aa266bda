//! Scene entities
//!
//! Each entity is updated then drawn once per animation frame, in
//! registration order.

use super::EntityId;
use super::elk::Elk;
use super::mode::ModeChange;
use super::schedule::Scheduler;
use crate::consts::*;
use crate::renderer::{Rect, Sprite, Surface, palette};

/// Per-entity view of the current frame
pub struct Frame<'a> {
    pub id: EntityId,
    pub now_ms: f64,
    /// External trigger (loud audio or key press) seen this frame
    pub triggered: bool,
    pub scheduler: &'a mut Scheduler<EntityId, ModeChange>,
}

pub trait Entity {
    fn update(&mut self, _frame: &mut Frame<'_>) {}

    fn draw(&self, surface: &mut dyn Surface);

    /// Deliver a scheduled mode change
    fn on_mode_change(&mut self, _change: ModeChange) {}

    /// Return to the initial state
    fn reset(&mut self, _id: EntityId, _scheduler: &mut Scheduler<EntityId, ModeChange>) {}

    fn name(&self) -> &'static str;
}

/// Sky fill
pub struct Background;

impl Entity for Background {
    fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_rect(
            palette::SKY,
            Rect::new(-FILL_EXTENT, -FILL_EXTENT / 2.0, FILL_EXTENT * 2.0, FILL_EXTENT),
        );
    }

    fn name(&self) -> &'static str {
        "background"
    }
}

/// Grass fill below the horizon
pub struct Foreground;

impl Entity for Foreground {
    fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_rect(
            palette::GRASS,
            Rect::new(-FILL_EXTENT, 0.0, FILL_EXTENT * 2.0, FILL_EXTENT),
        );
    }

    fn name(&self) -> &'static str {
        "foreground"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Wall hiding the elk while it is off to one side
pub struct Wall {
    pub side: Side,
}

impl Wall {
    pub fn new(side: Side) -> Self {
        Self { side }
    }

    pub fn rect(&self) -> Rect {
        let width = FILL_EXTENT - WALL_INNER_X;
        match self.side {
            Side::Left => Rect::new(-FILL_EXTENT, WALL_TOP, width, WALL_HEIGHT),
            Side::Right => Rect::new(WALL_INNER_X, WALL_TOP, width, WALL_HEIGHT),
        }
    }
}

impl Entity for Wall {
    fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_rect(palette::WALL, self.rect());
    }

    fn name(&self) -> &'static str {
        match self.side {
            Side::Left => "wall-left",
            Side::Right => "wall-right",
        }
    }
}

/// The elk as a scene entity
#[derive(Default)]
pub struct ElkSprite {
    pub elk: Elk,
}

impl ElkSprite {
    pub fn new() -> Self {
        Self { elk: Elk::new() }
    }

    /// Sprite rect, anchored at the feet
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.elk.pos.x - ELK_WIDTH / 2.0,
            self.elk.pos.y - ELK_HEIGHT,
            ELK_WIDTH,
            ELK_HEIGHT,
        )
    }
}

impl Entity for ElkSprite {
    fn update(&mut self, frame: &mut Frame<'_>) {
        if frame.triggered && self.elk.request_resume(frame.id, frame.now_ms, frame.scheduler) {
            log::info!("Elk resumes in {} ms", RESUME_DELAY_MS);
        }

        if let Some(change) = self.elk.advance(frame.now_ms) {
            log::debug!(
                "Elk {} -> {} at x={:.1}",
                change.from.as_str(),
                change.to.as_str(),
                self.elk.pos.x
            );
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.draw_sprite(Sprite::Elk, self.rect(), 1.0);
    }

    fn on_mode_change(&mut self, change: ModeChange) {
        if !self.elk.apply(change) {
            log::debug!(
                "Dropped stale change {} -> {} (elk is {})",
                change.from.as_str(),
                change.to.as_str(),
                self.elk.mode.as_str()
            );
        }
    }

    fn reset(&mut self, id: EntityId, scheduler: &mut Scheduler<EntityId, ModeChange>) {
        self.elk.reset(id, scheduler);
    }

    fn name(&self) -> &'static str {
        "elk"
    }
}
