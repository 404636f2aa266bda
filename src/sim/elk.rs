//! Elk sprite motion
//!
//! Walks between two resting points, leaving the scene in between.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::mode::{Mode, ModeChange, Motion};
use super::schedule::Scheduler;
use super::EntityId;
use crate::approach;
use crate::consts::*;

/// Elk state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Elk {
    /// Feet position; x is the motion axis
    pub pos: Vec2,
    pub mode: Mode,
    /// Timestamp of the previous tick (ms)
    pub last_ms: Option<f64>,
}

impl Default for Elk {
    fn default() -> Self {
        Self::new()
    }
}

impl Elk {
    pub fn new() -> Self {
        Self {
            pos: Vec2::ZERO,
            mode: Mode::ApproachRight,
            last_ms: None,
        }
    }

    /// Elapsed time since the previous tick, clamped to `[0, MAX_FRAME_MS]`
    fn elapsed_ms(&mut self, now_ms: f64) -> f64 {
        let dt = match self.last_ms {
            Some(last) => (now_ms - last).clamp(0.0, MAX_FRAME_MS),
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt
    }

    /// Advance position and mode to `now_ms`.
    ///
    /// Returns the mode change that happened this tick, if any.
    pub fn advance(&mut self, now_ms: f64) -> Option<ModeChange> {
        let dt = self.elapsed_ms(now_ms);
        let max_step = ELK_MAX_SPEED * (dt / 1000.0) as f32;

        let from = self.mode;
        match self.mode.motion() {
            Motion::Approach { target, arrive } => {
                self.pos.x = approach(self.pos.x, target, max_step);
                if self.pos.x == target {
                    self.mode = arrive;
                }
            }
            Motion::Travel { dir, limit, exit } => {
                self.pos.x += dir * max_step;
                let crossed = if dir < 0.0 {
                    self.pos.x <= limit
                } else {
                    self.pos.x >= limit
                };
                if crossed {
                    self.mode = exit;
                }
            }
            Motion::Rest => {}
        }

        (self.mode != from).then_some(ModeChange {
            from,
            to: self.mode,
        })
    }

    /// Queue the delayed resume if stopped. Returns true if newly scheduled.
    pub fn request_resume(
        &self,
        id: EntityId,
        now_ms: f64,
        scheduler: &mut Scheduler<EntityId, ModeChange>,
    ) -> bool {
        let Some(to) = self.mode.resume_target() else {
            return false;
        };
        scheduler.schedule(
            id,
            now_ms + RESUME_DELAY_MS,
            ModeChange {
                from: self.mode,
                to,
            },
        )
    }

    /// Apply a delayed change; stale changes (mode moved on) are dropped
    pub fn apply(&mut self, change: ModeChange) -> bool {
        if self.mode != change.from {
            return false;
        }
        self.mode = change.to;
        true
    }

    /// Back to the start, dropping any pending resume
    pub fn reset(&mut self, id: EntityId, scheduler: &mut Scheduler<EntityId, ModeChange>) {
        scheduler.cancel(id);
        *self = Self::new();
    }
}
