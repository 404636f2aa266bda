//! Elk motion modes

use serde::{Deserialize, Serialize};

use crate::consts::{ELK_OFFSCREEN_X, ELK_REST_X};

/// Discrete motion state of the elk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Mode {
    /// Walking in toward the right resting point
    #[default]
    ApproachRight,
    /// Resting on the right, waiting for a trigger
    StoppedRight,
    /// Walking off past the left edge
    MovingLeft,
    /// Walking in toward the left resting point
    ApproachLeft,
    /// Resting on the left, waiting for a trigger
    StoppedLeft,
    /// Walking off past the right edge
    MovingRight,
}

/// What a mode does to the elk each tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    /// Move toward `target` at capped speed, then switch to `arrive`
    Approach { target: f32, arrive: Mode },
    /// Move at full speed in `dir` until crossing `limit`, then switch to `exit`
    Travel { dir: f32, limit: f32, exit: Mode },
    /// Stay put
    Rest,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::ApproachRight => "approach-right",
            Mode::StoppedRight => "stopped-right",
            Mode::MovingLeft => "moving-left",
            Mode::ApproachLeft => "approach-left",
            Mode::StoppedLeft => "stopped-left",
            Mode::MovingRight => "moving-right",
        }
    }

    pub fn is_stopped(&self) -> bool {
        matches!(self, Mode::StoppedRight | Mode::StoppedLeft)
    }

    /// Mode a trigger sends a stopped elk into
    pub fn resume_target(&self) -> Option<Mode> {
        match self {
            Mode::StoppedRight => Some(Mode::MovingLeft),
            Mode::StoppedLeft => Some(Mode::MovingRight),
            Mode::ApproachRight | Mode::MovingLeft | Mode::ApproachLeft | Mode::MovingRight => None,
        }
    }

    pub fn motion(&self) -> Motion {
        match self {
            Mode::ApproachRight => Motion::Approach {
                target: ELK_REST_X,
                arrive: Mode::StoppedRight,
            },
            Mode::MovingLeft => Motion::Travel {
                dir: -1.0,
                limit: -ELK_OFFSCREEN_X,
                exit: Mode::ApproachLeft,
            },
            Mode::ApproachLeft => Motion::Approach {
                target: -ELK_REST_X,
                arrive: Mode::StoppedLeft,
            },
            Mode::MovingRight => Motion::Travel {
                dir: 1.0,
                limit: ELK_OFFSCREEN_X,
                exit: Mode::ApproachRight,
            },
            Mode::StoppedRight | Mode::StoppedLeft => Motion::Rest,
        }
    }
}

/// A delayed transition, applied only if the entity is still in `from`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeChange {
    pub from: Mode,
    pub to: Mode,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Mode; 6] = [
        Mode::ApproachRight,
        Mode::StoppedRight,
        Mode::MovingLeft,
        Mode::ApproachLeft,
        Mode::StoppedLeft,
        Mode::MovingRight,
    ];

    #[test]
    fn test_only_stopped_modes_resume() {
        for mode in ALL {
            assert_eq!(mode.is_stopped(), mode.resume_target().is_some(), "{}", mode.as_str());
        }
        assert_eq!(Mode::StoppedRight.resume_target(), Some(Mode::MovingLeft));
        assert_eq!(Mode::StoppedLeft.resume_target(), Some(Mode::MovingRight));
    }

    #[test]
    fn test_cycle_visits_every_mode() {
        // Follow arrivals/exits and resumes around the loop
        let mut mode = Mode::ApproachRight;
        let mut seen = Vec::new();
        for _ in 0..6 {
            seen.push(mode);
            mode = match mode.motion() {
                Motion::Approach { arrive, .. } => arrive,
                Motion::Travel { exit, .. } => exit,
                Motion::Rest => mode.resume_target().unwrap(),
            };
        }
        assert_eq!(mode, Mode::ApproachRight);
        assert_eq!(seen, ALL.to_vec());
    }
}
