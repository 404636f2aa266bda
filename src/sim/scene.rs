//! Frame loop driver
//!
//! Owns the entities and the scheduled transitions; the platform calls
//! `tick` once per animation frame.

use super::EntityId;
use super::entity::{Background, ElkSprite, Entity, Foreground, Frame, Side, Wall};
use super::mode::ModeChange;
use super::schedule::Scheduler;
use crate::renderer::{Camera, Surface};
use crate::settings::Settings;

/// Input for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    /// Animation frame timestamp (ms)
    pub now_ms: f64,
    /// Loud audio or key press this frame
    pub triggered: bool,
}

pub struct Scene {
    entities: Vec<Box<dyn Entity>>,
    scheduler: Scheduler<EntityId, ModeChange>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            scheduler: Scheduler::new(),
        }
    }

    /// Background, foreground, elk, then the walls in front of it
    pub fn elk_crossing() -> Self {
        let mut scene = Self::new();
        scene.add(Box::new(Background));
        scene.add(Box::new(Foreground));
        scene.add(Box::new(ElkSprite::new()));
        scene.add(Box::new(Wall::new(Side::Left)));
        scene.add(Box::new(Wall::new(Side::Right)));
        scene
    }

    pub fn add(&mut self, entity: Box<dyn Entity>) -> EntityId {
        let id = self.entities.len() as EntityId;
        log::debug!("Registered {} as entity {}", entity.name(), id);
        self.entities.push(entity);
        id
    }

    pub fn scheduler(&self) -> &Scheduler<EntityId, ModeChange> {
        &self.scheduler
    }

    /// Deliver due transitions, then update every entity
    pub fn update(&mut self, input: FrameInput) {
        for (id, change) in self.scheduler.take_due(input.now_ms) {
            if let Some(entity) = self.entities.get_mut(id as usize) {
                entity.on_mode_change(change);
            }
        }

        for (index, entity) in self.entities.iter_mut().enumerate() {
            let mut frame = Frame {
                id: index as EntityId,
                now_ms: input.now_ms,
                triggered: input.triggered,
                scheduler: &mut self.scheduler,
            };
            entity.update(&mut frame);
        }
    }

    /// Put every entity back in its initial state and drop pending transitions
    pub fn reset(&mut self) {
        for (index, entity) in self.entities.iter_mut().enumerate() {
            entity.reset(index as EntityId, &mut self.scheduler);
        }
        log::info!("Scene reset");
    }

    /// Clear the surface with the settings' camera and draw every entity
    pub fn draw(&self, surface: &mut dyn Surface, settings: &Settings) {
        let camera = Camera::new(surface.size(), settings.scale, settings.vpos);
        surface.begin_frame(&camera);
        for entity in &self.entities {
            entity.draw(surface);
        }
    }

    /// One animation frame
    pub fn tick(&mut self, input: FrameInput, surface: &mut dyn Surface, settings: &Settings) {
        self.update(input);
        self.draw(surface, settings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::renderer::{DrawCommand, RecordingSurface, Sprite};

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn elk_x(surface: &RecordingSurface) -> f32 {
        let (_, rect) = surface.sprites().next().expect("elk drawn");
        rect.min.x + ELK_WIDTH / 2.0
    }

    /// Run frames until the elk stops at `x`; returns the time reached
    fn run_until_rest(
        scene: &mut Scene,
        surface: &mut RecordingSurface,
        settings: &Settings,
        mut now: f64,
        x: f32,
    ) -> f64 {
        for _ in 0..10_000 {
            now += FRAME_MS;
            scene.tick(FrameInput { now_ms: now, triggered: false }, surface, settings);
            if elk_x(surface) == x {
                return now;
            }
        }
        panic!("elk never rested at {}", x);
    }

    #[test]
    fn test_draw_order_is_registration_order() {
        let mut scene = Scene::elk_crossing();
        let mut surface = RecordingSurface::new(1600.0, 1200.0);
        let settings = Settings::default();
        scene.tick(FrameInput::default(), &mut surface, &settings);

        assert_eq!(surface.commands.len(), 6);
        assert!(matches!(surface.commands[0], DrawCommand::Begin(_)));
        assert!(matches!(surface.commands[3], DrawCommand::Sprite(Sprite::Elk, _, _)));
        // Walls are drawn over the elk
        assert!(matches!(&surface.commands[4], DrawCommand::Fill(c, _) if *c == crate::renderer::palette::WALL));
    }

    #[test]
    fn test_camera_follows_settings() {
        let mut scene = Scene::elk_crossing();
        let mut surface = RecordingSurface::new(1600.0, 1200.0);
        let settings = Settings {
            scale: 50,
            vpos: 200,
            ..Default::default()
        };
        scene.tick(FrameInput::default(), &mut surface, &settings);
        let DrawCommand::Begin(camera) = &surface.commands[0] else {
            panic!("frame did not begin with camera");
        };
        assert_eq!(camera.origin, glam::Vec2::new(800.0, 400.0));
        assert_eq!(camera.zoom, 0.5);
    }

    #[test]
    fn test_trigger_resumes_after_delay() {
        let mut scene = Scene::elk_crossing();
        let mut surface = RecordingSurface::new(1600.0, 1200.0);
        let settings = Settings::default();
        scene.tick(FrameInput::default(), &mut surface, &settings);
        let now = run_until_rest(&mut scene, &mut surface, &settings, 0.0, ELK_REST_X);

        // Trigger while stopped
        scene.tick(FrameInput { now_ms: now + FRAME_MS, triggered: true }, &mut surface, &settings);
        assert!(scene.scheduler().is_pending(2));
        let due = scene.scheduler().due_at(2).unwrap();
        assert_eq!(due, now + FRAME_MS + RESUME_DELAY_MS);

        // Re-trigger does not push the deadline out
        scene.tick(FrameInput { now_ms: now + 2.0 * FRAME_MS, triggered: true }, &mut surface, &settings);
        assert_eq!(scene.scheduler().due_at(2), Some(due));

        // Just before the deadline it is still resting
        scene.tick(FrameInput { now_ms: due - 1.0, triggered: false }, &mut surface, &settings);
        assert_eq!(elk_x(&surface), ELK_REST_X);

        // At the deadline the change lands and the elk starts walking left
        scene.tick(FrameInput { now_ms: due + FRAME_MS, triggered: false }, &mut surface, &settings);
        assert!(elk_x(&surface) < ELK_REST_X);
        assert!(scene.scheduler().is_empty());
    }

    #[test]
    fn test_reset_drops_pending_resume() {
        let mut scene = Scene::elk_crossing();
        let mut surface = RecordingSurface::new(1600.0, 1200.0);
        let settings = Settings::default();
        scene.tick(FrameInput::default(), &mut surface, &settings);
        let now = run_until_rest(&mut scene, &mut surface, &settings, 0.0, ELK_REST_X);
        scene.tick(FrameInput { now_ms: now + FRAME_MS, triggered: true }, &mut surface, &settings);
        assert!(scene.scheduler().is_pending(2));

        scene.reset();
        assert!(scene.scheduler().is_empty());

        // Starts over from the centre and the old deadline never fires
        let later = now + FRAME_MS + RESUME_DELAY_MS + 1.0;
        scene.tick(FrameInput { now_ms: later, triggered: false }, &mut surface, &settings);
        assert_eq!(elk_x(&surface), 0.0);
        run_until_rest(&mut scene, &mut surface, &settings, later, ELK_REST_X);
    }

    #[test]
    fn test_no_trigger_while_walking() {
        let mut scene = Scene::elk_crossing();
        let mut surface = RecordingSurface::new(1600.0, 1200.0);
        let settings = Settings::default();
        scene.tick(FrameInput { now_ms: 0.0, triggered: true }, &mut surface, &settings);
        scene.tick(FrameInput { now_ms: FRAME_MS, triggered: true }, &mut surface, &settings);
        assert!(scene.scheduler().is_empty());
    }
}
