//! This module provides [`SphereSim`], the top-level simulation driver.

use crate::{
    arc_text::ArcTextEngine,
    compositor,
    config::SphereConfig,
    interaction::{PointerEvent, RotationState},
    motion::{self, RotationSample},
    rng,
};
use glam::Vec2;
use ow_field::ParticleField;
use ow_frame::{FrameType, CANVAS_HEIGHT, CANVAS_WIDTH};
use std::time::Duration;
use tracing::{debug, trace};

/// The simulation time increment of a single frame, in seconds.
///
/// This is deliberately not derived from the tick cadence: scene time advances by this fixed
/// amount every frame regardless of how fast or slow the ticks actually arrive, so a stalled
/// host slows the animation down rather than making it jump.
pub const FRAME_DT: f32 = 0.012;

/// The suggested wall-clock delay between frames.
const TICK_DELAY: Duration = Duration::from_millis(16);

/// The whole state of one particle sphere.
///
/// Drive it by calling [`next_frame`](Self::next_frame) in a loop and displaying each returned
/// frame on a [`Surface`](ow_surface_trait::Surface), sleeping for the returned duration
/// between calls. Pointer input arrives out of band via
/// [`push_pointer`](Self::push_pointer).
pub struct SphereSim {
    config: SphereConfig,
    field: ParticleField,
    time: f32,
    rotation: RotationState,

    /// The most recent pointer event since the last frame, if any. Only the latest one matters,
    /// so newer events overwrite older ones rather than queueing.
    inbox: Option<PointerEvent>,

    arc: Option<ArcTextEngine>,
}

impl SphereSim {
    /// Build a simulation from the given config, generating a fresh particle field.
    pub fn from_config(config: SphereConfig) -> Self {
        let field = ParticleField::generate(config.bands, config.points_per_band, &mut rng!());
        debug!(
            particles = field.len(),
            show_text = config.show_text,
            "Generated particle field"
        );

        let arc = config.show_text.then(|| {
            ArcTextEngine::new(
                config.phrases.clone(),
                config.swap_interval,
                config.chars_per_second,
            )
        });

        Self {
            config,
            field,
            time: 0.,
            rotation: RotationState::default(),
            inbox: None,
            arc,
        }
    }

    /// Record a pointer event for the next frame to consume. Ignored when the config has
    /// interaction disabled.
    pub fn push_pointer(&mut self, event: PointerEvent) {
        if self.config.interactive {
            self.inbox = Some(event);
        }
    }

    pub fn config(&self) -> &SphereConfig {
        &self.config
    }

    /// The current smoothed rotation offset, `(pitch, yaw)`.
    pub fn rotation_offset(&self) -> Vec2 {
        self.rotation.current()
    }

    pub fn arc(&self) -> Option<&ArcTextEngine> {
        self.arc.as_ref()
    }

    /// Advance the simulation by one tick and produce the next frame, along with the suggested
    /// delay before the next call.
    pub fn next_frame(&mut self) -> (FrameType, Duration) {
        if let Some(event) = self.inbox.take() {
            self.rotation.apply_event(event);
        }
        self.rotation.step();

        self.time += FRAME_DT;
        let t = self.time;

        let centre = Vec2::new(CANVAS_WIDTH / 2., CANVAS_HEIGHT / 2.);
        let projected = motion::project_field(
            &self.field,
            t,
            RotationSample::at(t, self.rotation.current()),
            self.config.radius,
            centre,
        );

        if let Some(arc) = &mut self.arc {
            arc.step(t);
        }

        let frame = compositor::compose(
            projected,
            self.arc.as_ref(),
            t,
            self.config.bands,
            self.config.radius,
            centre,
        );
        trace!(t, objects = frame.objects().len(), "Composed frame");

        (FrameType::Frame2D(frame), TICK_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TestSurface;
    use float_cmp::approx_eq;
    use ow_frame::Object;
    use ow_surface_trait::Surface;

    fn static_config() -> SphereConfig {
        SphereConfig {
            interactive: false,
            show_text: false,
            ..SphereConfig::default()
        }
    }

    #[test]
    fn static_sphere_never_moves_off_its_auto_rotation() {
        let mut sim = SphereSim::from_config(static_config());

        for _ in 0..200 {
            sim.push_pointer(PointerEvent::Moved { x: 0.9, y: -0.5 });
            let _ = sim.next_frame();
            assert_eq!(sim.rotation_offset(), Vec2::ZERO);
        }
    }

    #[test]
    fn no_glyphs_when_text_is_disabled() {
        let mut sim = SphereSim::from_config(static_config());
        let mut surface = TestSurface::init();

        for _ in 0..50 {
            let (frame, _) = sim.next_frame();
            surface.display_frame(frame);
        }

        for frame in &surface.data {
            let FrameType::Frame2D(frame) = frame else {
                panic!("expected a 2D frame");
            };
            assert!(!frame
                .objects()
                .iter()
                .any(|obj| matches!(obj.object, Object::Glyph { .. })));
        }
    }

    #[test]
    fn glyphs_appear_once_typing_starts() {
        let mut sim = SphereSim::from_config(SphereConfig {
            interactive: false,
            ..SphereConfig::default()
        });

        // One second of scene time is plenty for the first phrase to start typing.
        let mut saw_glyph = false;
        for _ in 0..((1. / FRAME_DT) as usize) {
            let (FrameType::Frame2D(frame), _) = sim.next_frame() else {
                panic!("expected a 2D frame");
            };
            saw_glyph |= frame
                .objects()
                .iter()
                .any(|obj| matches!(obj.object, Object::Glyph { .. }));
        }
        assert!(saw_glyph);
    }

    #[test]
    fn pointer_events_tilt_the_sphere_and_release_recovers() {
        let mut sim = SphereSim::from_config(SphereConfig::default());

        sim.push_pointer(PointerEvent::Moved { x: 1., y: 1. });
        for _ in 0..300 {
            let _ = sim.next_frame();
            sim.push_pointer(PointerEvent::Moved { x: 1., y: 1. });
        }
        let engaged = sim.rotation_offset();
        assert!(engaged.x > 0.3 && engaged.y > 0.4);

        sim.push_pointer(PointerEvent::Left);
        for _ in 0..2000 {
            let _ = sim.next_frame();
        }
        let released = sim.rotation_offset();
        assert!(released.length() < 1e-3);
    }

    #[test]
    fn two_sims_from_the_same_config_agree() {
        let mut a = SphereSim::from_config(SphereConfig::default());
        let mut b = SphereSim::from_config(SphereConfig::default());

        for _ in 0..20 {
            let (FrameType::Frame2D(frame_a), _) = a.next_frame() else {
                panic!("expected a 2D frame");
            };
            let (FrameType::Frame2D(frame_b), _) = b.next_frame() else {
                panic!("expected a 2D frame");
            };

            assert_eq!(frame_a.objects().len(), frame_b.objects().len());
            for (obj_a, obj_b) in frame_a.objects().iter().zip(frame_b.objects()) {
                assert!(approx_eq!(f32, obj_a.alpha, obj_b.alpha));
            }
        }
    }
}
