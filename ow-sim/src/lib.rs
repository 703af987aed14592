//! This crate provides the particle-sphere simulation core.
//!
//! The simulation is a fixed-step frame pipeline. Each call to [`SphereSim::next_frame`]
//! advances simulation time by one tick and runs the stages in order: consume the pointer
//! inbox, smooth the rotation offset, perturb and project the particle field, step the arc
//! text, and compose everything into a [`Frame2D`](ow_frame::Frame2D) for a
//! [`Surface`](ow_surface_trait::Surface) to display. All state lives in [`SphereSim`]; there
//! are no ambient globals.

pub mod arc_text;
pub mod compositor;
pub mod config;
pub mod interaction;
pub mod motion;

mod sim;

pub use self::{
    arc_text::{ArcSegment, ArcTextEngine},
    config::{ConfigError, SphereConfig},
    interaction::{PointerEvent, RotationState},
    motion::{ProjectedPoint, RotationSample},
    sim::{SphereSim, FRAME_DT},
};

/// Create a `rand::rngs::StdRng` from entropy in a normal build, or seeded from 12345 in a test
/// or bench build.
macro_rules! rng {
    () => {{
        use ::rand::{rngs::StdRng, SeedableRng};

        cfg_if::cfg_if! {
            if #[cfg(any(test, feature = "bench"))] {
                StdRng::seed_from_u64(12345)
            } else {
                StdRng::from_entropy()
            }
        }
    }};
}

pub(crate) use rng;

/// A surface that just collects every displayed frame, for tests and benches.
#[cfg(any(test, feature = "bench"))]
pub struct TestSurface {
    /// Every frame displayed on this surface, oldest first.
    pub data: Vec<ow_frame::FrameType>,
}

#[cfg(any(test, feature = "bench"))]
impl ow_surface_trait::Surface for TestSurface {
    fn init() -> Self {
        Self { data: vec![] }
    }

    fn display_frame(&mut self, frame: ow_frame::FrameType) {
        self.data.push(frame);
    }
}
