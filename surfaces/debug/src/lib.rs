//! This crate provides a very simple [`DebugSurface`] to test things with.

use ow_frame::FrameType;
use ow_surface_trait::Surface;
use tracing::{info, instrument};

/// A simple debug surface that just logs a summary of every frame with tracing at the info level.
pub struct DebugSurface;

impl Surface for DebugSurface {
    fn init() -> Self {
        Self
    }

    #[instrument(skip_all)]
    fn display_frame(&mut self, frame: FrameType) {
        match frame {
            FrameType::Clear => info!("Clear"),
            FrameType::Frame2D(frame) => info!(objects = frame.objects().len(), "Frame2D"),
        }
    }
}
