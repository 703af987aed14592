//! This crate provides the [`Surface`] trait and nothing else.
//!
//! It's structured like this to avoid dependency cycles.

use ow_frame::FrameType;

/// The trait implemented by everything that can display frames.
pub trait Surface {
    /// Initialise the surface.
    fn init() -> Self
    where
        Self: Sized;

    /// Display the given frame on this surface.
    ///
    /// A surface without a usable drawing context must treat this as a no-op and skip the
    /// frame; displaying never fails and never blocks the frame loop.
    fn display_frame(&mut self, frame: FrameType);

    /// Clear the surface by displaying [`FrameType::Clear`].
    fn clear(&mut self) {
        self.display_frame(FrameType::Clear);
    }
}
