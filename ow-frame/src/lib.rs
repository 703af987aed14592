//! This crate provides functionality for specifying and using 2D frames.
//!
//! The simulation emits a [`Frame2D`] of declarative draw objects every tick, and a surface
//! implementation decides how to actually paint them. Nothing in here touches a real drawing
//! context.

mod frame;
mod object;

pub use self::{
    frame::{Frame2D, FrameType},
    object::{smooth_closed_loop, FrameObject, GradientStop, Object},
};

/// An RGB colour.
pub type RGBArray = [u8; 3];

/// The width of the logical drawing space, in logical units.
///
/// Surfaces scale this to whatever footprint they actually have; the simulation never needs to
/// know about device pixels.
pub const CANVAS_WIDTH: f32 = 560.;

/// The height of the logical drawing space, in logical units.
pub const CANVAS_HEIGHT: f32 = 560.;
